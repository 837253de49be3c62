//! Semicolon-delimited summary table writer.

use super::validate_path;
use crate::aggregator::summary::SummaryRow;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write summary rows as a `;`-delimited table with one header row
///
/// **Public** - used by the summary command
///
/// The header is emitted together with the first row, so an empty
/// row set produces an empty file.
pub fn write_summary_table(
    rows: &[SummaryRow],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory: {}", e))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(BufWriter::new(file));

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    info!("Wrote {} rows to {}", rows.len(), output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_row() -> SummaryRow {
        SummaryRow {
            unique_key: "hd_v210_001".to_string(),
            configuration_name: "hd_v210".to_string(),
            gl_renderer: "Quadro K5000".to_string(),
            avg_mb_per_sec: 512.5,
            avg_ms_per_frame: 16.25,
            median_latency_ms: 40.0,
            format_conversion_decode_us: 120.0,
            render_us: 0.0,
            format_conversion_encode_us: 95.5,
        }
    }

    #[test]
    fn test_header_and_row() {
        let temp_file = NamedTempFile::new().unwrap();

        write_summary_table(&[create_test_row()], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Unique Key;Configuration Name;GL Renderer;Avg. mb/sec;Avg. msec/frame;Median latency;Formatconv-dec (med);Render (med);Formatconv-enc (med)"
        );
        assert_eq!(
            lines[1],
            "hd_v210_001;hd_v210;Quadro K5000;512.5;16.25;40.0;120.0;0.0;95.5"
        );
    }

    #[test]
    fn test_empty_rows_write_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_summary_table(&[], temp_file.path()).unwrap();
        assert!(std::fs::read_to_string(temp_file.path()).unwrap().is_empty());
    }
}
