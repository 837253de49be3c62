//! Find trace files below a folder and run per-file work over them.
//!
//! Batch commands work in two phases: the full list of trace files is
//! collected first, then each file is processed on its own. A failing file
//! is logged and counted; it never stops the rest of the batch.

use super::models::BatchReport;
use crate::utils::config::TRACE_FILE_NAME;
use anyhow::{Context, Result};
use colored::*;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect every trace file below `root`, sorted by path
///
/// **Public** - first phase of every batch command
///
/// # Errors
/// * `root` is not a readable directory
pub fn discover_trace_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory {}", root.display()))?;
        if entry.file_type().is_file() && entry.file_name() == TRACE_FILE_NAME {
            debug!("Found {}", entry.path().display());
            found.push(entry.into_path());
        }
    }

    found.sort();
    info!("Found {} trace files below {}", found.len(), root.display());
    Ok(found)
}

/// Apply `process` to every file, isolating failures
///
/// **Public** - second phase of every batch command
///
/// `process` returns a short description of what it did, printed next to
/// the file name.
pub fn run_batch<F>(files: &[PathBuf], mut process: F) -> BatchReport
where
    F: FnMut(&Path) -> Result<String>,
{
    let mut report = BatchReport::default();

    for path in files {
        match process(path) {
            Ok(message) => {
                report.processed += 1;
                println!("{} {}: {}", "✓".green(), path.display(), message);
            }
            Err(e) => {
                report.failed += 1;
                error!("{}: {:#}", path.display(), e);
                println!("{} {}", "✗".red(), path.display());
            }
        }
    }

    report
}

/// Turn a batch report into the command's result
///
/// **Public** - every batch command ends here
pub fn finish_batch(report: BatchReport) -> Result<BatchReport> {
    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} trace files failed",
            report.failed,
            report.total()
        );
    }

    info!("Processed {} trace files", report.processed);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_nested_traces() {
        let dir = tempdir().unwrap();
        for run in ["hd_v210/001", "hd_v210/002", "sd_yuv/001"] {
            let run_dir = dir.path().join(run);
            fs::create_dir_all(&run_dir).unwrap();
            fs::write(run_dir.join(TRACE_FILE_NAME), b"").unwrap();
            fs::write(run_dir.join("trace.svg"), b"").unwrap();
        }

        let files = discover_trace_files(dir.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("hd_v210/001/trace.fbt"));
        assert!(files[2].ends_with("sd_yuv/001/trace.fbt"));
    }

    #[test]
    fn test_discover_skips_directory_named_like_trace() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(TRACE_FILE_NAME).join("001")).unwrap();
        fs::write(
            dir.path().join(TRACE_FILE_NAME).join("001").join(TRACE_FILE_NAME),
            b"",
        )
        .unwrap();

        let files = discover_trace_files(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("trace.fbt/001/trace.fbt"));
    }

    #[test]
    fn test_discover_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(TRACE_FILE_NAME);
        fs::write(&file, b"").unwrap();

        assert!(discover_trace_files(&file).is_err());
    }

    #[test]
    fn test_batch_counts_failures() {
        let files = vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")];

        let report = run_batch(&files, |path| {
            if path == Path::new("b") {
                anyhow::bail!("broken")
            }
            Ok("ok".to_string())
        });

        assert_eq!(report, BatchReport { processed: 2, failed: 1 });
        assert!(finish_batch(report).is_err());
    }
}
