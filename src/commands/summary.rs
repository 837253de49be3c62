//! Summary command implementation.

use super::discover::{discover_trace_files, finish_batch, run_batch};
use super::models::{BatchReport, SummaryArgs};
use crate::aggregator::{build_summary_row, unique_key_for, SummaryRow};
use crate::output::{read_session, write_summary_table};
use crate::utils::config::SUMMARY_FILE_NAME;
use anyhow::{Context, Result};
use colored::*;

/// Execute the summary command
///
/// **Public** - main entry point called from main.rs
///
/// Writes one row per readable trace. Traces that fail are left out of the
/// table, and the command reports their count after the table is written.
///
/// # Errors
/// * Input folder cannot be searched
/// * Summary table cannot be written
/// * One or more traces failed
pub fn execute_summary(args: SummaryArgs) -> Result<BatchReport> {
    let files = discover_trace_files(&args.input_folder)?;

    let mut rows: Vec<SummaryRow> = Vec::with_capacity(files.len());
    let report = run_batch(&files, |path| {
        let session = read_session(path).context("Failed to read trace")?;
        let row = build_summary_row(&session, unique_key_for(path))?;
        let message = format!("{} ({})", row.unique_key, row.gl_renderer);
        rows.push(row);
        Ok(message)
    });

    let output = args.output_folder.join(SUMMARY_FILE_NAME);
    write_summary_table(&rows, &output)
        .with_context(|| format!("Failed to write summary table {}", output.display()))?;

    println!(
        "{} Summary of {} traces written to {}",
        "✓".green(),
        rows.len(),
        output.display().to_string().cyan()
    );

    finish_batch(report)
}
