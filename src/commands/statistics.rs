//! Batch commands that derive or repair session statistics in place.

use super::discover::{discover_trace_files, finish_batch, run_batch};
use super::models::{BatchArgs, BatchReport};
use crate::aggregator::{compute_or_validate_avg_ms_per_frame, fix_throughput_units, AvgFrameTimeOutcome};
use crate::output::{read_session, write_session};
use anyhow::{Context, Result};
use std::path::Path;

/// Add the average frame time to every trace below a folder
///
/// **Public** - traces that already carry a matching value are left untouched
///
/// # Errors
/// * Folder cannot be searched
/// * One or more traces failed (reported after all were attempted)
pub fn execute_add_ms_per_frame(args: BatchArgs) -> Result<BatchReport> {
    let files = discover_trace_files(&args.folder)?;
    let report = run_batch(&files, add_ms_per_frame);
    finish_batch(report)
}

/// Convert the throughput of every trace below a folder to megabytes/s
///
/// **Public** - run once per folder; a second run scales the figures again
///
/// # Errors
/// * Folder cannot be searched
/// * One or more traces failed (reported after all were attempted)
pub fn execute_fix_throughput(args: BatchArgs) -> Result<BatchReport> {
    let files = discover_trace_files(&args.folder)?;
    let report = run_batch(&files, fix_throughput);
    finish_batch(report)
}

fn add_ms_per_frame(path: &Path) -> Result<String> {
    let mut session = read_session(path).context("Failed to read trace")?;

    match compute_or_validate_avg_ms_per_frame(&mut session)? {
        AvgFrameTimeOutcome::Added(value) => {
            write_session(&session, path).context("Failed to write trace")?;
            Ok(format!("added {:.5} ms/frame", value))
        }
        AvgFrameTimeOutcome::Verified { stored, .. } => {
            Ok(format!("verified {:.5} ms/frame", stored))
        }
    }
}

fn fix_throughput(path: &Path) -> Result<String> {
    let mut session = read_session(path).context("Failed to read trace")?;
    let fix = fix_throughput_units(&mut session)?;
    write_session(&session, path).context("Failed to write trace")?;

    Ok(format!("{:.2} MiB/s -> {:.2} MB/s", fix.before, fix.after))
}
