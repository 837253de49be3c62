//! Merge command implementation.

use super::models::MergeArgs;
use crate::aggregator::{default_merge_groups, merge_stages};
use crate::output::{read_session, write_session};
use anyhow::{Context, Result};
use colored::*;
use log::info;

/// Execute the merge command
///
/// **Public** - main entry point called from main.rs
///
/// Reads one trace, collapses its stages and writes the result to a new
/// file. The input is never modified.
///
/// # Errors
/// * Unreadable or corrupt trace file
/// * A group range outside the trace's stages
/// * File write errors
pub fn execute_merge(args: MergeArgs) -> Result<()> {
    let groups = if args.groups.is_empty() {
        info!("No groups given, using the standard grouping");
        default_merge_groups()
    } else {
        args.groups
    };

    let mut session = read_session(&args.input)
        .with_context(|| format!("Failed to read trace {}", args.input.display()))?;

    let before = session.stage_traces.len();
    merge_stages(&mut session, &groups).context("Failed to merge stages")?;

    write_session(&session, &args.output)
        .with_context(|| format!("Failed to write trace {}", args.output.display()))?;

    let names: Vec<&str> = session.stage_traces.iter().map(|s| s.name.as_str()).collect();
    println!(
        "{} Merged {} stages into {} ({}) -> {}",
        "✓".green(),
        before,
        names.len(),
        names.join(", "),
        args.output.display().to_string().cyan()
    );

    Ok(())
}
