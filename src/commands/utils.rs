use crate::aggregator::compute_delta_statistic;
use crate::output::read_session;
use crate::utils::config::TRACE_FILE_NAME;
use crate::utils::units::{ns_to_ms, ns_to_us};
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

/// Print an overview of a trace file
///
/// Lists the session statistic, every stage with its event sequence lengths,
/// and each stored median next to the one recomputed from the raw timestamps.
pub fn inspect_trace(file_path: &Path) -> Result<()> {
    let session = read_session(file_path)
        .with_context(|| format!("Failed to read trace {}", file_path.display()))?;

    println!("{} {}", "✓ Valid trace:".green(), file_path.display());
    println!("  Session:  {}", session.name.bold());
    if let Some(local_time) = &session.local_time {
        println!("  Captured: {}", local_time);
    }
    println!(
        "  Renderer: {} ({}, {})",
        session.opengl_info.renderer, session.opengl_info.vendor, session.opengl_info.version
    );

    match &session.session_statistic {
        Some(stat) => {
            println!("  Frames processed: {}", stat.number_of_frames_processed);
            println!("  Avg. frame time:  {}", optional(stat.avg_millisecs_per_frame, "ms"));
            println!("  Avg. throughput:  {}", optional(stat.avg_throughput_mb_per_sec, "MB/s"));
            println!(
                "  Median latency:   {}",
                optional(stat.med_frame_processing_time_per_frame_ns.map(ns_to_ms), "ms")
            );
        }
        None => println!("  {}", "No session statistic".yellow()),
    }

    println!();
    println!("  Stages: {}", session.stage_traces.len());

    for (index, stage) in session.stage_traces.iter().enumerate() {
        let events: Vec<String> = stage
            .event_traces
            .iter()
            .map(|trace| format!("{}x{}", trace.event_type, trace.len()))
            .collect();
        println!("  {:>2}. {:<20} {}", index, stage.name.bold(), events.join(" "));

        for stored in &stage.delta_statistics {
            let recomputed = compute_delta_statistic(stage, stored.begin_event, stored.end_event)
                .map(|stat| format!("{:.1} μs", ns_to_us(stat.median_ns)))
                .unwrap_or_else(|_| "n/a".to_string());
            println!(
                "        {} -> {}: median {:.1} μs (recomputed {})",
                stored.begin_event,
                stored.end_event,
                ns_to_us(stored.median_ns),
                recomputed.dimmed()
            );
        }
    }

    Ok(())
}

fn optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.2} {}", value, unit),
        None => "n/a".to_string(),
    }
}

/// Display version information
pub fn display_version() {
    println!("Frame Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Trace file: gzip-compressed JSON ({})", TRACE_FILE_NAME);
    println!("Note: protobuf captures written by the benchmark harness are not read directly.");
    println!();
    println!("Analysis and timeline diagrams for frame benchmark traces.");
}
