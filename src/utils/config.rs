//! Configuration and constants for the CLI.

/// File name the benchmark harness writes into every run folder
pub const TRACE_FILE_NAME: &str = "trace.fbt";

/// File name of the table written by the summary command
pub const SUMMARY_FILE_NAME: &str = "summary.csv";

/// Pipeline entry/exit marker stages hidden from timeline diagrams
pub const DEFAULT_EXCLUDED_STAGES: &[&str] = &["FrameInput", "FrameOutput"];

/// Tolerance when checking a recomputed ms/frame against the stored one
pub const AVG_MS_PER_FRAME_EPSILON: f64 = 0.00001;

// Throughput was once recorded in mebibytes; these convert it to megabytes
pub const BYTES_PER_MEBIBYTE: f64 = 1024.0 * 1024.0;
pub const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Stages the summary table reports medians for: (pipeline position, expected name)
pub const SUMMARY_STAGE_COLUMNS: &[(usize, &str)] = &[
    (4, "ConvertFormat"),
    (5, "Render"),
    (6, "ConvertFormat"),
];

/// Merge groups applied when none are given: (name, first stage, end stage exclusive)
pub const DEFAULT_MERGE_GROUPS: &[(&str, usize, usize)] = &[
    ("Acquire", 1, 2),
    ("Upload", 2, 4),
    ("Render", 4, 7),
    ("Download", 7, 9),
    ("Deliver", 9, 11),
];
