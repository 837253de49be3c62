//! Analysis passes over loaded trace sessions.
//!
//! This module transforms trace sessions into:
//! - Derived or repaired session statistics
//! - Recomputed per-stage delta statistics
//! - Merged presentation stages
//! - Summary table rows

pub mod delta;
pub mod merge;
pub mod statistics;
pub mod summary;

// Re-export main types and functions
pub use delta::compute_delta_statistic;
pub use merge::{default_merge_groups, merge_stages, MergeGroup};
pub use statistics::{
    compute_avg_ms_per_frame, compute_or_validate_avg_ms_per_frame, fix_throughput_units,
    AvgFrameTimeOutcome, ThroughputFix,
};
pub use summary::{build_summary_row, unique_key_for, SummaryRow};
