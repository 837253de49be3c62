//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod discover;
pub mod merge;
pub mod models;
pub mod render;
pub mod statistics;
pub mod summary;
pub mod utils;

// Re-export main command functions
pub use discover::discover_trace_files;
pub use merge::execute_merge;
pub use models::{BatchArgs, BatchReport, MergeArgs, RenderArgs, SummaryArgs};
pub use render::{execute_render, validate_args};
pub use statistics::{execute_add_ms_per_frame, execute_fix_throughput};
pub use summary::execute_summary;
pub use utils::{display_version, inspect_trace};
