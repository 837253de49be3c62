//! Readers and writers for everything that touches the disk.
//!
//! This module handles:
//! - Gzip-compressed trace files (load and save)
//! - SVG timeline diagrams
//! - Semicolon-delimited summary tables

pub mod summary_csv;
pub mod svg;
pub mod trace_file;

// Re-export main functions
pub use summary_csv::write_summary_table;
pub use svg::write_svg;
pub use trace_file::{read_session, write_session};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
