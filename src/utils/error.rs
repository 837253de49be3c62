//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::parser::event::EventType;
use thiserror::Error;

/// Errors that can occur while loading or saving a trace file
#[derive(Error, Debug)]
pub enum TraceFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt trace: {0}")]
    CorruptTrace(String),

    #[error("Invalid trace path: {0}")]
    InvalidPath(String),
}

/// Errors raised by statistics derivation and stage merging
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Statistic mismatch: computed '{computed}' but found '{stored}'")]
    StatisticMismatch { computed: f64, stored: f64 },

    #[error("Not enough samples: {available} begin events for {frames} processed frames")]
    InsufficientSamples { available: usize, frames: u64 },

    #[error("Invalid stage range {start}..{end} for {stage_count} stages")]
    InvalidRange {
        start: usize,
        end: usize,
        stage_count: usize,
    },
}

/// Errors that can occur during timeline layout and rendering
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("No stages left to draw after filtering")]
    EmptyTimeline,

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Stage '{stage}' has no delta statistic for {begin} -> {end}")]
    MissingDeltaStatistic {
        stage: String,
        begin: EventType,
        end: EventType,
    },

    #[error("Invalid frame window: {0}")]
    InvalidWindow(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a render configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
