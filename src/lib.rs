//! Frame Trace Studio
//!
//! Analysis and timeline diagrams for the per-frame stage timings captured
//! by a frame processing benchmark.
//!
//! This crate provides the core implementation for the
//! `fbt-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! fbt-trace inspect -f results/hd_v210/001/trace.fbt
//! fbt-trace render -i results/hd_v210/001/trace.fbt -o trace.svg -f 100 -n 5
//! fbt-trace summary -i results -o report
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod timeline;
pub mod utils;
