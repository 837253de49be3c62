//! Trace file store.
//!
//! A trace file is a gzip stream wrapping the JSON rendition of a
//! [`TraceSession`]. Saving always overwrites the whole target file.
//!
//! This is not the capture harness's wire format: the harness writes a
//! gzip-wrapped protobuf record, which these functions cannot read.
//! Captures must be converted to the JSON layout before analysis.

use super::validate_path;
use crate::parser::schema::TraceSession;
use crate::parser::validate::validate_session;
use crate::utils::error::TraceFileError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Read a trace session from a gzip-compressed trace file
///
/// **Public** - main entry point for every analysis tool
///
/// # Arguments
/// * `input_path` - Path to the `.fbt` file
///
/// # Returns
/// The session, with paired event sequences checked for equal length
///
/// # Errors
/// * `TraceFileError::Io` - File cannot be opened
/// * `TraceFileError::CorruptTrace` - Decompression, deserialization or pairing check failed
pub fn read_session(input_path: impl AsRef<Path>) -> Result<TraceSession, TraceFileError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path)?;

    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut raw = Vec::new();
    decoder
        .read_to_end(&mut raw)
        .map_err(|e| TraceFileError::CorruptTrace(format!("decompression failed: {}", e)))?;

    let session: TraceSession = serde_json::from_slice(&raw)
        .map_err(|e| TraceFileError::CorruptTrace(format!("deserialization failed: {}", e)))?;

    validate_session(&session)?;

    debug!(
        "Trace loaded: session '{}', {} stages",
        session.name,
        session.stage_traces.len()
    );

    Ok(session)
}

/// Write a trace session to a gzip-compressed trace file
///
/// **Public** - used by tools that rewrite traces
///
/// # Arguments
/// * `session` - Session to persist
/// * `output_path` - Target file, overwritten completely
///
/// # Errors
/// * `TraceFileError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `TraceFileError::Io` - I/O error during write
/// * `TraceFileError::CorruptTrace` - Session cannot be serialized
pub fn write_session(
    session: &TraceSession,
    output_path: impl AsRef<Path>,
) -> Result<(), TraceFileError> {
    let output_path = output_path.as_ref();

    info!("Writing trace to: {}", output_path.display());

    validate_path(output_path).map_err(|e| TraceFileError::InvalidPath(e.to_string()))?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                TraceFileError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let payload = serde_json::to_vec(session)
        .map_err(|e| TraceFileError::CorruptTrace(format!("serialization failed: {}", e)))?;

    let file = File::create(output_path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    encoder.write_all(&payload)?;
    encoder.finish()?.flush()?;

    debug!(
        "Trace written ({} bytes uncompressed)",
        payload.len()
    );

    Ok(())
}
