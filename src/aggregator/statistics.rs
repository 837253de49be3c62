//! Derive and repair session-level statistics.
//!
//! The average frame time is recomputed from the raw CPU timestamps of the
//! first and last pipeline stages. The throughput fixup converts figures that
//! were recorded in mebibytes per second into megabytes per second.

use crate::parser::event::EventType;
use crate::parser::schema::{EventTrace, SessionStatistic, StageTrace, TraceSession};
use crate::utils::config::{AVG_MS_PER_FRAME_EPSILON, BYTES_PER_MEBIBYTE, BYTES_PER_MEGABYTE};
use crate::utils::error::AnalysisError;
use crate::utils::units::ns_to_ms;
use log::{debug, info};

/// Result of [`compute_or_validate_avg_ms_per_frame`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvgFrameTimeOutcome {
    /// No value was stored; the computed one was added
    Added(f64),
    /// A stored value exists and agrees with the recomputed one
    Verified { computed: f64, stored: f64 },
}

/// Result of [`fix_throughput_units`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputFix {
    pub before: f64,
    pub after: f64,
}

/// Compute the average milliseconds per frame from raw timestamps
///
/// **Public** - pure computation, never touches the session
///
/// The first stage's CPU-begin sequence holds one extra entry recorded while
/// the benchmark shuts down, which is why the in-point is one further back
/// than the processed-frame count alone would put it.
///
/// # Errors
/// * `AnalysisError::MissingField` - No session statistic, no stages, or no CPU-begin trace
/// * `AnalysisError::InsufficientSamples` - Fewer begin events than processed frames + 1
pub fn compute_avg_ms_per_frame(session: &TraceSession) -> Result<f64, AnalysisError> {
    let stat = require_statistic(session)?;
    let frames = stat.number_of_frames_processed;

    let first_stage = session
        .stage_traces
        .first()
        .ok_or_else(|| AnalysisError::MissingField("stage_traces".to_string()))?;
    let last_stage = session
        .stage_traces
        .last()
        .ok_or_else(|| AnalysisError::MissingField("stage_traces".to_string()))?;

    let begin_trace = cpu_begin_trace(first_stage)?;
    let available = begin_trace.len();

    if frames == 0 || frames >= available as u64 {
        return Err(AnalysisError::InsufficientSamples { available, frames });
    }

    let in_point = available - frames as usize - 1;
    debug!("In point: {}", in_point);

    let start_ms = ns_to_ms(begin_trace.trace_times_ns[in_point]);

    let last_begin_trace = cpu_begin_trace(last_stage)?;
    let end_ns = *last_begin_trace
        .trace_times_ns
        .last()
        .ok_or(AnalysisError::InsufficientSamples {
            available: 0,
            frames,
        })?;
    let end_ms = ns_to_ms(end_ns);

    Ok((end_ms - start_ms) / frames as f64)
}

/// Add the average frame time to a session, or check the one already stored
///
/// **Public** - safe to run repeatedly on the same session
///
/// # Errors
/// * Everything [`compute_avg_ms_per_frame`] returns
/// * `AnalysisError::StatisticMismatch` - Stored value differs by 1e-5 ms or more
pub fn compute_or_validate_avg_ms_per_frame(
    session: &mut TraceSession,
) -> Result<AvgFrameTimeOutcome, AnalysisError> {
    let computed = compute_avg_ms_per_frame(session)?;

    let stat = session
        .session_statistic
        .as_mut()
        .ok_or_else(|| AnalysisError::MissingField("session_statistic".to_string()))?;

    match stat.avg_millisecs_per_frame {
        Some(stored) => {
            if (computed - stored).abs() < AVG_MS_PER_FRAME_EPSILON {
                debug!("Already exists, sanity check OK, not overwriting.");
                Ok(AvgFrameTimeOutcome::Verified { computed, stored })
            } else {
                Err(AnalysisError::StatisticMismatch { computed, stored })
            }
        }
        None => {
            info!("Adding '{}' as msec_per_frame", computed);
            stat.avg_millisecs_per_frame = Some(computed);
            Ok(AvgFrameTimeOutcome::Added(computed))
        }
    }
}

/// Reinterpret a throughput recorded in mebibytes/s as megabytes/s
///
/// **Public** - one-shot repair
///
/// Not idempotent: running it twice scales the figure twice. Callers must
/// know whether a trace has already been fixed.
///
/// # Errors
/// * `AnalysisError::MissingField` - No session statistic or no throughput figure
pub fn fix_throughput_units(session: &mut TraceSession) -> Result<ThroughputFix, AnalysisError> {
    let stat = session
        .session_statistic
        .as_mut()
        .ok_or_else(|| AnalysisError::MissingField("session_statistic".to_string()))?;

    let before = stat.avg_throughput_mb_per_sec.ok_or_else(|| {
        AnalysisError::MissingField("session_statistic.avg_throughput_mb_per_sec".to_string())
    })?;
    let after = before * BYTES_PER_MEBIBYTE / BYTES_PER_MEGABYTE;

    stat.avg_throughput_mb_per_sec = Some(after);

    info!("Mebibytes/sec {} -> Megabytes/sec {}", before, after);

    Ok(ThroughputFix { before, after })
}

fn require_statistic(session: &TraceSession) -> Result<&SessionStatistic, AnalysisError> {
    session
        .session_statistic
        .as_ref()
        .ok_or_else(|| AnalysisError::MissingField("session_statistic".to_string()))
}

fn cpu_begin_trace(stage: &StageTrace) -> Result<&EventTrace, AnalysisError> {
    stage.event_trace(EventType::TaskBegin).ok_or_else(|| {
        AnalysisError::MissingField(format!(
            "stage '{}': {} event trace",
            stage.name,
            EventType::TaskBegin
        ))
    })
}
