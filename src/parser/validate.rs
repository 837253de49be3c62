//! Structural validation of freshly loaded trace sessions.
//!
//! Begin and end timestamps of a stage are stored in independent sequences
//! and linked only by index, so paired sequences must have equal length.
//! Softer invariants (monotonic timestamps, processed-frame count) only warn.

use super::schema::{StageTrace, TraceSession};
use crate::utils::error::TraceFileError;
use log::{debug, warn};

/// Validate a session's structural invariants
///
/// **Public** - called by the trace store after every load
///
/// # Errors
/// * `TraceFileError::CorruptTrace` - a paired begin/end sequence differs in length
pub fn validate_session(session: &TraceSession) -> Result<(), TraceFileError> {
    for stage in &session.stage_traces {
        validate_stage_pairs(stage)?;
        warn_on_unordered_timestamps(stage);
    }

    if let Some(stat) = &session.session_statistic {
        let frames = stat.number_of_frames_processed as usize;
        for stage in &session.stage_traces {
            for trace in &stage.event_traces {
                if trace.len() < frames {
                    warn!(
                        "Stage '{}' has {} {} events but {} frames were processed",
                        stage.name,
                        trace.len(),
                        trace.event_type,
                        frames
                    );
                }
            }
        }
    }

    debug!(
        "Validated session '{}' ({} stages)",
        session.name,
        session.stage_traces.len()
    );

    Ok(())
}

fn validate_stage_pairs(stage: &StageTrace) -> Result<(), TraceFileError> {
    for begin_trace in &stage.event_traces {
        let Some(end_trace) = begin_trace
            .event_type
            .paired_end()
            .and_then(|end| stage.event_trace(end))
        else {
            continue;
        };
        if begin_trace.len() != end_trace.len() {
            return Err(TraceFileError::CorruptTrace(format!(
                "stage '{}' has {} {} events but {} {} events",
                stage.name,
                begin_trace.len(),
                begin_trace.event_type,
                end_trace.len(),
                end_trace.event_type
            )));
        }
    }
    Ok(())
}

fn warn_on_unordered_timestamps(stage: &StageTrace) {
    for trace in &stage.event_traces {
        if let Some(index) = trace
            .trace_times_ns
            .windows(2)
            .position(|pair| pair[1] < pair[0])
        {
            warn!(
                "Stage '{}': {} timestamps decrease at frame {}",
                stage.name,
                trace.event_type,
                index + 1
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::event::EventType;
    use crate::parser::schema::EventTrace;

    fn session_with(stage: StageTrace) -> TraceSession {
        TraceSession {
            name: "test".to_string(),
            local_time: None,
            opengl_info: Default::default(),
            session_statistic: None,
            stage_traces: vec![stage],
        }
    }

    #[test]
    fn test_equal_pairs_are_valid() {
        let mut stage = StageTrace::new("Render");
        stage.event_traces = vec![
            EventTrace::new(EventType::TaskBegin, vec![1, 3]),
            EventTrace::new(EventType::TaskEnd, vec![2, 4]),
        ];
        assert!(validate_session(&session_with(stage)).is_ok());
    }

    #[test]
    fn test_mismatched_pair_is_corrupt() {
        let mut stage = StageTrace::new("Render");
        stage.event_traces = vec![
            EventTrace::new(EventType::GlTaskBegin, vec![1, 3, 5]),
            EventTrace::new(EventType::GlTaskEnd, vec![2, 4]),
        ];
        let result = validate_session(&session_with(stage));
        assert!(matches!(result, Err(TraceFileError::CorruptTrace(_))));
    }

    #[test]
    fn test_unpaired_sequences_are_not_compared() {
        let mut stage = StageTrace::new("Render");
        stage.event_traces = vec![
            EventTrace::new(EventType::TaskBegin, vec![1, 3, 5]),
            EventTrace::new(EventType::InputTokenAvailable, vec![2]),
        ];
        assert!(validate_session(&session_with(stage)).is_ok());
    }

    #[test]
    fn test_execute_pair_is_checked() {
        let mut stage = StageTrace::new("Render");
        stage.event_traces = vec![
            EventTrace::new(EventType::ExecuteEnd, vec![2]),
            EventTrace::new(EventType::ExecuteBegin, vec![1, 3]),
        ];
        let result = validate_session(&session_with(stage));
        assert!(matches!(result, Err(TraceFileError::CorruptTrace(_))));
    }
}
