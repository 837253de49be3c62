//! Collapse fine-grained pipeline stages into coarse presentation groups.
//!
//! A merged stage begins where its first source stage begins and ends where
//! its last source stage ends. Its delta statistics are taken over from the
//! first source stage unchanged, so the median shown for a merged stage is
//! that sub-stage's median rather than an end-to-end figure.

use crate::parser::event::EventType;
use crate::parser::schema::{EventTrace, StageTrace, TraceSession};
use crate::utils::config::DEFAULT_MERGE_GROUPS;
use crate::utils::error::AnalysisError;
use log::{debug, info};
use std::ops::Range;
use std::str::FromStr;

/// One output stage and the source stage indices it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    pub name: String,
    /// Source stage indices, end exclusive
    pub stages: Range<usize>,
}

impl MergeGroup {
    pub fn new(name: impl Into<String>, stages: Range<usize>) -> Self {
        Self {
            name: name.into(),
            stages,
        }
    }
}

/// Parses `Name=start..end`
impl FromStr for MergeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, range) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=START..END, got '{}'", s))?;
        let (start, end) = range
            .split_once("..")
            .ok_or_else(|| format!("expected START..END, got '{}'", range))?;

        let start = start
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid range start '{}': {}", start, e))?;
        let end = end
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid range end '{}': {}", end, e))?;

        let name = name.trim();
        if name.is_empty() {
            return Err("merge group name cannot be empty".to_string());
        }

        Ok(MergeGroup::new(name, start..end))
    }
}

/// The grouping used for the standard upload/render/download pipeline
pub fn default_merge_groups() -> Vec<MergeGroup> {
    DEFAULT_MERGE_GROUPS
        .iter()
        .map(|(name, start, end)| MergeGroup::new(*name, *start..*end))
        .collect()
}

/// Replace a session's stages with one merged stage per group
///
/// **Public** - main entry point for stage merging
///
/// All groups are built before the session is touched, so on error the
/// session keeps its original stages.
///
/// # Errors
/// * `AnalysisError::InvalidRange` - A group's range is empty or out of bounds
/// * `AnalysisError::MissingField` - A source stage lacks a required event trace
pub fn merge_stages(session: &mut TraceSession, groups: &[MergeGroup]) -> Result<(), AnalysisError> {
    let merged = groups
        .iter()
        .map(|group| merge_group(&session.stage_traces, group))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Replacing {} stages with {} merged stages",
        session.stage_traces.len(),
        merged.len()
    );
    session.stage_traces = merged;

    Ok(())
}

fn merge_group(stages: &[StageTrace], group: &MergeGroup) -> Result<StageTrace, AnalysisError> {
    let range = &group.stages;
    if range.start >= range.end || range.end > stages.len() {
        return Err(AnalysisError::InvalidRange {
            start: range.start,
            end: range.end,
            stage_count: stages.len(),
        });
    }

    let sources = &stages[range.clone()];
    let first = &sources[0];
    let last = &sources[sources.len() - 1];

    info!("Merging into {}", group.name);
    for source in sources {
        debug!("    {}", source.name);
    }

    let mut merged = StageTrace::new(group.name.clone());
    merged
        .event_traces
        .push(copy_event_trace(first, EventType::TaskBegin)?);
    merged
        .event_traces
        .push(copy_event_trace(last, EventType::TaskEnd)?);

    if first.event_trace(EventType::GlTaskBegin).is_some() {
        merged
            .event_traces
            .push(copy_event_trace(first, EventType::GlTaskBegin)?);
        merged
            .event_traces
            .push(copy_event_trace(last, EventType::GlTaskEnd)?);
    }

    merged.delta_statistics = first.delta_statistics.clone();

    Ok(merged)
}

fn copy_event_trace(stage: &StageTrace, event_type: EventType) -> Result<EventTrace, AnalysisError> {
    stage.event_trace(event_type).cloned().ok_or_else(|| {
        AnalysisError::MissingField(format!("stage '{}': {} event trace", stage.name, event_type))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merge_group() {
        let group: MergeGroup = "Upload=2..4".parse().unwrap();
        assert_eq!(group, MergeGroup::new("Upload", 2..4));
    }

    #[test]
    fn test_parse_merge_group_rejects_garbage() {
        assert!("Upload".parse::<MergeGroup>().is_err());
        assert!("Upload=2-4".parse::<MergeGroup>().is_err());
        assert!("=2..4".parse::<MergeGroup>().is_err());
        assert!("Upload=a..4".parse::<MergeGroup>().is_err());
    }

    #[test]
    fn test_default_groups_cover_standard_pipeline() {
        let groups = default_merge_groups();
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[0], MergeGroup::new("Acquire", 1..2));
        assert_eq!(groups[4], MergeGroup::new("Deliver", 9..11));
    }

    #[test]
    fn test_invalid_range_leaves_session_untouched() {
        let mut session = TraceSession {
            name: "test".to_string(),
            local_time: None,
            opengl_info: Default::default(),
            session_statistic: None,
            stage_traces: vec![StageTrace::new("A"), StageTrace::new("B")],
        };
        let original = session.clone();

        let result = merge_stages(&mut session, &[MergeGroup::new("X", 1..3)]);

        assert!(matches!(
            result,
            Err(AnalysisError::InvalidRange { start: 1, end: 3, stage_count: 2 })
        ));
        assert_eq!(session, original);
    }
}
