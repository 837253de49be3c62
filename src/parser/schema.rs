//! Trace session schema.
//!
//! This module defines the structure of the trace records the benchmark
//! harness writes and the analysis tools read and rewrite.

use super::event::EventType;
use serde::{Deserialize, Serialize};

/// One capture of timing data from a single benchmark run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSession {
    /// Session (configuration) name given to the benchmark run
    pub name: String,

    /// Local wall-clock time the capture started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,

    /// Device and driver information
    #[serde(default)]
    pub opengl_info: OpenGlInfo,

    /// Summary figures for the whole run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_statistic: Option<SessionStatistic>,

    /// Stages in pipeline order, source to sink
    #[serde(default)]
    pub stage_traces: Vec<StageTrace>,
}

impl TraceSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenGlInfo {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub renderer: String,
    #[serde(default)]
    pub version: String,
}

/// Summary statistics for a whole session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistic {
    /// Frames counted as processed (excludes warm-up calls)
    pub number_of_frames_processed: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_millisecs_per_frame: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_throughput_mb_per_sec: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub med_frame_processing_time_per_frame_ns: Option<i64>,
}

/// One pipeline stage and its recorded timestamps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    pub name: String,

    #[serde(default)]
    pub event_traces: Vec<EventTrace>,

    #[serde(default)]
    pub delta_statistics: Vec<DeltaStatistic>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_overrides: Vec<NameOverride>,
}

impl StageTrace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// First event trace of the given type
    pub fn event_trace(&self, event_type: EventType) -> Option<&EventTrace> {
        self.event_traces
            .iter()
            .find(|trace| trace.event_type == event_type)
    }

    /// Delta statistic measured between the given begin/end pair
    pub fn delta_statistic(&self, begin: EventType, end: EventType) -> Option<&DeltaStatistic> {
        self.delta_statistics
            .iter()
            .find(|stat| stat.begin_event == begin && stat.end_event == end)
    }
}

/// Per-frame timestamps for one event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrace {
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// One nanosecond timestamp per frame, warm-up calls first
    #[serde(default)]
    pub trace_times_ns: Vec<i64>,
}

impl EventTrace {
    pub fn new(event_type: EventType, trace_times_ns: Vec<i64>) -> Self {
        Self {
            event_type,
            trace_times_ns,
        }
    }

    pub fn len(&self) -> usize {
        self.trace_times_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace_times_ns.is_empty()
    }
}

/// Precomputed duration statistic between two events of a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaStatistic {
    pub begin_event: EventType,
    pub end_event: EventType,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub median_ns: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_ns: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_ns: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_ns: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_deviation_ns: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_samples: Option<u64>,
}

impl DeltaStatistic {
    /// A statistic carrying only the median, as most fixtures and old captures do
    pub fn with_median(begin_event: EventType, end_event: EventType, median_ns: i64) -> Self {
        Self {
            begin_event,
            end_event,
            name: String::new(),
            median_ns,
            average_ns: None,
            minimum_ns: None,
            maximum_ns: None,
            std_deviation_ns: None,
            num_samples: None,
        }
    }
}

/// Display name override for one event type of a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameOverride {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_deserializes() {
        let json = r#"{
            "name": "hd_v210",
            "opengl_info": { "renderer": "Quadro K5000" },
            "stage_traces": [
                {
                    "name": "Upload",
                    "event_traces": [{ "type": 4, "trace_times_ns": [1, 2] }],
                    "delta_statistics": [{ "begin_event": 4, "end_event": 5, "median_ns": 1000 }]
                }
            ]
        }"#;

        let session: TraceSession = serde_json::from_str(json).unwrap();

        assert_eq!(session.opengl_info.renderer, "Quadro K5000");
        assert!(session.session_statistic.is_none());
        let stage = &session.stage_traces[0];
        assert_eq!(stage.event_trace(EventType::TaskBegin).unwrap().len(), 2);
        assert!(stage.event_trace(EventType::TaskEnd).is_none());
        assert_eq!(
            stage
                .delta_statistic(EventType::TaskBegin, EventType::TaskEnd)
                .unwrap()
                .median_ns,
            1000
        );
    }

    #[test]
    fn test_optional_statistic_fields_are_omitted() {
        let stat = SessionStatistic {
            number_of_frames_processed: 10,
            ..Default::default()
        };
        let json = serde_json::to_string(&stat).unwrap();
        assert_eq!(json, r#"{"number_of_frames_processed":10}"#);
    }
}
