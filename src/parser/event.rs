//! Event type codes and timing domains.
//!
//! The capture harness numbers its stage execution states starting at 1.
//! Codes we do not know are kept verbatim so a load/save cycle never loses data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of timestamp recorded in an event trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum EventType {
    ExecuteBegin,
    InputTokenAvailable,
    OutputTokenAvailable,
    /// CPU-side begin of the stage's task
    TaskBegin,
    /// CPU-side end of the stage's task
    TaskEnd,
    ExecuteEnd,
    /// GPU timer query begin
    GlTaskBegin,
    /// GPU timer query end
    GlTaskEnd,
    Unknown(i32),
}

impl EventType {
    pub fn code(self) -> i32 {
        match self {
            EventType::ExecuteBegin => 1,
            EventType::InputTokenAvailable => 2,
            EventType::OutputTokenAvailable => 3,
            EventType::TaskBegin => 4,
            EventType::TaskEnd => 5,
            EventType::ExecuteEnd => 6,
            EventType::GlTaskBegin => 7,
            EventType::GlTaskEnd => 8,
            EventType::Unknown(code) => code,
        }
    }

    /// The end event that closes this begin event, if it opens a measured pair
    pub fn paired_end(self) -> Option<EventType> {
        match self {
            EventType::ExecuteBegin => Some(EventType::ExecuteEnd),
            EventType::TaskBegin => Some(EventType::TaskEnd),
            EventType::GlTaskBegin => Some(EventType::GlTaskEnd),
            _ => None,
        }
    }
}

impl From<i32> for EventType {
    fn from(code: i32) -> Self {
        match code {
            1 => EventType::ExecuteBegin,
            2 => EventType::InputTokenAvailable,
            3 => EventType::OutputTokenAvailable,
            4 => EventType::TaskBegin,
            5 => EventType::TaskEnd,
            6 => EventType::ExecuteEnd,
            7 => EventType::GlTaskBegin,
            8 => EventType::GlTaskEnd,
            other => EventType::Unknown(other),
        }
    }
}

impl From<EventType> for i32 {
    fn from(event: EventType) -> Self {
        event.code()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::ExecuteBegin => write!(f, "EXECUTE_BEGIN"),
            EventType::InputTokenAvailable => write!(f, "INPUT_TOKEN_AVAILABLE"),
            EventType::OutputTokenAvailable => write!(f, "OUTPUT_TOKEN_AVAILABLE"),
            EventType::TaskBegin => write!(f, "TASK_BEGIN"),
            EventType::TaskEnd => write!(f, "TASK_END"),
            EventType::ExecuteEnd => write!(f, "EXECUTE_END"),
            EventType::GlTaskBegin => write!(f, "GL_TASK_BEGIN"),
            EventType::GlTaskEnd => write!(f, "GL_TASK_END"),
            EventType::Unknown(code) => write!(f, "UNKNOWN({})", code),
        }
    }
}

/// Which clock a timeline is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingDomain {
    #[default]
    Cpu,
    Gpu,
}

impl TimingDomain {
    pub fn begin_event(self) -> EventType {
        match self {
            TimingDomain::Cpu => EventType::TaskBegin,
            TimingDomain::Gpu => EventType::GlTaskBegin,
        }
    }

    pub fn end_event(self) -> EventType {
        match self {
            TimingDomain::Cpu => EventType::TaskEnd,
            TimingDomain::Gpu => EventType::GlTaskEnd,
        }
    }

    /// Human-readable timer name used in axis labels
    pub fn label(self) -> &'static str {
        match self {
            TimingDomain::Cpu => "CPU time",
            TimingDomain::Gpu => "GPU time",
        }
    }
}
