//! Trace session model and validation.
//!
//! This module handles:
//! - Event type codes and timing domains
//! - The trace session schema
//! - Structural validation after loading

pub mod event;
pub mod schema;
pub mod validate;

// Re-export main types
pub use event::{EventType, TimingDomain};
pub use schema::{
    DeltaStatistic, EventTrace, NameOverride, OpenGlInfo, SessionStatistic, StageTrace,
    TraceSession,
};
pub use validate::validate_session;
