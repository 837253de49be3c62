//! Timeline diagrams of per-frame stage activity.
//!
//! This module handles:
//! - Selecting and widening the visible frame window
//! - Laying out one lane of bars per stage
//! - Drawing the layout through a [`Canvas`] backend

pub mod canvas;
pub mod config;
pub mod layout;
pub mod render;
pub mod svg_canvas;

// Re-export main types and functions
pub use canvas::Canvas;
pub use config::{load_render_config, RenderConfig, Rgb};
pub use layout::{compute_layout, BarTag, DrawWindow, FrameBar, LayoutOptions, StageLane, TimelineLayout};
pub use render::{page_size, render_timeline, render_timeline_svg};
pub use svg_canvas::SvgCanvas;
