//! Frame window and pixel geometry for timeline diagrams.
//!
//! Given an in-point frame F and a frame count N, the visible time span runs
//! from the first visible stage's begin of frame F to the last visible
//! stage's end of frame F+N-1. The drawn frame window is widened on both
//! sides so frames that are only partially inside the span still show up
//! as context.
//!
//! The computed [`TimelineLayout`] is an immutable value; the renderer only
//! reads it.

use super::config::RenderConfig;
use crate::parser::event::{EventType, TimingDomain};
use crate::parser::schema::{EventTrace, StageTrace, TraceSession};
use crate::utils::config::DEFAULT_EXCLUDED_STAGES;
use crate::utils::error::TimelineError;
use crate::utils::units::ns_to_ms;
use log::{debug, info};
use std::ops::RangeInclusive;

/// What part of a session to lay out, and how wide
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub domain: TimingDomain,
    /// First highlighted frame
    pub in_point: usize,
    /// Number of highlighted frames
    pub frame_count: usize,
    /// Scale the span to this many points instead of the default scale
    pub target_width_px: Option<f64>,
    /// Stages left out of the diagram by name
    pub excluded_stages: Vec<String>,
}

impl LayoutOptions {
    pub fn new(in_point: usize, frame_count: usize) -> Self {
        Self {
            domain: TimingDomain::Cpu,
            in_point,
            frame_count,
            target_width_px: None,
            excluded_stages: DEFAULT_EXCLUDED_STAGES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    pub fn with_domain(mut self, domain: TimingDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_target_width(mut self, width: Option<f64>) -> Self {
        self.target_width_px = width;
        self
    }

    pub fn with_excluded_stages(mut self, names: Vec<String>) -> Self {
        self.excluded_stages = names;
        self
    }

    /// Index of the last highlighted frame, `None` when it does not fit in `usize`
    fn last_frame(&self) -> Option<usize> {
        self.in_point.checked_add(self.frame_count.checked_sub(1)?)
    }
}

/// Whether `frame` lies in `[in_point, in_point + frame_count)`
fn frame_in_window(frame: usize, in_point: usize, frame_count: usize) -> bool {
    frame
        .checked_sub(in_point)
        .is_some_and(|offset| offset < frame_count)
}

/// How a bar is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTag {
    /// Inside the requested window; colored by `frame % palette size`
    Highlighted { palette_index: usize },
    /// Outside the requested window; flat translucent gray
    Context,
}

/// One frame of one stage
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBar {
    pub frame: usize,
    /// Begin relative to the time origin, after minimum-width padding
    pub begin_ms: f64,
    /// End relative to the time origin, after minimum-width padding
    pub end_ms: f64,
    /// Left edge relative to the canvas
    pub x_px: f64,
    pub width_px: f64,
    /// Whether the bar was widened to the minimum width
    pub padded: bool,
    pub tag: BarTag,
}

impl FrameBar {
    pub fn center_px(&self) -> f64 {
        self.x_px + self.width_px / 2.0
    }
}

/// All bars of one visible stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageLane {
    /// Index into the session's `stage_traces`
    pub stage_index: usize,
    pub name: String,
    /// Top edge of the bars relative to the canvas
    pub top_px: f64,
    pub height_px: f64,
    pub bars: Vec<FrameBar>,
}

impl StageLane {
    pub fn center_y_px(&self) -> f64 {
        self.top_px + self.height_px / 2.0
    }
}

/// Inclusive range of frame indices actually drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawWindow {
    pub first: usize,
    pub last: usize,
}

impl DrawWindow {
    pub fn frames(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    pub fn contains(&self, frame: usize) -> bool {
        self.frames().contains(&frame)
    }
}

/// Complete geometry of a timeline diagram
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub domain: TimingDomain,
    pub in_point: usize,
    pub frame_count: usize,
    /// Begin of frame F on the first visible stage
    pub origin_ms: f64,
    /// End of frame F+N-1 on the last visible stage
    pub end_ms: f64,
    pub time_span_ms: f64,
    /// Zero of the pixel axis, slightly before `origin_ms`
    pub time_origin_ms: f64,
    pub px_per_ms: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub draw_window: DrawWindow,
    /// Bottom lane first: the pipeline source is drawn lowest
    pub lanes: Vec<StageLane>,
}

impl TimelineLayout {
    /// Whether a frame belongs to the requested (highlighted) window
    pub fn is_highlighted(&self, frame: usize) -> bool {
        frame_in_window(frame, self.in_point, self.frame_count)
    }
}

/// Compute the layout of a timeline diagram
///
/// **Public** - main entry point for layout
///
/// # Errors
/// * `TimelineError::EmptyTimeline` - No stage survives exclusion filtering
/// * `TimelineError::MissingField` - A visible stage has no end trace for the domain
/// * `TimelineError::InvalidWindow` - Zero frames, frames beyond the recorded data, or an empty span
pub fn compute_layout(
    session: &TraceSession,
    options: &LayoutOptions,
    config: &RenderConfig,
) -> Result<TimelineLayout, TimelineError> {
    let begin_event = options.domain.begin_event();
    let end_event = options.domain.end_event();

    let visible: Vec<(usize, &StageTrace)> = session
        .stage_traces
        .iter()
        .enumerate()
        .filter(|(_, stage)| !options.excluded_stages.iter().any(|name| *name == stage.name))
        .filter(|(_, stage)| stage.event_trace(begin_event).is_some())
        .collect();

    let (Some((_, first_stage)), Some((_, last_stage))) = (visible.first(), visible.last()) else {
        return Err(TimelineError::EmptyTimeline);
    };

    if options.frame_count == 0 {
        return Err(TimelineError::InvalidWindow(
            "frame count must be greater than 0".to_string(),
        ));
    }
    let last_frame = options.last_frame().ok_or_else(|| {
        TimelineError::InvalidWindow(format!(
            "{} frames from frame {} exceed the frame index range",
            options.frame_count, options.in_point
        ))
    })?;

    let first_begin = require_trace(first_stage, begin_event)?;
    let last_end = require_trace(last_stage, end_event)?;

    for (stage, trace) in [(first_stage, first_begin), (last_stage, last_end)] {
        if last_frame >= trace.len() {
            return Err(TimelineError::InvalidWindow(format!(
                "frames {}..={} requested but stage '{}' recorded {} {} events",
                options.in_point,
                last_frame,
                stage.name,
                trace.len(),
                trace.event_type
            )));
        }
    }

    let origin_ns = first_begin.trace_times_ns[options.in_point];
    let end_ns = last_end.trace_times_ns[last_frame];
    let origin_ms = ns_to_ms(origin_ns);
    let end_ms = ns_to_ms(end_ns);
    let time_span_ms = end_ms - origin_ms;

    if time_span_ms <= 0.0 {
        return Err(TimelineError::InvalidWindow(format!(
            "time span of frames {}..={} is {} ms",
            options.in_point, last_frame, time_span_ms
        )));
    }

    let draw_window = widen_draw_window(first_begin, last_end, options.in_point, last_frame, origin_ns, end_ns);

    let px_per_ms = match options.target_width_px {
        Some(width) => width / time_span_ms,
        None => config.default_px_per_ms,
    };

    let canvas_width = time_span_ms * px_per_ms + config.canvas_padding_right;
    let canvas_height = visible.len() as f64 * config.lane_height();
    let time_origin_ms = origin_ms - config.time_origin_shift_ms;

    debug!(
        "Span {:.3} ms at {:.3} px/ms, draw window {}..={}",
        time_span_ms, px_per_ms, draw_window.first, draw_window.last
    );

    let geometry = BarGeometry {
        time_origin_ms,
        px_per_ms,
        min_width_px: config.min_bar_width,
        in_point: options.in_point,
        frame_count: options.frame_count,
        palette_len: config.palette.len().max(1),
    };

    let lane_count = visible.len();
    let lanes = visible
        .iter()
        .enumerate()
        .map(|(position, (stage_index, stage))| {
            let row = lane_count - 1 - position;
            let begin_trace = require_trace(stage, begin_event)?;
            let end_trace = require_trace(stage, end_event)?;

            Ok(StageLane {
                stage_index: *stage_index,
                name: stage.name.clone(),
                top_px: row as f64 * config.lane_height() + config.stage_padding,
                height_px: config.bar_height,
                bars: layout_bars(stage, begin_trace, end_trace, draw_window, &geometry),
            })
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;

    info!(
        "Laid out {} stages, {:.1} x {:.1} pt canvas",
        lanes.len(),
        canvas_width,
        canvas_height
    );

    Ok(TimelineLayout {
        domain: options.domain,
        in_point: options.in_point,
        frame_count: options.frame_count,
        origin_ms,
        end_ms,
        time_span_ms,
        time_origin_ms,
        px_per_ms,
        canvas_width,
        canvas_height,
        draw_window,
        lanes,
    })
}

/// Widen the requested frame range by partially visible neighbors
///
/// **Private** - step 5 of layout
///
/// Walks back while the last stage's end at that frame is still after the
/// origin, and forward while the first stage's begin of the next frame is
/// still before the end of the span. Never narrower than `[F, F+N-1]`.
fn widen_draw_window(
    first_begin: &EventTrace,
    last_end: &EventTrace,
    in_point: usize,
    last_frame: usize,
    origin_ns: i64,
    end_ns: i64,
) -> DrawWindow {
    let mut first = in_point;
    while first > 0 && last_end.trace_times_ns[first] > origin_ns {
        first -= 1;
    }

    let mut last = last_frame;
    while last + 1 < first_begin.len() && first_begin.trace_times_ns[last + 1] < end_ns {
        last += 1;
    }

    DrawWindow { first, last }
}

/// Scale and coloring shared by every bar of a layout
struct BarGeometry {
    time_origin_ms: f64,
    px_per_ms: f64,
    min_width_px: f64,
    in_point: usize,
    frame_count: usize,
    palette_len: usize,
}

fn layout_bars(
    stage: &StageTrace,
    begin_trace: &EventTrace,
    end_trace: &EventTrace,
    window: DrawWindow,
    geometry: &BarGeometry,
) -> Vec<FrameBar> {
    let available = begin_trace.len().min(end_trace.len());
    if window.last >= available {
        debug!(
            "Stage '{}' has {} frames, skipping frames {}..={}",
            stage.name,
            available,
            available.max(window.first),
            window.last
        );
    }

    window
        .frames()
        .take_while(|frame| *frame < available)
        .map(|frame| {
            let begin_ms = ns_to_ms(begin_trace.trace_times_ns[frame]) - geometry.time_origin_ms;
            let end_ms = ns_to_ms(end_trace.trace_times_ns[frame]) - geometry.time_origin_ms;
            let tag = if frame_in_window(frame, geometry.in_point, geometry.frame_count) {
                BarTag::Highlighted {
                    palette_index: frame % geometry.palette_len,
                }
            } else {
                BarTag::Context
            };
            build_bar(frame, begin_ms, end_ms, tag, geometry)
        })
        .collect()
}

/// Place one bar, widening it to the minimum width around its center
fn build_bar(frame: usize, begin_ms: f64, end_ms: f64, tag: BarTag, geometry: &BarGeometry) -> FrameBar {
    let x_px = begin_ms * geometry.px_per_ms;
    let width_px = (end_ms - begin_ms) * geometry.px_per_ms;

    if width_px >= geometry.min_width_px {
        return FrameBar {
            frame,
            begin_ms,
            end_ms,
            x_px,
            width_px,
            padded: false,
            tag,
        };
    }

    let missing_px = geometry.min_width_px - width_px;
    let padding_ms = missing_px / geometry.px_per_ms;

    FrameBar {
        frame,
        begin_ms: begin_ms - padding_ms / 2.0,
        end_ms: end_ms + padding_ms / 2.0,
        x_px: x_px - missing_px / 2.0,
        width_px: geometry.min_width_px,
        padded: true,
        tag,
    }
}

fn require_trace(stage: &StageTrace, event_type: EventType) -> Result<&EventTrace, TimelineError> {
    stage.event_trace(event_type).ok_or_else(|| {
        TimelineError::MissingField(format!("stage '{}': {} event trace", stage.name, event_type))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> BarGeometry {
        BarGeometry {
            time_origin_ms: 0.0,
            px_per_ms: 10.0,
            min_width_px: 2.0,
            in_point: 0,
            frame_count: 1,
            palette_len: 5,
        }
    }

    #[test]
    fn test_wide_bar_is_untouched() {
        let bar = build_bar(0, 1.0, 2.0, BarTag::Context, &geometry());

        assert!(!bar.padded);
        assert_eq!(bar.x_px, 10.0);
        assert_eq!(bar.width_px, 10.0);
    }

    #[test]
    fn test_narrow_bar_is_padded_around_center() {
        // 0.05 ms at 10 px/ms is 0.5 px wide, centered at 10.25 px
        let bar = build_bar(0, 1.0, 1.05, BarTag::Context, &geometry());

        assert!(bar.padded);
        assert_eq!(bar.width_px, 2.0);
        assert!((bar.center_px() - 10.25).abs() < 1e-9);
        assert!(((bar.end_ms - bar.begin_ms) * 10.0 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_bar_is_padded() {
        let bar = build_bar(3, 5.0, 5.0, BarTag::Context, &geometry());

        assert_eq!(bar.width_px, 2.0);
        assert!((bar.center_px() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_window_contains() {
        let window = DrawWindow { first: 2, last: 5 };
        assert!(window.contains(2));
        assert!(window.contains(5));
        assert!(!window.contains(6));
        assert_eq!(window.frames().count(), 4);
    }

    #[test]
    fn test_last_frame_does_not_overflow() {
        assert_eq!(LayoutOptions::new(5, 3).last_frame(), Some(7));
        assert_eq!(LayoutOptions::new(usize::MAX, 1).last_frame(), Some(usize::MAX));
        assert_eq!(LayoutOptions::new(usize::MAX, 2).last_frame(), None);
        assert_eq!(LayoutOptions::new(0, 0).last_frame(), None);
    }

    #[test]
    fn test_frame_in_window_at_index_limit() {
        assert!(frame_in_window(usize::MAX, usize::MAX - 1, 2));
        assert!(!frame_in_window(usize::MAX - 2, usize::MAX - 1, 2));
        assert!(!frame_in_window(usize::MAX, 0, usize::MAX));
        assert!(frame_in_window(3, 3, 1));
        assert!(!frame_in_window(4, 3, 1));
    }
}
