//! Draw a computed timeline layout onto a canvas.
//!
//! Page structure, top to bottom: title bar (with the statistics HUD in its
//! top-left corner), the stage diagram with its label column on the left,
//! and the time axis label band.

use super::canvas::{Canvas, Fill, LineCap, Point, Rect, Stroke, TextAnchor, TextStyle};
use super::config::RenderConfig;
use super::layout::{BarTag, TimelineLayout};
use super::svg_canvas::SvgCanvas;
use crate::parser::schema::{DeltaStatistic, SessionStatistic, TraceSession};
use crate::utils::error::TimelineError;
use crate::utils::units::{ns_to_ms, ns_to_us};
use log::{debug, info};

/// Page width and height in points
///
/// **Public** - the document is sized before anything is drawn
pub fn page_size(layout: &TimelineLayout, config: &RenderConfig) -> (f64, f64) {
    let width = layout.canvas_width + config.label_column_width + 2.0 * config.diagram_padding;
    let height = layout.canvas_height + config.time_axis_band_height + config.title_bar_height;
    (width, height)
}

/// Top-left corner of the stage diagram on the page
pub fn diagram_origin(config: &RenderConfig) -> Point {
    Point::new(
        config.label_column_width + config.diagram_padding,
        config.title_bar_height,
    )
}

/// Render a timeline diagram
///
/// **Public** - main entry point for rendering
///
/// # Arguments
/// * `session` - Session the layout was computed from
/// * `layout` - Geometry from [`super::layout::compute_layout`]
/// * `config` - Drawing constants, the same the layout used
/// * `title` - Title override; the session name is used when absent
/// * `canvas` - Drawing surface
///
/// # Errors
/// * `TimelineError::MissingField` - Session has no session statistic
/// * `TimelineError::MissingDeltaStatistic` - A lane has no statistic for the active event pair
///
/// Nothing is drawn when an error is returned.
pub fn render_timeline(
    session: &TraceSession,
    layout: &TimelineLayout,
    config: &RenderConfig,
    title: Option<&str>,
    canvas: &mut dyn Canvas,
) -> Result<(), TimelineError> {
    let stat = session
        .session_statistic
        .as_ref()
        .ok_or_else(|| TimelineError::MissingField("session_statistic".to_string()))?;

    let medians = lane_statistics(session, layout)?;

    let origin = diagram_origin(config);

    draw_grid(layout, config, origin, canvas);
    draw_bars(layout, config, origin, canvas);
    draw_axes(layout, config, origin, canvas);
    draw_labels(layout, config, &medians, canvas);
    draw_axis_label(layout, config, stat, origin, canvas);
    draw_title(session, layout, config, title, origin, canvas);
    draw_hud(session, config, stat, canvas);

    debug!("Rendered {} lanes", layout.lanes.len());
    Ok(())
}

/// Render a timeline diagram to a standalone SVG document
///
/// **Public** - used by the render command
pub fn render_timeline_svg(
    session: &TraceSession,
    layout: &TimelineLayout,
    config: &RenderConfig,
    title: Option<&str>,
) -> Result<String, TimelineError> {
    let (width, height) = page_size(layout, config);
    let mut canvas = SvgCanvas::new(width, height, config.font_family.clone());

    render_timeline(session, layout, config, title, &mut canvas)?;

    let svg = canvas.finish();
    info!("Timeline rendered ({:.1} x {:.1} pt, {} bytes)", width, height, svg.len());
    Ok(svg)
}

/// Look up the delta statistic labelling each lane
fn lane_statistics<'a>(
    session: &'a TraceSession,
    layout: &TimelineLayout,
) -> Result<Vec<&'a DeltaStatistic>, TimelineError> {
    let begin = layout.domain.begin_event();
    let end = layout.domain.end_event();

    layout
        .lanes
        .iter()
        .map(|lane| {
            session
                .stage_traces
                .get(lane.stage_index)
                .and_then(|stage| stage.delta_statistic(begin, end))
                .ok_or_else(|| TimelineError::MissingDeltaStatistic {
                    stage: lane.name.clone(),
                    begin,
                    end,
                })
        })
        .collect()
}

/// Vertical gridlines every millisecond from the time origin
fn draw_grid(layout: &TimelineLayout, config: &RenderConfig, origin: Point, canvas: &mut dyn Canvas) {
    let stroke = Stroke {
        color: config.grid_color,
        width: 1.0,
        cap: LineCap::Square,
    };

    let mut offset_ms = 0.0;
    while offset_ms < layout.time_span_ms {
        let x = origin.x + offset_ms * layout.px_per_ms;
        canvas.line(
            Point::new(x, origin.y),
            Point::new(x, origin.y + layout.canvas_height),
            &stroke,
        );
        offset_ms += 1.0;
    }
}

fn draw_bars(layout: &TimelineLayout, config: &RenderConfig, origin: Point, canvas: &mut dyn Canvas) {
    canvas.push_clip(Rect::new(
        origin.x,
        origin.y,
        layout.canvas_width,
        layout.canvas_height,
    ));

    for lane in &layout.lanes {
        for bar in &lane.bars {
            let fill = match bar.tag {
                BarTag::Highlighted { palette_index } => {
                    Fill::solid(config.palette_color(palette_index))
                }
                BarTag::Context => Fill::translucent(config.context_color, config.context_opacity),
            };
            canvas.rounded_rect(
                Rect::new(
                    origin.x + bar.x_px,
                    origin.y + lane.top_px,
                    bar.width_px,
                    lane.height_px,
                ),
                config.corner_radius,
                &fill,
            );
        }
    }

    canvas.pop_clip();
}

/// Time axis with an arrow head, and the stage axis
fn draw_axes(layout: &TimelineLayout, config: &RenderConfig, origin: Point, canvas: &mut dyn Canvas) {
    let stroke = Stroke {
        color: config.axis_color,
        width: 2.0,
        cap: LineCap::Round,
    };
    let bottom = origin.y + layout.canvas_height;
    let right = origin.x + layout.canvas_width;
    let arrow = config.arrow_length;

    canvas.polyline(
        &[
            Point::new(origin.x, bottom),
            Point::new(right, bottom),
            Point::new(right - arrow, bottom + arrow),
        ],
        &stroke,
    );
    canvas.line(
        Point::new(right, bottom),
        Point::new(right - arrow, bottom - arrow),
        &stroke,
    );
    canvas.line(Point::new(origin.x, bottom), Point::new(origin.x, origin.y), &stroke);
}

/// Stage names and their median durations, right-aligned in the label column
fn draw_labels(
    layout: &TimelineLayout,
    config: &RenderConfig,
    medians: &[&DeltaStatistic],
    canvas: &mut dyn Canvas,
) {
    let text_x = config.diagram_padding + config.label_column_width - config.label_padding;
    let median_style = TextStyle {
        size: config.median_font_size,
        color: config.median_color,
        anchor: TextAnchor::End,
    };
    let name_style = TextStyle {
        size: config.axis_font_size,
        color: config.label_color,
        anchor: TextAnchor::End,
    };

    for (lane, statistic) in layout.lanes.iter().zip(medians) {
        let y = config.title_bar_height + lane.center_y_px();

        canvas.text(
            &median_label(statistic.median_ns),
            Point::new(text_x + 3.0, y),
            &median_style,
        );
        canvas.text(
            &lane.name,
            Point::new(text_x - config.median_label_gap, y),
            &name_style,
        );
    }
}

fn draw_axis_label(
    layout: &TimelineLayout,
    config: &RenderConfig,
    stat: &SessionStatistic,
    origin: Point,
    canvas: &mut dyn Canvas,
) {
    let style = TextStyle {
        size: config.axis_font_size,
        color: config.label_color,
        anchor: TextAnchor::Middle,
    };
    canvas.text(
        &axis_label(layout, stat),
        Point::new(
            origin.x + layout.canvas_width / 2.0,
            origin.y + layout.canvas_height + config.time_axis_band_height / 2.0,
        ),
        &style,
    );
}

fn draw_title(
    session: &TraceSession,
    layout: &TimelineLayout,
    config: &RenderConfig,
    title: Option<&str>,
    origin: Point,
    canvas: &mut dyn Canvas,
) {
    let (text, size) = match title {
        Some(title) => (title, config.title_font_size),
        None => (session.name.as_str(), config.session_title_font_size),
    };
    let style = TextStyle {
        size,
        color: config.axis_color,
        anchor: TextAnchor::Middle,
    };
    canvas.text(
        text,
        Point::new(
            origin.x + layout.canvas_width / 2.0,
            config.title_padding + config.title_bar_height / 2.0,
        ),
        &style,
    );
}

fn draw_hud(session: &TraceSession, config: &RenderConfig, stat: &SessionStatistic, canvas: &mut dyn Canvas) {
    let style = TextStyle {
        size: config.hud_font_size,
        color: config.axis_color,
        anchor: TextAnchor::Start,
    };
    let (x, mut y) = config.hud_origin;

    for line in hud_lines(session, stat) {
        canvas.text(&line, Point::new(x, y), &style);
        y += config.hud_line_spacing;
    }
}

/// `Slice #F - #F+N / total frames (CPU time in milliseconds)`
pub fn axis_label(layout: &TimelineLayout, stat: &SessionStatistic) -> String {
    format!(
        "Slice #{} - #{} / {} frames ({} in milliseconds)",
        layout.in_point,
        layout.in_point + layout.frame_count,
        stat.number_of_frames_processed,
        layout.domain.label()
    )
}

pub fn median_label(median_ns: i64) -> String {
    format!("{:.0} \u{03BC}s", ns_to_us(median_ns))
}

/// Statistics HUD text, one entry per line
pub fn hud_lines(session: &TraceSession, stat: &SessionStatistic) -> Vec<String> {
    vec![
        format!(
            "Avg. frame time:  {} ms",
            format_optional(stat.avg_millisecs_per_frame)
        ),
        format!(
            "Avg. throughput:  {} MB/s",
            format_optional(stat.avg_throughput_mb_per_sec)
        ),
        format!(
            "Median latency:    {} ms",
            format_optional(stat.med_frame_processing_time_per_frame_ns.map(ns_to_ms))
        ),
        format!("Renderer:    {}", session.opengl_info.renderer),
    ]
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "n/a".to_string(),
    }
}
