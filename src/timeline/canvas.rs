//! Drawing primitives used by the timeline renderer.
//!
//! The renderer never writes markup itself; it issues primitive calls on a
//! [`Canvas`]. [`super::svg_canvas::SvgCanvas`] is the production backend.

use super::config::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Solid fill with opacity in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Rgb,
    pub opacity: f64,
}

impl Fill {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    pub fn translucent(color: Rgb, opacity: f64) -> Self {
        Self { color, opacity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    pub cap: LineCap,
}

/// Horizontal anchor of a text run; text is always vertically centered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Rgb,
    pub anchor: TextAnchor,
}

/// Vector drawing surface
pub trait Canvas {
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Open polyline through `points`, joined round
    fn polyline(&mut self, points: &[Point], stroke: &Stroke);

    /// Filled rectangle; `radius` is clamped to half the shorter side
    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: &Fill);

    fn text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Clip everything drawn until the matching [`Canvas::pop_clip`]
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);
}
