//! SVG backend for [`Canvas`].
//!
//! Builds one fixed-size SVG document in memory. Coordinates are points,
//! mapped 1:1 onto SVG user units.

use super::canvas::{Canvas, Fill, LineCap, Point, Rect, Stroke, TextAnchor, TextStyle};
use chrono::Utc;

/// In-memory SVG document
#[derive(Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    font_family: String,
    body: String,
    open_clips: usize,
    next_clip_id: usize,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64, font_family: impl Into<String>) -> Self {
        Self {
            width,
            height,
            font_family: font_family.into(),
            body: String::new(),
            open_clips: 0,
            next_clip_id: 0,
        }
    }

    /// Close any open clip groups and return the complete document
    pub fn finish(mut self) -> String {
        while self.open_clips > 0 {
            self.pop_clip();
        }

        let mut svg = String::with_capacity(self.body.len() + 512);
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}pt" height="{h:.2}pt" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push('\n');
        svg.push_str(&format!("<!-- generated {} -->\n", Utc::now().to_rfc3339()));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="white"/>"#,
            self.width, self.height
        ));
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Canvas for SvgCanvas {
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.body.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attributes(stroke)
        ));
        self.body.push('\n');
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let coordinates: Vec<String> = points
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, point.y))
            .collect();
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke-linejoin="round" {}/>"#,
            coordinates.join(" "),
            stroke_attributes(stroke)
        ));
        self.body.push('\n');
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: &Fill) {
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" fill="{}""#,
            rect.x, rect.y, rect.width, rect.height, radius, fill.color
        ));
        if fill.opacity < 1.0 {
            self.body.push_str(&format!(r#" fill-opacity="{}""#, fill.opacity));
        }
        self.body.push_str("/>\n");
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        self.body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}" font-weight="bold" fill="{}" text-anchor="{}" dominant-baseline="central" xml:space="preserve">{}</text>"#,
            at.x,
            at.y,
            escape_xml(&self.font_family),
            style.size,
            style.color,
            anchor,
            escape_xml(text)
        ));
        self.body.push('\n');
    }

    fn push_clip(&mut self, rect: Rect) {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        self.open_clips += 1;

        self.body.push_str(&format!(
            r#"<defs><clipPath id="{}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
            id, rect.x, rect.y, rect.width, rect.height
        ));
        self.body.push('\n');
        self.body.push_str(&format!(r#"<g clip-path="url(#{})">"#, id));
        self.body.push('\n');
    }

    fn pop_clip(&mut self) {
        if self.open_clips == 0 {
            return;
        }
        self.open_clips -= 1;
        self.body.push_str("</g>\n");
    }
}

fn stroke_attributes(stroke: &Stroke) -> String {
    let cap = match stroke.cap {
        LineCap::Square => "square",
        LineCap::Round => "round",
    };
    format!(
        r#"stroke="{}" stroke-width="{}" stroke-linecap="{}""#,
        stroke.color, stroke.width, cap
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
