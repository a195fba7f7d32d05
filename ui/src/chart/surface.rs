//! Drawing surface abstraction.
//!
//! All coordinates are logical (CSS) pixels. Implementations map them to
//! their backing store in [`Surface::begin_frame`].

use super::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub color: &'a str,
    pub font: &'a str,
    pub align: TextAlign,
}

pub trait Surface {
    /// Size the surface is displayed at, in logical pixels.
    fn logical_size(&self) -> Size;

    /// Physical pixels per logical pixel.
    fn pixel_ratio(&self) -> f64;

    /// Resize the backing store to `size * pixel_ratio`, reset the transform
    /// so drawing stays in logical pixels, and clear.
    fn begin_frame(&mut self, size: Size, pixel_ratio: f64);

    fn set_alpha(&mut self, alpha: f64);
    fn line(&mut self, from: Point, to: Point, stroke: Stroke<'_>);
    fn polyline(&mut self, points: &[Point], stroke: Stroke<'_>);
    fn circle(&mut self, center: Point, radius: f64, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke<'_>);
    fn text(&mut self, text: &str, at: Point, style: TextStyle<'_>);
}

/// A drawing call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginFrame { backing: Size },
    Alpha(f64),
    Line { from: Point, to: Point, color: String, width: f64 },
    Polyline { points: Vec<Point>, color: String, width: f64 },
    Circle { center: Point, radius: f64, color: String },
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String, width: f64 },
    Text { text: String, at: Point, align: TextAlign },
}

/// In-memory surface that records every call, for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub size: Size,
    pub ratio: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Size, ratio: f64) -> Self {
        Self {
            size,
            ratio,
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<&[Point]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(Point, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    pub fn backing_size(&self) -> Option<Size> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::BeginFrame { backing } => Some(*backing),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn logical_size(&self) -> Size {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        if self.ratio > 0.0 {
            self.ratio
        } else {
            1.0
        }
    }

    fn begin_frame(&mut self, size: Size, pixel_ratio: f64) {
        self.ops.clear();
        self.ops.push(DrawOp::BeginFrame {
            backing: Size::new(
                (size.width * pixel_ratio).round(),
                (size.height * pixel_ratio).round(),
            ),
        });
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke<'_>) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke<'_>) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, color: &str) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke<'_>) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle<'_>) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            align: style.align,
        });
    }
}
