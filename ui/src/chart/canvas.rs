//! `<canvas>` 2D context backend for [`Surface`].

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::platform;

use super::geometry::{Point, Rect, Size};
use super::surface::{Stroke, Surface, TextStyle};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id and take its 2D context.
    pub fn from_element_id(id: &str) -> Result<Self, String> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .ok_or_else(|| format!("no element with id {id}"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| format!("#{id} is not a canvas"))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| format!("{err:?}"))?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a 2d context")?;
        Ok(Self { canvas, ctx })
    }

    /// Current on-screen size in CSS pixels.
    pub fn displayed_size(&self) -> Size {
        Size::new(
            f64::from(self.canvas.client_width()),
            f64::from(self.canvas.client_height()),
        )
    }
}

impl Surface for CanvasSurface {
    fn logical_size(&self) -> Size {
        self.displayed_size()
    }

    fn pixel_ratio(&self) -> f64 {
        platform::device_pixel_ratio()
    }

    fn begin_frame(&mut self, size: Size, pixel_ratio: f64) {
        self.canvas.set_width((size.width * pixel_ratio).round() as u32);
        self.canvas.set_height((size.height * pixel_ratio).round() as u32);
        self.ctx
            .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)
            .ok();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
        self.ctx.set_global_alpha(1.0);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke<'_>) {
        self.polyline(&[from, to], stroke);
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke<'_>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(stroke.color);
        ctx.set_line_width(stroke.width);
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for point in rest {
            ctx.line_to(point.x, point.y);
        }
        ctx.stroke();
    }

    fn circle(&mut self, center: Point, radius: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.arc(center.x, center.y, radius, 0.0, TAU).ok();
        ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke<'_>) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle<'_>) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(style.color);
        ctx.set_font(style.font);
        ctx.set_text_align(style.align.as_str());
        ctx.set_text_baseline("middle");
        ctx.fill_text(text, at.x, at.y).ok();
    }
}
