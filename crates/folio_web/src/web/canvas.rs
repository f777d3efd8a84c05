use std::f64::consts::TAU;

use folio::surface::{Color, Rect, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `Surface` over a 2d canvas context.
pub(super) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub(super) fn new(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "canvas: get_context threw".to_string())?
            .ok_or("canvas: missing 2d context".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "canvas: context is not 2d".to_string())?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        // arc only throws for a negative radius.
        let _ = self.ctx.arc(cx, cy, r.max(0.0), 0.0, TAU);
        self.ctx.fill();
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn text(&mut self, x: f64, y: f64, text: &str, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font("14px sans-serif");
        let _ = self.ctx.fill_text(text, x, y);
    }
}
