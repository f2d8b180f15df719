//! Canvas 2D backend

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wasm_bindgen::JsCast;

use super::shapes::{PathCmd, Shape, build_scene};
use super::{Frame, Renderer};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::settings::Settings;

/// Draws scenes onto a `<canvas>` scaled to the logical field size
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    settings: Settings,
}

impl CanvasRenderer {
    /// Size the canvas backing store for the device pixel ratio and grab
    /// its 2D context. Returns None if the context is unavailable.
    pub fn new(canvas: &HtmlCanvasElement, dpr: f64, settings: Settings) -> Option<Self> {
        canvas.set_width((FIELD_WIDTH as f64 * dpr) as u32);
        canvas.set_height((FIELD_HEIGHT as f64 * dpr) as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("Failed to scale canvas: {:?}", e);
        }
        Some(Self { ctx, settings })
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    fn trace(&self, cmds: &[PathCmd]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for cmd in cmds {
            match *cmd {
                PathCmd::MoveTo(p) => ctx.move_to(p.x as f64, p.y as f64),
                PathCmd::LineTo(p) => ctx.line_to(p.x as f64, p.y as f64),
                PathCmd::QuadTo(c, p) => {
                    ctx.quadratic_curve_to(c.x as f64, c.y as f64, p.x as f64, p.y as f64)
                }
                PathCmd::BezierTo(c1, c2, p) => ctx.bezier_curve_to(
                    c1.x as f64,
                    c1.y as f64,
                    c2.x as f64,
                    c2.y as f64,
                    p.x as f64,
                    p.y as f64,
                ),
                PathCmd::Close => ctx.close_path(),
            }
        }
    }

    fn round_rect_path(min: Vec2, size: Vec2, radius: f32) -> Vec<PathCmd> {
        let r = radius.min(size.x * 0.5).min(size.y * 0.5);
        let max = min + size;
        vec![
            PathCmd::MoveTo(Vec2::new(min.x + r, min.y)),
            PathCmd::LineTo(Vec2::new(max.x - r, min.y)),
            PathCmd::QuadTo(Vec2::new(max.x, min.y), Vec2::new(max.x, min.y + r)),
            PathCmd::LineTo(Vec2::new(max.x, max.y - r)),
            PathCmd::QuadTo(max, Vec2::new(max.x - r, max.y)),
            PathCmd::LineTo(Vec2::new(min.x + r, max.y)),
            PathCmd::QuadTo(Vec2::new(min.x, max.y), Vec2::new(min.x, max.y - r)),
            PathCmd::LineTo(Vec2::new(min.x, min.y + r)),
            PathCmd::QuadTo(min, Vec2::new(min.x + r, min.y)),
            PathCmd::Close,
        ]
    }

    fn draw(&self, shape: &Shape) {
        let ctx = &self.ctx;
        match shape {
            Shape::Rect { min, size, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
            }
            Shape::RoundRect {
                min,
                size,
                radius,
                color,
            } => {
                self.trace(&Self::round_rect_path(*min, *size, *radius));
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                if ctx
                    .arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )
                    .is_ok()
                {
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
            }
            Shape::Path {
                cmds,
                color,
                stroke,
            } => {
                self.trace(cmds);
                match stroke {
                    Some(width) => {
                        ctx.set_stroke_style_str(color);
                        ctx.set_line_width(*width as f64);
                        ctx.stroke();
                    }
                    None => {
                        ctx.set_fill_style_str(color);
                        ctx.fill();
                    }
                }
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.ctx
            .clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
        for shape in build_scene(frame, &self.settings) {
            self.draw(&shape);
        }
    }
}
