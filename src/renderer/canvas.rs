//! HTML canvas backend (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{BlendMode, ColorStop, Paint, Path, PathCmd, Surface, TextStyle};
use super::SurfaceError;
use crate::consts::LOGICAL_SIZE;

const FONT_FAMILY: &str = "system-ui, -apple-system, Segoe UI, Roboto, sans-serif";

/// `Surface` over a 2D canvas context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context; fails if the browser refuses one
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Js(format!("{:?}", e)))?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    /// Look up a canvas element by id
    pub fn from_element_id(id: &str) -> Result<Self, SurfaceError> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::NotACanvas(id.to_string()))?;
        Self::new(canvas)
    }

    /// Size the backing store for the device pixel ratio
    pub fn resize_backing(&self, dpr: f32) {
        let px = (LOGICAL_SIZE * dpr).floor() as u32;
        self.canvas.set_width(px);
        self.canvas.set_height(px);
    }

    fn trace(&self, path: &Path) {
        self.ctx.begin_path();
        for cmd in &path.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathCmd::LineTo(p) => self.ctx.line_to(p.x as f64, p.y as f64),
                PathCmd::QuadTo { ctrl, to } => self.ctx.quadratic_curve_to(
                    ctrl.x as f64,
                    ctrl.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathCmd::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => {
                    let _ = self.ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        radius.max(0.0) as f64,
                        start as f64,
                        end as f64,
                    );
                }
                PathCmd::Ellipse { center, radii } => {
                    let _ = self.ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x.max(0.0) as f64,
                        radii.y.max(0.0) as f64,
                        0.0,
                        0.0,
                        std::f64::consts::TAU,
                    );
                }
                PathCmd::Close => self.ctx.close_path(),
            }
        }
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, stops): (CanvasGradient, &[ColorStop]) = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear { from, to, stops } => (
                self.ctx
                    .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64),
                stops,
            ),
            Paint::Radial {
                inner_center,
                inner_radius,
                outer_center,
                outer_radius,
                stops,
            } => (
                self.ctx
                    .create_radial_gradient(
                        inner_center.x as f64,
                        inner_center.y as f64,
                        inner_radius.max(0.0) as f64,
                        outer_center.x as f64,
                        outer_center.y as f64,
                        outer_radius.max(0.0) as f64,
                    )
                    .ok()?,
                stops,
            ),
        };
        for s in stops {
            let _ = gradient.add_color_stop(s.offset, &s.color.to_css());
        }
        Some(gradient)
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            _ => {
                if let Some(g) = self.gradient(paint) {
                    self.ctx.set_fill_style_canvas_gradient(&g);
                }
            }
        }
    }

    fn set_stroke(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_css()),
            _ => {
                if let Some(g) = self.gradient(paint) {
                    self.ctx.set_stroke_style_canvas_gradient(&g);
                }
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_scale(&mut self, scale: f32) {
        let s = scale as f64;
        let _ = self.ctx.set_transform(s, 0.0, 0.0, s, 0.0, 0.0);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        let _ = self.ctx.scale(sx as f64, sy as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_blend(&mut self, blend: BlendMode) {
        let _ = self.ctx.set_global_composite_operation(blend.as_str());
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill(&mut self, path: &Path, paint: &Paint) {
        self.set_fill(paint);
        self.trace(path);
        self.ctx.fill();
    }

    fn stroke(&mut self, path: &Path, paint: &Paint, width: f32) {
        self.set_stroke(paint);
        self.ctx.set_line_width(width as f64);
        self.trace(path);
        self.ctx.stroke();
    }

    fn clip(&mut self, path: &Path) {
        self.trace(path);
        self.ctx.clip();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, paint: &Paint) {
        self.set_fill(paint);
        self.ctx
            .set_font(&format!("{} {}px {}", style.weight, style.size, FONT_FAMILY));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
