//! Recording surface
//!
//! Keeps every draw call as a `DrawOp`. Used by the headless binary and in
//! tests to inspect what the painter produced.

use glam::Vec2;

use super::surface::{BlendMode, Paint, Path, Surface, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    SetScale(f32),
    Translate(Vec2),
    Rotate(f32),
    Scale(Vec2),
    Alpha(f32),
    Blend(BlendMode),
    Clear(Vec2),
    Fill { path: Path, paint: Paint },
    Stroke { path: Path, paint: Paint, width: f32 },
    Clip(Path),
    Text { text: String, at: Vec2, size: f32 },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    /// Frames started (one per `clear`)
    pub frames: usize,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text drawn so far, in order
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Unbalanced `save` calls outstanding
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ops.push(DrawOp::Restore);
    }

    fn set_scale(&mut self, scale: f32) {
        self.ops.push(DrawOp::SetScale(scale));
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::Translate(Vec2::new(x, y)));
    }

    fn rotate(&mut self, angle: f32) {
        self.ops.push(DrawOp::Rotate(angle));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(DrawOp::Scale(Vec2::new(sx, sy)));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn set_blend(&mut self, blend: BlendMode) {
        self.ops.push(DrawOp::Blend(blend));
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.frames += 1;
        self.ops.push(DrawOp::Clear(Vec2::new(width, height)));
    }

    fn fill(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke(&mut self, path: &Path, paint: &Paint, width: f32) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            paint: paint.clone(),
            width,
        });
    }

    fn clip(&mut self, path: &Path) {
        self.ops.push(DrawOp::Clip(path.clone()));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, _paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at: Vec2::new(x, y),
            size: style.size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render;
    use crate::settings::Material;
    use crate::sim::{AnimationState, Face};

    #[test]
    fn test_render_balances_save_restore() {
        let mut state = AnimationState::new(Face::Tails);
        state.rotation = 1.4;
        let mut rec = RecordingSurface::new();
        render(&mut rec, &state, Material::Gold);
        assert_eq!(rec.depth(), 0);
        assert_eq!(rec.frames, 1);
    }
}
