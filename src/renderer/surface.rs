//! 2D drawing-surface abstraction
//!
//! The coin painter only talks to `Surface`. Paths are plain command lists
//! so any backend (canvas, recorder) can replay them.

use glam::Vec2;
use std::f32::consts::TAU;

/// Straight-alpha color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white(a: f32) -> Self {
        Self::rgba(255, 255, 255, a)
    }

    pub const fn black(a: f32) -> Self {
        Self::rgba(0, 0, 0, a)
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Gradient stop at `offset` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

pub const fn stop(offset: f32, color: Rgba) -> ColorStop {
    ColorStop { offset, color }
}

/// Fill or stroke style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    Radial {
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
        stops: Vec<ColorStop>,
    },
}

/// Compositing mode for subsequent draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    SourceOver,
    Screen,
}

impl BlendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::Screen => "screen",
        }
    }
}

/// Text placement for `fill_text` (always centered on the anchor)
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in logical units
    pub size: f32,
    pub weight: u16,
}

/// Path command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    Ellipse { center: Vec2, radii: Vec2 },
    Close,
}

/// A path as a sequence of commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.cmds.push(PathCmd::MoveTo(Vec2::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.cmds.push(PathCmd::LineTo(Vec2::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.cmds.push(PathCmd::QuadTo {
            ctrl: Vec2::new(cx, cy),
            to: Vec2::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    /// Full circle
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self {
            cmds: vec![PathCmd::Arc {
                center: Vec2::new(x, y),
                radius,
                start: 0.0,
                end: TAU,
            }],
        }
    }

    /// Full axis-aligned ellipse
    pub fn ellipse(x: f32, y: f32, rx: f32, ry: f32) -> Self {
        Self {
            cmds: vec![PathCmd::Ellipse {
                center: Vec2::new(x, y),
                radii: Vec2::new(rx, ry),
            }],
        }
    }

    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new()
            .move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    /// Rectangle with quadratic corners; radius clamps to half the short side
    pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Self {
        let r = radius.min(w.min(h) / 2.0).max(0.0);
        Self::new()
            .move_to(x + r, y)
            .line_to(x + w - r, y)
            .quad_to(x + w, y, x + w, y + r)
            .line_to(x + w, y + h - r)
            .quad_to(x + w, y + h, x + w - r, y + h)
            .line_to(x + r, y + h)
            .quad_to(x, y + h, x, y + h - r)
            .line_to(x, y + r)
            .quad_to(x, y, x + r, y)
            .close()
    }

    /// Horizontal segment
    pub fn hline(x0: f32, x1: f32, y: f32) -> Self {
        Self::new().move_to(x0, y).line_to(x1, y)
    }
}

/// A 2D drawing target with a canvas-like state stack
pub trait Surface {
    /// Push transform, alpha, blend mode and clip
    fn save(&mut self);
    fn restore(&mut self);

    /// Replace the current transform with a uniform scale
    fn set_scale(&mut self, scale: f32);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, sx: f32, sy: f32);

    fn set_alpha(&mut self, alpha: f32);
    fn set_blend(&mut self, blend: BlendMode);

    /// Clear a logical-unit rectangle to transparent
    fn clear(&mut self, width: f32, height: f32);
    fn fill(&mut self, path: &Path, paint: &Paint);
    fn stroke(&mut self, path: &Path, paint: &Paint, width: f32);
    /// Intersect the clip region with `path`
    fn clip(&mut self, path: &Path);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, paint: &Paint);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_rect_radius_clamps() {
        let path = Path::rounded_rect(0.0, 0.0, 10.0, 4.0, 50.0);
        // First point sits half the short side in from the corner
        assert_eq!(path.cmds[0], PathCmd::MoveTo(Vec2::new(2.0, 0.0)));
        assert_eq!(path.cmds.last(), Some(&PathCmd::Close));
        assert_eq!(path.cmds.len(), 10);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_css(), "rgba(1,2,3,1)");
        assert_eq!(Rgba::black(0.5).to_css(), "rgba(0,0,0,0.5)");
    }
}
