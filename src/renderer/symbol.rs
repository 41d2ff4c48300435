//! Embossed face glyphs
//!
//! Heads carries a crown, tails a 3x3 dot grid over a bar. Both are drawn
//! centered on the origin, scaled by `size`.

use super::surface::{Paint, Path, Surface};
use crate::sim::Face;

pub fn draw_symbol(surface: &mut dyn Surface, face: Face, size: f32, paint: &Paint) {
    for path in symbol_paths(face, size) {
        surface.fill(&path, paint);
    }
}

/// Filled shapes making up the glyph for `face`
pub fn symbol_paths(face: Face, size: f32) -> Vec<Path> {
    match face {
        Face::Heads => crown(size),
        Face::Tails => dot_grid(size),
    }
}

fn crown(s: f32) -> Vec<Path> {
    let band = Path::new()
        .move_to(-s * 0.85, s * 0.25)
        .line_to(-s * 0.65, -s * 0.30)
        .line_to(-s * 0.25, s * 0.05)
        .line_to(0.0, -s * 0.40)
        .line_to(s * 0.25, s * 0.05)
        .line_to(s * 0.65, -s * 0.30)
        .line_to(s * 0.85, s * 0.25)
        .quad_to(0.0, s * 0.55, -s * 0.85, s * 0.25)
        .close();

    vec![
        band,
        Path::circle(-s * 0.45, -s * 0.18, s * 0.08),
        Path::circle(0.0, -s * 0.26, s * 0.08),
        Path::circle(s * 0.45, -s * 0.18, s * 0.08),
    ]
}

fn dot_grid(s: f32) -> Vec<Path> {
    let r = s * 0.10;
    let spacing = s * 0.35;
    let mut paths = Vec::with_capacity(10);
    for row in -1..=1 {
        for col in -1..=1 {
            paths.push(Path::circle(col as f32 * spacing, row as f32 * spacing, r));
        }
    }
    let w = s * 1.10;
    let h = s * 0.18;
    paths.push(Path::rounded_rect(-w / 2.0, s * 0.55, w, h, h / 2.0));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_differ_per_face() {
        assert_eq!(symbol_paths(Face::Heads, 100.0).len(), 4);
        assert_eq!(symbol_paths(Face::Tails, 100.0).len(), 10);
    }
}
