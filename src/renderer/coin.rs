//! Coin painter
//!
//! A pure function of `AnimationState`: shadow, milled rim when seen
//! edge-on, the face ellipse with material gradient, embossed glyph, shine
//! and vignette. Everything is drawn in logical units on a
//! `LOGICAL_SIZE` square.

use glam::Vec2;

use super::material::{Palette, palette};
use super::surface::{BlendMode, Paint, Path, Rgba, Surface, TextStyle, stop};
use super::symbol::draw_symbol;
use crate::consts::LOGICAL_SIZE;
use crate::settings::Material;
use crate::sim::{AnimationState, Face};

/// Resting center height as a fraction of the canvas
const BASE_Y: f32 = 0.62;
/// Coin radius as a fraction of the canvas
const COIN_RADIUS: f32 = 0.16;
const THICKNESS: f32 = 0.18;
/// Minimum vertical squash of the face ellipse
const MIN_FACE_SCALE: f32 = 0.10;
/// Rim is skipped below this edge-on strength
const EDGE_THRESHOLD: f32 = 0.02;
const RIB_COUNT: usize = 52;
const BRUSH_RINGS: usize = 90;

/// Vertical scale of the face ellipse
pub fn face_scale(rotation: f32) -> f32 {
    rotation.cos().abs().clamp(MIN_FACE_SCALE, 1.0)
}

/// 0 when flat, approaching 1 when edge-on
pub fn edge_strength(rotation: f32) -> f32 {
    1.0 - face_scale(rotation)
}

/// Shadow `(scale, alpha)` for a vertical offset (negative is up)
pub fn shadow_metrics(offset_y: f32) -> (f32, f32) {
    let height = (-offset_y / (LOGICAL_SIZE * 0.35)).clamp(0.0, 1.0);
    (1.0 - height * 0.55, 0.55 - height * 0.30)
}

/// Light direction for the shine and emboss, a continuous function of spin
pub fn light_direction(rotation: f32) -> Vec2 {
    Vec2::new(
        0.55 + 0.25 * (rotation * 0.7).cos(),
        -0.55 + 0.25 * (rotation * 0.7).sin(),
    )
}

/// Whole-coin roll from yaw plus a slow wobble with the spin
pub fn roll(state: &AnimationState) -> f32 {
    state.yaw * 0.35 + (state.rotation * 0.15).sin() * 0.06
}

/// Paint the coin; returns false when nothing needed painting
pub fn render(surface: &mut dyn Surface, state: &AnimationState, material: Material) -> bool {
    if !state.needs_redraw && !state.is_animating {
        return false;
    }

    let size = LOGICAL_SIZE;
    surface.clear(size, size);
    draw_backdrop(surface);

    let base_y = size * BASE_Y;
    let center = Vec2::new(size * 0.5 + state.offset.x, base_y + state.offset.y);
    draw_shadow(surface, center.x, base_y, state.offset.y);

    let face = state.displayed_face();
    let r = size * COIN_RADIUS;
    let scale_y = face_scale(state.rotation);
    let edge = 1.0 - scale_y;
    let colors = palette(material);

    surface.save();
    surface.translate(center.x, center.y);
    surface.rotate(roll(state));

    if edge > EDGE_THRESHOLD {
        draw_rim(surface, r, edge, &colors);
    }

    surface.save();
    surface.scale(1.0, scale_y);

    // Drop shadow under the face
    surface.save();
    surface.set_alpha(0.16);
    surface.fill(&Path::circle(0.0, r * 0.04, r * 1.02), &Paint::Solid(Rgba::black(0.55)));
    surface.restore();

    surface.clip(&Path::circle(0.0, 0.0, r));
    draw_face(surface, r, face, state.rotation, &colors);

    surface.restore();
    surface.restore();
    true
}

fn draw_backdrop(surface: &mut dyn Surface) {
    let size = LOGICAL_SIZE;
    let c = Vec2::new(size * 0.5, size * 0.55);
    let glow = Paint::Radial {
        inner_center: c,
        inner_radius: 10.0,
        outer_center: c,
        outer_radius: size * 0.55,
        stops: vec![stop(0.0, Rgba::white(0.05)), stop(1.0, Rgba::black(0.0))],
    };
    surface.fill(&Path::rect(0.0, 0.0, size, size), &glow);
}

fn draw_shadow(surface: &mut dyn Surface, x: f32, base_y: f32, offset_y: f32) {
    let size = LOGICAL_SIZE;
    let (scale, alpha) = shadow_metrics(offset_y);
    let c = Vec2::new(x, base_y + size * 0.12);

    surface.save();
    surface.set_alpha(alpha);
    let paint = Paint::Radial {
        inner_center: c,
        inner_radius: 10.0,
        outer_center: c,
        outer_radius: size * 0.20,
        stops: vec![stop(0.0, Rgba::black(0.65)), stop(1.0, Rgba::black(0.0))],
    };
    surface.fill(
        &Path::ellipse(c.x, c.y, size * 0.19 * scale, size * 0.06 * scale),
        &paint,
    );
    surface.restore();
}

/// Coin thickness seen side-on, with milled ribbing
fn draw_rim(surface: &mut dyn Surface, r: f32, edge: f32, colors: &Palette) {
    let thickness = r * THICKNESS;
    let half_w = thickness * (0.65 + edge * 2.0);
    let h = r * 2.0 * (0.14 + edge * 0.86);
    let outline = Path::rounded_rect(-half_w, -h * 0.5, half_w * 2.0, h, half_w.min(18.0));

    let gradient = Paint::Linear {
        from: Vec2::new(-half_w, 0.0),
        to: Vec2::new(half_w, 0.0),
        stops: vec![
            stop(0.0, Rgba::white(0.22)),
            stop(0.35, colors.edge),
            stop(0.65, Rgba::black(0.18)),
            stop(1.0, Rgba::white(0.14)),
        ],
    };

    surface.save();
    surface.set_alpha(0.95);
    surface.fill(&outline, &gradient);

    surface.set_alpha(0.20 + edge * 0.40);
    let rib = Paint::Solid(Rgba::black(0.45));
    for i in 0..RIB_COUNT {
        let y = -h * 0.5 + (i as f32 / (RIB_COUNT - 1) as f32) * h;
        surface.stroke(&Path::hline(-half_w, half_w, y), &rib, 1.0);
    }

    surface.set_alpha(0.20 + edge * 0.25);
    surface.stroke(&outline, &Paint::Solid(Rgba::white(0.65)), 1.0);
    surface.restore();
}

fn draw_face(surface: &mut dyn Surface, r: f32, face: Face, rotation: f32, colors: &Palette) {
    let disc = Path::circle(0.0, 0.0, r);

    let body = Paint::Radial {
        inner_center: Vec2::new(-r * 0.2, -r * 0.25),
        inner_radius: r * 0.2,
        outer_center: Vec2::ZERO,
        outer_radius: r * 1.05,
        stops: vec![stop(0.0, colors.top), stop(0.55, colors.mid), stop(1.0, colors.bottom)],
    };
    surface.fill(&disc, &body);

    // Brushed metal
    surface.save();
    surface.set_alpha(0.12);
    let brush = Paint::Solid(Rgba::white(0.25));
    for i in 0..BRUSH_RINGS {
        let rr = i as f32 / BRUSH_RINGS as f32 * r;
        surface.stroke(&Path::circle(0.0, 0.0, rr), &brush, 1.0);
    }
    surface.restore();

    // Rim bevel
    let bevel = Paint::Linear {
        from: Vec2::new(-r, -r),
        to: Vec2::new(r, r),
        stops: vec![
            stop(0.0, Rgba::white(0.30)),
            stop(0.5, Rgba::black(0.18)),
            stop(1.0, Rgba::white(0.18)),
        ],
    };
    surface.stroke(&Path::circle(0.0, 0.0, r * 0.94), &bevel, r * 0.09);

    // Inner ring
    surface.save();
    surface.set_alpha(0.22);
    surface.stroke(&Path::circle(0.0, 0.0, r * 0.68), &Paint::Solid(Rgba::black(0.35)), 2.0);
    surface.set_alpha(0.12);
    surface.stroke(&Path::circle(0.0, 0.0, r * 0.70), &Paint::Solid(Rgba::white(0.45)), 2.0);
    surface.restore();

    draw_emboss(surface, r, face, rotation);

    // Shine
    let light = light_direction(rotation);
    surface.save();
    let shine = Paint::Radial {
        inner_center: Vec2::new(-r * 0.35 + light.x * r * 0.25, -r * 0.35 + light.y * r * 0.25),
        inner_radius: r * 0.1,
        outer_center: Vec2::ZERO,
        outer_radius: r * 1.1,
        stops: vec![
            stop(0.0, Rgba::white(0.45)),
            stop(0.25, Rgba::white(0.16)),
            stop(0.55, Rgba::white(0.06)),
            stop(1.0, Rgba::white(0.0)),
        ],
    };
    surface.set_blend(BlendMode::Screen);
    surface.fill(&disc, &shine);
    surface.restore();

    // Vignette
    surface.save();
    let vignette = Paint::Radial {
        inner_center: Vec2::ZERO,
        inner_radius: r * 0.30,
        outer_center: Vec2::ZERO,
        outer_radius: r * 1.15,
        stops: vec![stop(0.0, Rgba::black(0.0)), stop(1.0, Rgba::black(0.22))],
    };
    surface.set_alpha(0.60);
    surface.fill(&disc, &vignette);
    surface.restore();
}

/// Glyph with a dark and a light offset copy, then the label
fn draw_emboss(surface: &mut dyn Surface, r: f32, face: Face, rotation: f32) {
    let light = light_direction(rotation);
    let offset = light * r * 0.03;
    let glyph = r * 0.38;

    surface.save();
    surface.translate(0.0, -r * 0.02);

    surface.set_alpha(0.18);
    surface.save();
    surface.translate(offset.x, offset.y);
    draw_symbol(surface, face, glyph, &Paint::Solid(Rgba::black(0.65)));
    surface.restore();

    surface.save();
    surface.translate(-offset.x, -offset.y);
    draw_symbol(surface, face, glyph, &Paint::Solid(Rgba::white(0.55)));
    surface.restore();

    surface.set_alpha(0.85);
    draw_symbol(surface, face, glyph, &Paint::Solid(Rgba::black(0.45)));

    surface.set_alpha(0.62);
    let style = TextStyle {
        size: (r * 0.16).floor(),
        weight: 900,
    };
    surface.fill_text(face.emboss_label(), 0.0, r * 0.46, &style, &Paint::Solid(Rgba::black(0.48)));
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::record::{DrawOp, RecordingSurface};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn rim_strokes(rec: &RecordingSurface) -> usize {
        rec.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { path, .. } if path.cmds.len() == 2))
            .count()
    }

    #[test]
    fn test_face_scale_and_edge() {
        assert!((face_scale(0.0) - 1.0).abs() < 1e-6);
        assert!((face_scale(PI) - 1.0).abs() < 1e-6);
        assert_eq!(face_scale(FRAC_PI_2), MIN_FACE_SCALE);
        assert!((edge_strength(FRAC_PI_2) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_shadow_shrinks_with_height() {
        let (rest_scale, rest_alpha) = shadow_metrics(0.0);
        let (air_scale, air_alpha) = shadow_metrics(-300.0);
        assert_eq!(rest_scale, 1.0);
        assert_eq!(rest_alpha, 0.55);
        assert!(air_scale < rest_scale);
        assert!(air_alpha < rest_alpha);
        // Bounce below rest doesn't grow the shadow
        assert_eq!(shadow_metrics(6.0), shadow_metrics(0.0));
    }

    #[test]
    fn test_skips_when_clean_and_idle() {
        let mut state = AnimationState::new(Face::Heads);
        state.needs_redraw = false;
        let mut rec = RecordingSurface::new();
        assert!(!render(&mut rec, &state, Material::Gold));
        assert!(rec.ops.is_empty());
    }

    #[test]
    fn test_rim_only_when_edge_on() {
        let mut state = AnimationState::new(Face::Heads);
        state.rotation = 0.0;
        let mut flat = RecordingSurface::new();
        assert!(render(&mut flat, &state, Material::Silver));
        assert_eq!(rim_strokes(&flat), 0);

        state.rotation = FRAC_PI_2;
        let mut edge_on = RecordingSurface::new();
        render(&mut edge_on, &state, Material::Silver);
        assert_eq!(rim_strokes(&edge_on), RIB_COUNT);
    }

    #[test]
    fn test_label_follows_cosine_sign() {
        let mut state = AnimationState::new(Face::Heads);
        state.rotation = PI + 0.3;
        let mut rec = RecordingSurface::new();
        render(&mut rec, &state, Material::Copper);
        assert_eq!(rec.texts(), vec!["TAILS".to_string()]);
    }

    #[test]
    fn test_shine_uses_screen_blend() {
        let state = AnimationState::new(Face::Heads);
        let mut rec = RecordingSurface::new();
        render(&mut rec, &state, Material::Platinum);
        assert!(rec.ops.contains(&DrawOp::Blend(BlendMode::Screen)));
        assert!(rec.ops.iter().any(|op| matches!(op, DrawOp::Clip(_))));
    }
}
