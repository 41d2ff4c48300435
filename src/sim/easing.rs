//! Time-remapping curves
//!
//! Rotation uses the cubic curve; the cosmetic tilt/yaw motion uses
//! smooth-step so the two layers don't move in lockstep.

/// Cubic ease-in-out on [0, 1]
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Hermite smooth-step `t²(3 - 2t)` on [0, 1]
#[inline]
pub fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
