//! Coin Flip - A weighted coin-flip simulator with an animated canvas coin
//!
//! Core modules:
//! - `sim`: Coin animation state machine (easing, planning, frame stepping)
//! - `engine`: Control surface that owns the animation state and a drawing surface
//! - `renderer`: Drawing-surface abstraction and the coin painter
//! - `session`: Outcome selection, busy guard and reveal timing
//! - `stats`: Running flip statistics and history
//! - `settings`: User preferences (speed, material, probability, ...)
//! - `persistence`: Versioned LocalStorage envelope
//! - `platform`: Browser/native platform abstraction

pub mod engine;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod stats;

pub use engine::{CoinEngine, EngineError};
pub use session::FlipSession;
pub use settings::{Material, Settings, SpeedProfile, Theme};
pub use sim::Face;
pub use stats::FlipStats;

/// Engine configuration constants
pub mod consts {
    /// Logical canvas size (square), independent of device pixel ratio
    pub const LOGICAL_SIZE: f32 = 900.0;
    /// Largest frame delta fed to the stepper (tab suspension guard)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Resting rotation for heads; tails rests half a turn further
    pub const HEADS_REST_ANGLE: f32 = 0.25;
    pub const IDLE_TILT: f32 = 0.18;
    pub const IDLE_YAW: f32 = 0.22;

    /// Per-flip randomization ranges
    pub const TILT_TARGET_MIN: f32 = 0.20;
    pub const TILT_TARGET_SPAN: f32 = 0.08;
    pub const YAW_TARGET_MIN: f32 = 0.18;
    pub const YAW_TARGET_SPAN: f32 = 0.22;
    /// Peak height magnitude; the arc goes up (negative screen y)
    pub const PEAK_HEIGHT_MIN: f32 = 260.0;
    pub const PEAK_HEIGHT_SPAN: f32 = 120.0;
    pub const DRIFT1_AMPLITUDE: f32 = 70.0;
    pub const DRIFT2_AMPLITUDE: f32 = 90.0;

    /// Landing bounce: active over the last 8% of progress
    pub const BOUNCE_START: f32 = 0.92;
    pub const BOUNCE_AMPLITUDE: f32 = 6.0;

    /// Device pixel ratio clamp
    pub const MIN_DPR: f32 = 1.0;
    pub const MAX_DPR: f32 = 2.2;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        let n = normalize_angle(-1e-9);
        assert!((0.0..TAU).contains(&n));
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }
}
