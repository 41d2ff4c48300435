//! Real-time frame stepping
//!
//! Advances an in-flight flip by wall-clock delta. Runs every display frame;
//! a no-op while idle.

use std::f32::consts::PI;

use super::easing::{ease_in_out_cubic, smooth_step};
use super::state::AnimationState;
use crate::consts::*;
use crate::lerp;

const COMPLETION_EPSILON: f32 = 1e-5;

/// Vertical arc: zero at both ends, `peak` at the midpoint
#[inline]
pub fn arc_height(peak: f32, t: f32) -> f32 {
    4.0 * peak * t * (1.0 - t)
}

/// Horizontal drift from two waypoints weighted by `sin(tπ)`
#[inline]
pub fn drift(waypoint1: f32, waypoint2: f32, t: f32) -> f32 {
    let w = (t * PI).sin();
    waypoint1 * w + waypoint2 * (w * w - w * 0.5)
}

/// Small landing hop over the last stretch of progress
#[inline]
pub fn landing_bounce(t: f32) -> f32 {
    if t > BOUNCE_START {
        let local = (t - BOUNCE_START) / (1.0 - BOUNCE_START);
        (local * PI).sin() * BOUNCE_AMPLITUDE
    } else {
        0.0
    }
}

/// Advance `state` by `dt` real seconds
pub fn step(state: &mut AnimationState, dt: f32) {
    if !state.is_animating {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    let mut t = (state.elapsed_fraction + dt / state.duration_seconds).clamp(0.0, 1.0);
    // Summed frame deltas drift by a few ULPs; don't leave a flip one frame short
    if t >= 1.0 - COMPLETION_EPSILON {
        t = 1.0;
    }
    state.elapsed_fraction = t;

    state.rotation = lerp(state.rotation_from, state.rotation_to, ease_in_out_cubic(t));
    let s = smooth_step(t);
    state.tilt = lerp(state.tilt_from, state.tilt_to, s);
    state.yaw = lerp(state.yaw_from, state.yaw_to, s);

    state.offset.y = arc_height(state.peak_height, t) + landing_bounce(t);
    state.offset.x = drift(state.drift_waypoint1, state.drift_waypoint2, t);

    if t >= 1.0 {
        state.snap_to_rest();
        log::debug!("Coin landed on {}", state.target_face.as_str());
    }

    state.needs_redraw = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SpeedProfile;
    use crate::sim::{Face, plan};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn start(state: &mut AnimationState, target: Face, speed: SpeedProfile, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let p = plan(&state.pose(), target, speed, &mut rng);
        state.begin(&p);
    }

    fn run_to_end(state: &mut AnimationState) {
        let mut guard = 0;
        while state.is_animating && guard < 10_000 {
            step(state, 1.0 / 60.0);
            guard += 1;
        }
    }

    #[test]
    fn test_heads_to_tails_lands_on_tails() {
        let mut state = AnimationState::new(Face::Heads);
        start(&mut state, Face::Tails, SpeedProfile::Normal, 3);

        // 1.25s fed in 25 frames of 50ms
        for _ in 0..25 {
            step(&mut state, 0.05);
        }
        assert!(!state.is_animating);
        assert_eq!(state.displayed_face(), Face::Tails);
        assert_eq!(state.offset, Vec2::ZERO);
        assert_eq!(state.tilt, IDLE_TILT);
        assert_eq!(state.yaw, IDLE_YAW);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut state = AnimationState::new(Face::Heads);
        start(&mut state, Face::Tails, SpeedProfile::Normal, 11);
        step(&mut state, 0.2);
        let before = state.elapsed_fraction;

        step(&mut state, 10.0);
        let advanced = state.elapsed_fraction - before;
        assert!(state.is_animating);
        assert!((advanced - MAX_FRAME_DT / 1.25).abs() < 1e-5);
    }

    #[test]
    fn test_zero_delta_changes_nothing() {
        let mut state = AnimationState::new(Face::Heads);
        start(&mut state, Face::Tails, SpeedProfile::Normal, 5);
        let rotation = state.rotation;

        step(&mut state, 0.0);
        assert_eq!(state.elapsed_fraction, 0.0);
        assert_eq!(state.rotation, rotation);
        assert_eq!(state.offset, Vec2::ZERO);
        assert!(state.rotation.is_finite());
        assert!(state.is_animating);
    }

    #[test]
    fn test_idle_step_is_noop() {
        let mut state = AnimationState::new(Face::Tails);
        state.needs_redraw = false;
        let before = state.clone();
        step(&mut state, 0.05);
        assert_eq!(before, state);
    }

    #[test]
    fn test_arc_height_peaks_at_midpoint() {
        let peak = -300.0;
        assert_eq!(arc_height(peak, 0.0), 0.0);
        assert_eq!(arc_height(peak, 1.0), 0.0);
        assert!((arc_height(peak, 0.5) - peak).abs() < 1e-4);
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert!(arc_height(peak, t) >= peak - 1e-4);
        }
    }

    #[test]
    fn test_bounce_only_near_landing() {
        assert_eq!(landing_bounce(0.5), 0.0);
        assert_eq!(landing_bounce(BOUNCE_START), 0.0);
        assert!((landing_bounce(0.96) - BOUNCE_AMPLITUDE).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_increases_monotonically() {
        let mut state = AnimationState::new(Face::Tails);
        start(&mut state, Face::Heads, SpeedProfile::Slow, 8);
        let mut last = state.rotation;
        while state.is_animating {
            step(&mut state, 1.0 / 60.0);
            if state.is_animating {
                assert!(state.rotation >= last - 1e-4);
                last = state.rotation;
            }
        }
    }

    proptest! {
        #[test]
        fn flip_always_lands_on_target(
            start_angle in -100.0f32..100.0,
            heads in any::<bool>(),
            speed_idx in 0usize..3,
            seed in any::<u64>(),
        ) {
            let target = if heads { Face::Heads } else { Face::Tails };
            let speed = [SpeedProfile::Slow, SpeedProfile::Normal, SpeedProfile::Fast][speed_idx];
            let mut state = AnimationState::new(Face::Heads);
            state.rotation = start_angle;
            start(&mut state, target, speed, seed);

            prop_assert!(state.rotation_to > state.rotation_from);
            run_to_end(&mut state);
            prop_assert!(!state.is_animating);
            prop_assert_eq!(state.displayed_face(), target);
            prop_assert_eq!(state.offset, Vec2::ZERO);
        }
    }
}
