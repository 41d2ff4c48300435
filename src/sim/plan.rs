//! Flip trajectory planning
//!
//! Computes where a flip starts and ends. The rotation target is chosen so
//! that, after a whole number of half-turns plus a correction, the coin comes
//! to rest exactly on the target face's canonical angle.

use rand::Rng;

use super::state::{Face, Pose};
use crate::consts::*;
use crate::normalize_angle;
use crate::settings::SpeedProfile;

/// Precomputed parameters for one flip
#[derive(Debug, Clone, PartialEq)]
pub struct FlipPlan {
    pub target_face: Face,
    pub duration_seconds: f32,
    pub half_turns: u32,
    pub rotation_from: f32,
    pub rotation_to: f32,
    pub tilt_to: f32,
    pub yaw_to: f32,
    /// Signed apex of the arc (negative is up on screen)
    pub peak_height: f32,
    pub drift_waypoint1: f32,
    pub drift_waypoint2: f32,
}

/// Rotation target landing on `target`'s rest angle after `half_turns`
pub fn rotation_target(current: f32, target: Face, half_turns: u32) -> f32 {
    let delta = target.rest_angle() - normalize_angle(current);
    current + half_turns as f32 * std::f32::consts::PI + delta
}

/// Plan a flip from `pose` toward `target` using `speed`'s timing
pub fn plan<R: Rng>(
    pose: &Pose,
    target: Face,
    speed: SpeedProfile,
    rng: &mut R,
) -> FlipPlan {
    let half_turns = speed.half_turns();

    FlipPlan {
        target_face: target,
        duration_seconds: speed.duration_secs(),
        half_turns,
        rotation_from: pose.rotation,
        rotation_to: rotation_target(pose.rotation, target, half_turns),
        tilt_to: TILT_TARGET_MIN + rng.random::<f32>() * TILT_TARGET_SPAN,
        yaw_to: YAW_TARGET_MIN + rng.random::<f32>() * YAW_TARGET_SPAN,
        peak_height: -(PEAK_HEIGHT_MIN + rng.random::<f32>() * PEAK_HEIGHT_SPAN),
        drift_waypoint1: -DRIFT1_AMPLITUDE + rng.random::<f32>() * 2.0 * DRIFT1_AMPLITUDE,
        drift_waypoint2: -DRIFT2_AMPLITUDE + rng.random::<f32>() * 2.0 * DRIFT2_AMPLITUDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AnimationState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    #[test]
    fn test_heads_to_tails_normal_speed() {
        let state = AnimationState::new(Face::Heads);
        let mut rng = Pcg32::seed_from_u64(7);
        let plan = plan(&state.pose(), Face::Tails, SpeedProfile::Normal, &mut rng);

        assert_eq!(plan.half_turns, 14);
        assert!((plan.duration_seconds - 1.25).abs() < 1e-6);
        let expected = 0.25 + 14.0 * PI + PI;
        assert!((plan.rotation_to - expected).abs() < 1e-4);
    }

    #[test]
    fn test_randomized_fields_stay_in_range() {
        let pose = AnimationState::new(Face::Heads).pose();
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let p = plan(&pose, Face::Heads, SpeedProfile::Fast, &mut rng);
            assert!(p.tilt_to >= TILT_TARGET_MIN && p.tilt_to < TILT_TARGET_MIN + TILT_TARGET_SPAN);
            assert!(p.yaw_to >= YAW_TARGET_MIN && p.yaw_to < YAW_TARGET_MIN + YAW_TARGET_SPAN);
            assert!(-p.peak_height >= PEAK_HEIGHT_MIN);
            assert!(-p.peak_height < PEAK_HEIGHT_MIN + PEAK_HEIGHT_SPAN);
            assert!(p.drift_waypoint1.abs() <= DRIFT1_AMPLITUDE);
            assert!(p.drift_waypoint2.abs() <= DRIFT2_AMPLITUDE);
        }
    }

    #[test]
    fn test_same_face_still_spins() {
        let pose = AnimationState::new(Face::Heads).pose();
        let mut rng = Pcg32::seed_from_u64(1);
        let p = plan(&pose, Face::Heads, SpeedProfile::Slow, &mut rng);
        assert!((p.rotation_to - p.rotation_from - 10.0 * PI).abs() < 1e-4);
    }
}
