//! Animation state and core pose types
//!
//! One `AnimationState` exists per engine. The displayed face is never
//! stored: it is always derived from the sign of `cos(rotation)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::plan::FlipPlan;
use crate::consts::*;

/// One of the two outcomes a flip resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Face {
    #[default]
    Heads,
    Tails,
}

impl Face {
    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Heads => "Heads",
            Face::Tails => "Tails",
        }
    }

    /// Label embossed under the symbol
    pub fn emboss_label(&self) -> &'static str {
        match self {
            Face::Heads => "HEADS",
            Face::Tails => "TAILS",
        }
    }

    /// Canonical resting rotation; the two faces differ by exactly π
    pub fn rest_angle(&self) -> f32 {
        match self {
            Face::Heads => HEADS_REST_ANGLE,
            Face::Tails => std::f32::consts::PI + HEADS_REST_ANGLE,
        }
    }

    /// Face shown at a given rotation (`cos >= 0` is heads)
    pub fn from_rotation(rotation: f32) -> Self {
        if rotation.cos() >= 0.0 {
            Face::Heads
        } else {
            Face::Tails
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Face::Heads => Face::Tails,
            Face::Tails => Face::Heads,
        }
    }
}

/// Snapshot of the visible pose, the planner's input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: f32,
    pub tilt: f32,
    pub yaw: f32,
    pub offset: Vec2,
}

/// Pose plus the in-flight trajectory of the current flip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub is_animating: bool,
    /// Normalized flip progress in [0, 1]; meaningless while idle
    pub elapsed_fraction: f32,
    pub duration_seconds: f32,

    /// Unbounded; grows monotonically during a flip
    pub rotation: f32,
    pub rotation_from: f32,
    pub rotation_to: f32,

    pub tilt: f32,
    pub tilt_from: f32,
    pub tilt_to: f32,

    pub yaw: f32,
    pub yaw_from: f32,
    pub yaw_to: f32,

    /// Screen-space displacement from the rest position
    pub offset: Vec2,
    /// Signed apex of the arc (negative is up on screen)
    pub peak_height: f32,
    pub drift_waypoint1: f32,
    pub drift_waypoint2: f32,

    pub target_face: Face,
    pub needs_redraw: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(Face::Heads)
    }
}

impl AnimationState {
    /// Create a state resting on `face`
    pub fn new(face: Face) -> Self {
        let rest = face.rest_angle();
        Self {
            is_animating: false,
            elapsed_fraction: 0.0,
            duration_seconds: crate::settings::SpeedProfile::Normal.duration_secs(),
            rotation: rest,
            rotation_from: rest,
            rotation_to: rest,
            tilt: IDLE_TILT,
            tilt_from: IDLE_TILT,
            tilt_to: IDLE_TILT,
            yaw: IDLE_YAW,
            yaw_from: IDLE_YAW,
            yaw_to: IDLE_YAW,
            offset: Vec2::ZERO,
            peak_height: -PEAK_HEIGHT_MIN,
            drift_waypoint1: 0.0,
            drift_waypoint2: 0.0,
            target_face: face,
            needs_redraw: true,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            rotation: self.rotation,
            tilt: self.tilt,
            yaw: self.yaw,
            offset: self.offset,
        }
    }

    /// Face currently facing the viewer
    pub fn displayed_face(&self) -> Face {
        Face::from_rotation(self.rotation)
    }

    /// Force the canonical rest pose for `face`, cancelling any flip
    pub fn set_idle(&mut self, face: Face) {
        *self = Self::new(face);
    }

    /// Snap the pose (not the trajectory) to the rest pose of `target_face`
    pub(crate) fn snap_to_rest(&mut self) {
        self.is_animating = false;
        self.offset = Vec2::ZERO;
        self.rotation = self.target_face.rest_angle();
        self.tilt = IDLE_TILT;
        self.yaw = IDLE_YAW;
    }

    /// Seed a new flip from a plan; progress restarts at zero
    pub fn begin(&mut self, plan: &FlipPlan) {
        self.is_animating = true;
        self.elapsed_fraction = 0.0;
        self.duration_seconds = plan.duration_seconds;
        self.target_face = plan.target_face;

        self.rotation_from = plan.rotation_from;
        self.rotation_to = plan.rotation_to;
        self.tilt_from = self.tilt;
        self.tilt_to = plan.tilt_to;
        self.yaw_from = self.yaw;
        self.yaw_to = plan.yaw_to;

        self.offset = Vec2::ZERO;
        self.peak_height = plan.peak_height;
        self.drift_waypoint1 = plan.drift_waypoint1;
        self.drift_waypoint2 = plan.drift_waypoint2;
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_angles_resolve_to_their_face() {
        assert_eq!(Face::from_rotation(Face::Heads.rest_angle()), Face::Heads);
        assert_eq!(Face::from_rotation(Face::Tails.rest_angle()), Face::Tails);
        let diff = Face::Tails.rest_angle() - Face::Heads.rest_angle();
        assert!((diff - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_new_state_is_at_rest() {
        let state = AnimationState::new(Face::Tails);
        assert!(!state.is_animating);
        assert_eq!(state.offset, Vec2::ZERO);
        assert_eq!(state.tilt, IDLE_TILT);
        assert_eq!(state.yaw, IDLE_YAW);
        assert_eq!(state.displayed_face(), Face::Tails);
    }

    #[test]
    fn test_set_idle_is_idempotent() {
        let mut state = AnimationState::new(Face::Tails);
        state.rotation = 12.3;
        state.offset = Vec2::new(4.0, -100.0);
        state.is_animating = true;

        state.set_idle(Face::Heads);
        let first = state.clone();
        state.set_idle(Face::Heads);
        assert_eq!(first, state);
        assert_eq!(state.displayed_face(), Face::Heads);
        assert!(!state.is_animating);
    }
}
