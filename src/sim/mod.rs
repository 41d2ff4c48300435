//! Coin animation simulation module
//!
//! The motion of one flip lives here. This module has no rendering or
//! platform dependencies:
//! - Pose and trajectory state (`state`)
//! - Trajectory planning for a target face (`plan`)
//! - Real-time frame stepping (`step`)
//! - Weighted outcome selection (`outcome`)

pub mod easing;
pub mod outcome;
pub mod plan;
pub mod state;
pub mod step;

pub use easing::{ease_in_out_cubic, smooth_step};
pub use outcome::pick_face;
pub use plan::{FlipPlan, plan};
pub use state::{AnimationState, Face};
pub use step::step;
