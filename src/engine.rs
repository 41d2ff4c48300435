//! Coin animation engine
//!
//! Owns the single `AnimationState` and the drawing surface. The browser
//! shell calls `frame` once per display refresh; the outcome layer calls
//! `start_flip` and `set_idle`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::renderer::{Surface, render};
use crate::settings::{Material, SpeedProfile};
use crate::sim::{AnimationState, Face, FlipPlan, plan, step};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A flip is already in the air; the active trajectory was kept
    #[error("a flip is already in progress")]
    FlipInProgress,
}

pub struct CoinEngine<S: Surface> {
    surface: S,
    state: AnimationState,
    rng: Pcg32,
    material: Material,
    speed: SpeedProfile,
    dpr: f32,
}

impl<S: Surface> CoinEngine<S> {
    /// Create an engine resting on heads
    ///
    /// `seed` only shapes trajectories (height, drift, tilt); outcomes are
    /// always supplied by the caller.
    pub fn new(mut surface: S, seed: u64, dpr: f32) -> Self {
        surface.set_scale(dpr);
        log::info!("Coin engine ready (dpr {:.2}, seed {})", dpr, seed);
        Self {
            surface,
            state: AnimationState::new(Face::Heads),
            rng: Pcg32::seed_from_u64(seed),
            material: Material::default(),
            speed: SpeedProfile::default(),
            dpr,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn displayed_face(&self) -> Face {
        self.state.displayed_face()
    }

    pub fn speed(&self) -> SpeedProfile {
        self.speed
    }

    pub fn set_speed(&mut self, speed: SpeedProfile) {
        self.speed = speed;
    }

    pub fn set_material(&mut self, material: Material) {
        if self.material != material {
            self.material = material;
            self.request_render();
        }
    }

    /// Re-apply the pixel-ratio transform (after the backing store changed)
    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        self.dpr = dpr;
        self.surface.set_scale(dpr);
        self.request_render();
    }

    /// Mark the coin dirty so the next frame repaints it
    pub fn request_render(&mut self) {
        self.state.needs_redraw = true;
    }

    /// Snap to the rest pose for `face`, cancelling any flip, and paint now
    pub fn set_idle(&mut self, face: Face) {
        self.state.set_idle(face);
        self.paint();
    }

    /// Launch a flip that will land on `target`
    ///
    /// Rejected while a flip is active; callers are expected to wait for the
    /// landing (see `SpeedProfile::release_delay_ms`).
    pub fn start_flip(&mut self, target: Face) -> Result<FlipPlan, EngineError> {
        if self.state.is_animating {
            log::warn!("Flip to {} rejected: coin still in the air", target.as_str());
            return Err(EngineError::FlipInProgress);
        }
        let plan = plan(&self.state.pose(), target, self.speed, &mut self.rng);
        self.state.begin(&plan);
        log::debug!(
            "Flip to {} ({} half-turns over {:.2}s)",
            target.as_str(),
            plan.half_turns,
            plan.duration_seconds
        );
        Ok(plan)
    }

    /// Step the animation by `dt` seconds, then paint if anything changed
    pub fn frame(&mut self, dt: f32) -> bool {
        step(&mut self.state, dt);
        self.paint()
    }

    fn paint(&mut self) -> bool {
        let painted = render(&mut self.surface, &self.state, self.material);
        if painted {
            self.state.needs_redraw = false;
        }
        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::renderer::record::DrawOp;

    fn engine() -> CoinEngine<RecordingSurface> {
        CoinEngine::new(RecordingSurface::new(), 1234, 2.0)
    }

    #[test]
    fn test_construction_applies_pixel_ratio_once() {
        let e = engine();
        assert_eq!(e.surface().ops, vec![DrawOp::SetScale(2.0)]);
    }

    #[test]
    fn test_flip_lands_and_goes_idle() {
        let mut e = engine();
        e.set_idle(Face::Heads);
        let plan = e.start_flip(Face::Tails).unwrap();
        assert!((plan.rotation_to - (0.25 + 15.0 * std::f32::consts::PI)).abs() < 1e-4);

        let mut elapsed = 0.0;
        while elapsed < 1.25 + 0.1 {
            e.frame(1.0 / 60.0);
            elapsed += 1.0 / 60.0;
        }
        assert!(!e.is_animating());
        assert_eq!(e.displayed_face(), Face::Tails);
    }

    #[test]
    fn test_start_flip_rejected_while_animating() {
        let mut e = engine();
        e.start_flip(Face::Heads).unwrap();
        e.frame(0.05);
        let before = e.state().clone();

        assert_eq!(e.start_flip(Face::Tails), Err(EngineError::FlipInProgress));
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn test_idle_frames_skip_painting() {
        let mut e = engine();
        e.set_idle(Face::Tails);
        let frames = e.surface().frames;
        assert!(!e.frame(0.016));
        assert!(!e.frame(0.016));
        assert_eq!(e.surface().frames, frames);

        e.set_material(Material::Copper);
        assert!(e.frame(0.016));
        assert_eq!(e.surface().frames, frames + 1);
    }

    #[test]
    fn test_set_idle_cancels_flip() {
        let mut e = engine();
        e.start_flip(Face::Tails).unwrap();
        for _ in 0..10 {
            e.frame(0.016);
        }
        e.set_idle(Face::Heads);
        assert!(!e.is_animating());
        assert_eq!(e.state(), &{
            let mut s = AnimationState::new(Face::Heads);
            s.needs_redraw = false;
            s
        });
    }

    #[test]
    fn test_zero_dt_after_start_is_stable() {
        let mut e = engine();
        let plan = e.start_flip(Face::Tails).unwrap();
        e.frame(0.0);
        assert_eq!(e.state().elapsed_fraction, 0.0);
        assert_eq!(e.state().rotation, plan.rotation_from);
        assert!(e.is_animating());
    }
}
