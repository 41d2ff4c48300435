//! Flip session: the layer between user input and the coin engine
//!
//! Picks weighted outcomes, guards against overlapping flips, and tells the
//! shell when to reveal the result and unlock input. Both delays come from
//! the same `SpeedProfile` the engine animates with.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::engine::CoinEngine;
use crate::persistence::SaveEnvelope;
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{Face, pick_face};
use crate::stats::FlipStats;

/// A launched flip awaiting its reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFlip {
    pub face: Face,
    /// Delay until the result should be shown
    pub reveal_ms: u32,
    /// Delay until a new flip may start
    pub release_ms: u32,
}

pub struct FlipSession {
    pub settings: Settings,
    pub stats: FlipStats,
    busy: bool,
    auto: bool,
    rng: Pcg32,
}

impl FlipSession {
    pub fn new(settings: Settings, stats: FlipStats, seed: u64) -> Self {
        Self {
            settings,
            stats,
            busy: false,
            auto: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restore from a saved envelope, or start fresh
    pub fn restore(saved: Option<SaveEnvelope>, seed: u64) -> Self {
        match saved {
            Some(env) => Self::new(env.settings, env.stats, seed),
            None => Self::new(Settings::default(), FlipStats::new(), seed),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Draw an outcome and launch the coin; `None` while a flip is running
    pub fn begin_flip<S: Surface>(&mut self, engine: &mut CoinEngine<S>) -> Option<PendingFlip> {
        if self.busy {
            return None;
        }
        let face = pick_face(&mut self.rng, self.settings.heads_percent);
        let speed = self.settings.speed;
        engine.set_speed(speed);
        if let Err(e) = engine.start_flip(face) {
            log::warn!("Flip not started: {}", e);
            return None;
        }
        self.busy = true;
        Some(PendingFlip {
            face,
            reveal_ms: speed.reveal_delay_ms(),
            release_ms: speed.release_delay_ms(),
        })
    }

    /// Count the result once the reveal delay has elapsed
    pub fn reveal(&mut self, face: Face, timestamp: f64, clock: String) {
        self.stats.record(face, timestamp, clock);
        log::info!("Result: {} (flip #{})", face.as_str(), self.stats.count);
        self.persist();
    }

    /// Unlock input after the coin has landed
    pub fn release(&mut self) {
        self.busy = false;
    }

    pub fn set_auto(&mut self, on: bool) {
        self.auto = on;
    }

    pub fn toggle_auto(&mut self) -> bool {
        self.auto = !self.auto;
        self.auto
    }

    pub fn mode_label(&self) -> &'static str {
        if self.auto { "Mode: Auto" } else { "Mode: Normal" }
    }

    /// Clear statistics, stop auto-flip and put the coin back on heads
    pub fn reset<S: Surface>(&mut self, engine: &mut CoinEngine<S>) {
        self.auto = false;
        self.stats.reset();
        engine.set_idle(Face::Heads);
        self.persist();
        log::info!("Statistics reset");
    }

    /// Turn persistence on (saves now) or off (deletes the stored entry)
    pub fn set_persist(&mut self, on: bool) {
        self.settings.persist = on;
        if on {
            self.persist();
        } else {
            SaveEnvelope::clear();
        }
    }

    /// Save if persistence is enabled
    pub fn persist(&self) {
        if self.settings.persist {
            SaveEnvelope::new(&self.settings, &self.stats).save();
        }
    }

    /// Face to show at startup
    pub fn resting_face(&self) -> Face {
        self.stats.last.unwrap_or(Face::Heads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::settings::SpeedProfile;

    fn setup(heads_percent: u8) -> (FlipSession, CoinEngine<RecordingSurface>) {
        let settings = Settings {
            heads_percent,
            ..Settings::default()
        };
        let session = FlipSession::new(settings, FlipStats::new(), 77);
        let engine = CoinEngine::new(RecordingSurface::new(), 5, 1.0);
        (session, engine)
    }

    #[test]
    fn test_busy_guard_rejects_second_flip() {
        let (mut session, mut engine) = setup(50);
        assert!(session.begin_flip(&mut engine).is_some());
        assert!(session.is_busy());
        assert!(session.begin_flip(&mut engine).is_none());

        // Landing alone doesn't unlock; the release timer does
        for _ in 0..100 {
            engine.frame(0.05);
        }
        assert!(session.begin_flip(&mut engine).is_none());
        session.release();
        assert!(session.begin_flip(&mut engine).is_some());
    }

    #[test]
    fn test_pending_flip_timing_matches_speed() {
        let (mut session, mut engine) = setup(100);
        session.settings.speed = SpeedProfile::Slow;
        let pending = session.begin_flip(&mut engine).unwrap();
        assert_eq!(pending.face, Face::Heads);
        assert_eq!(pending.reveal_ms, 1980);
        assert_eq!(pending.release_ms, 2260);
        assert_eq!(engine.speed(), SpeedProfile::Slow);
        assert!((engine.state().duration_seconds - 2.2).abs() < 1e-6);
    }

    #[test]
    fn test_flip_lands_on_picked_face() {
        let (mut session, mut engine) = setup(0);
        let pending = session.begin_flip(&mut engine).unwrap();
        assert_eq!(pending.face, Face::Tails);
        for _ in 0..40 {
            engine.frame(0.05);
        }
        assert_eq!(engine.displayed_face(), pending.face);
        session.reveal(pending.face, 0.0, "00:00:00".into());
        assert_eq!(session.stats.tails, 1);
        assert_eq!(session.resting_face(), Face::Tails);
    }

    #[test]
    fn test_reset_clears_and_idles() {
        let (mut session, mut engine) = setup(100);
        session.set_auto(true);
        let pending = session.begin_flip(&mut engine).unwrap();
        session.reveal(pending.face, 0.0, "00:00:00".into());

        session.reset(&mut engine);
        assert!(!session.is_auto());
        assert_eq!(session.stats, FlipStats::default());
        assert!(!engine.is_animating());
        assert_eq!(engine.displayed_face(), Face::Heads);
        assert_eq!(session.mode_label(), "Mode: Normal");
    }
}
