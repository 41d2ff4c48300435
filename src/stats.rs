//! Running flip statistics
//!
//! Totals, streaks and a bounded history of recent results, newest first.

use serde::{Deserialize, Serialize};

use crate::sim::Face;

/// Maximum number of history entries to keep
pub const HISTORY_LIMIT: usize = 24;

/// A single landed flip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipRecord {
    pub face: Face,
    /// Unix timestamp (ms) when the result was revealed
    pub timestamp: f64,
    /// Local wall-clock time, `HH:MM:SS`
    pub clock: String,
}

/// Flip statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipStats {
    pub count: u32,
    pub heads: u32,
    pub tails: u32,
    pub last: Option<Face>,
    pub streak_face: Option<Face>,
    pub streak_len: u32,
    pub best_heads_streak: u32,
    pub best_tails_streak: u32,
    pub history: Vec<FlipRecord>,
}

impl FlipStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a revealed result
    pub fn record(&mut self, face: Face, timestamp: f64, clock: String) {
        self.count += 1;
        match face {
            Face::Heads => self.heads += 1,
            Face::Tails => self.tails += 1,
        }
        self.last = Some(face);
        self.apply_streak(face);

        self.history.insert(
            0,
            FlipRecord {
                face,
                timestamp,
                clock,
            },
        );
        self.history.truncate(HISTORY_LIMIT);
    }

    fn apply_streak(&mut self, face: Face) {
        if self.streak_face == Some(face) {
            self.streak_len += 1;
        } else {
            self.streak_face = Some(face);
            self.streak_len = 1;
        }
        let best = match face {
            Face::Heads => &mut self.best_heads_streak,
            Face::Tails => &mut self.best_tails_streak,
        };
        *best = (*best).max(self.streak_len);
    }

    /// Share of heads, rounded to whole percent (0 with no flips)
    pub fn heads_ratio_percent(&self) -> u32 {
        if self.count == 0 {
            return 0;
        }
        (self.heads as f64 / self.count as f64 * 100.0).round() as u32
    }

    pub fn streak_label(&self) -> String {
        match self.streak_face {
            Some(face) => format!("Streak: {} x{}", face.as_str(), self.streak_len),
            None => "Streak: -".to_string(),
        }
    }

    /// One-line summary for the clipboard
    pub fn summary_text(&self, heads_percent: u8) -> String {
        match self.last {
            Some(last) => format!(
                "Coin flip: {} (flips: {}, heads: {}, tails: {}, heads probability: {}%)",
                last.as_str(),
                self.count,
                self.heads,
                self.tails,
                heads_percent
            ),
            None => format!("Coin flip ready (heads probability: {}%)", heads_percent),
        }
    }

    /// Drop everything recorded so far
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Keep a hand-edited or older save internally consistent
    pub fn sanitized(mut self) -> Self {
        self.history.truncate(HISTORY_LIMIT);
        self.count = self.count.max(self.heads.saturating_add(self.tails));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_all(stats: &mut FlipStats, faces: &[Face]) {
        for (i, face) in faces.iter().enumerate() {
            stats.record(*face, i as f64, format!("00:00:{:02}", i));
        }
    }

    #[test]
    fn test_streaks_and_totals() {
        use Face::*;
        let mut stats = FlipStats::new();
        record_all(&mut stats, &[Heads, Heads, Tails, Heads, Heads, Heads, Tails, Tails]);

        assert_eq!(stats.count, 8);
        assert_eq!(stats.heads, 5);
        assert_eq!(stats.tails, 3);
        assert_eq!(stats.last, Some(Tails));
        assert_eq!(stats.streak_face, Some(Tails));
        assert_eq!(stats.streak_len, 2);
        assert_eq!(stats.best_heads_streak, 3);
        assert_eq!(stats.best_tails_streak, 2);
        assert_eq!(stats.heads_ratio_percent(), 63);
        assert_eq!(stats.streak_label(), "Streak: Tails x2");
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let mut stats = FlipStats::new();
        let faces = vec![Face::Heads; HISTORY_LIMIT + 6];
        record_all(&mut stats, &faces);

        assert_eq!(stats.history.len(), HISTORY_LIMIT);
        assert_eq!(stats.history[0].timestamp, (HISTORY_LIMIT + 5) as f64);
        assert_eq!(stats.count as usize, HISTORY_LIMIT + 6);
    }

    #[test]
    fn test_summary_and_reset() {
        let mut stats = FlipStats::new();
        assert_eq!(stats.summary_text(50), "Coin flip ready (heads probability: 50%)");
        assert_eq!(stats.heads_ratio_percent(), 0);

        stats.record(Face::Tails, 0.0, "12:00:00".into());
        assert!(stats.summary_text(30).starts_with("Coin flip: Tails (flips: 1"));

        stats.reset();
        assert_eq!(stats, FlipStats::default());
        assert_eq!(stats.streak_label(), "Streak: -");
    }

    #[test]
    fn test_sanitize_saturates_huge_totals() {
        let stats = FlipStats {
            heads: u32::MAX,
            tails: 1,
            ..FlipStats::default()
        }
        .sanitized();
        assert_eq!(stats.count, u32::MAX);
    }
}
