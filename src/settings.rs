//! Flip settings and preferences
//!
//! Persisted together with the statistics in LocalStorage (see `persistence`).

use serde::{Deserialize, Deserializer, Serialize};

/// Flip speed: bundles animation duration and half-turn count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedProfile {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedProfile::Slow => "Slow",
            SpeedProfile::Normal => "Normal",
            SpeedProfile::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedProfile::Slow),
            "normal" | "medium" => Some(SpeedProfile::Normal),
            "fast" => Some(SpeedProfile::Fast),
            _ => None,
        }
    }

    /// Total flip duration in seconds
    pub fn duration_secs(&self) -> f32 {
        match self {
            SpeedProfile::Slow => 2.2,
            SpeedProfile::Normal => 1.25,
            SpeedProfile::Fast => 0.95,
        }
    }

    /// Half-turns of rotation before the landing correction
    pub fn half_turns(&self) -> u32 {
        match self {
            SpeedProfile::Slow => 10,
            SpeedProfile::Normal => 14,
            SpeedProfile::Fast => 16,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        (self.duration_secs() * 1000.0).round() as u32
    }

    /// When the result text is revealed, slightly before the coin lands
    pub fn reveal_delay_ms(&self) -> u32 {
        self.duration_ms() * 9 / 10
    }

    /// When the flip button unlocks again
    pub fn release_delay_ms(&self) -> u32 {
        self.duration_ms() + 60
    }
}

/// Coin skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Gold,
    Silver,
    Copper,
    Platinum,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Gold => "Gold",
            Material::Silver => "Silver",
            Material::Copper => "Copper",
            Material::Platinum => "Platinum",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gold" => Some(Material::Gold),
            "silver" => Some(Material::Silver),
            "copper" => Some(Material::Copper),
            "platinum" => Some(Material::Platinum),
            _ => None,
        }
    }
}

/// Page color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Value for the `data-theme` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Auto-flip interval bounds (seconds)
pub const MIN_AUTO_SECS: u32 = 1;
pub const MAX_AUTO_SECS: u32 = 10;

/// User settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chance of heads in percent (0 - 100)
    #[serde(deserialize_with = "clamped_percent")]
    pub heads_percent: u8,
    pub material: Material,
    pub speed: SpeedProfile,
    /// Seconds between auto flips
    pub auto_secs: u32,

    // === Feedback ===
    pub haptics: bool,

    // === Appearance ===
    pub theme: Theme,

    /// Keep settings and statistics in LocalStorage
    pub persist: bool,
}

/// Accept any stored number and clamp it to 0 - 100
fn clamped_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(50);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            heads_percent: 50,
            material: Material::Gold,
            speed: SpeedProfile::Normal,
            auto_secs: 2,
            haptics: true,
            theme: Theme::Dark,
            persist: true,
        }
    }
}

impl Settings {
    /// Pull every field back into its valid range (after loading)
    pub fn sanitized(mut self) -> Self {
        self.heads_percent = self.heads_percent.min(100);
        self.auto_secs = self.auto_secs.clamp(MIN_AUTO_SECS, MAX_AUTO_SECS);
        self
    }

    pub fn set_heads_percent(&mut self, percent: i32) {
        self.heads_percent = percent.clamp(0, 100) as u8;
    }

    /// Parse an interval from a text input; falls back to 2s
    pub fn set_auto_secs_from_str(&mut self, s: &str) {
        let secs = s.trim().parse::<u32>().ok().filter(|v| *v > 0).unwrap_or(2);
        self.auto_secs = secs.clamp(MIN_AUTO_SECS, MAX_AUTO_SECS);
    }

    pub fn auto_interval_ms(&self) -> u32 {
        self.auto_secs * 1000
    }
}
