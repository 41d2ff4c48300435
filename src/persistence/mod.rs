//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope holding settings and statistics
//! - Range clamping on load
//! - Corruption detection (falls back to defaults)

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::stats::FlipStats;

/// Current envelope format version
pub const SAVE_VERSION: u32 = 1;

/// LocalStorage key
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "coin_flip_state";

/// Everything persisted between visits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub settings: Settings,
    pub stats: FlipStats,
}

impl SaveEnvelope {
    pub fn new(settings: &Settings, stats: &FlipStats) -> Self {
        Self {
            version: SAVE_VERSION,
            settings: settings.clone(),
            stats: stats.clone(),
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Parse a stored envelope; `None` for corrupt or future-versioned data
    pub fn from_json(json: &str) -> Option<Self> {
        let envelope: SaveEnvelope = match serde_json::from_str(json) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::warn!("Discarding corrupt save: {}", e);
                return None;
            }
        };
        if envelope.version > SAVE_VERSION {
            log::warn!("Save version {} is newer than supported", envelope.version);
            return None;
        }
        Some(Self {
            version: SAVE_VERSION,
            settings: envelope.settings.sanitized(),
            stats: envelope.stats.sanitized(),
        })
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let json = storage.get_item(STORAGE_KEY).ok()??;
        let envelope = Self::from_json(&json)?;
        log::info!("Loaded save ({} flips)", envelope.stats.count);
        Some(envelope)
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            let _ = storage.set_item(STORAGE_KEY, &json);
            log::debug!("State saved ({} flips)", self.stats.count);
        }
    }

    /// Remove the stored entry (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn clear() {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item(STORAGE_KEY);
            log::info!("Saved state cleared");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear() {}
}
