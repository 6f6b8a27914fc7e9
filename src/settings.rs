//! Runner settings and preferences
//!
//! Kept separate from [`crate::Tuning`]: these shape how a session is run and
//! heard, never how the simulation behaves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// RNG seed (None = derive from the clock)
    pub seed: Option<u64>,
    /// Frames to run before the headless runner stops
    pub max_frames: u64,
    /// Optional tuning file applied on startup
    pub tuning_path: Option<PathBuf>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === HUD ===
    /// Log the HUD text every N frames (0 = never)
    pub hud_log_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_frames: 3600,
            tuning_path: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            hud_log_interval: 60,
        }
    }
}

impl Settings {
    /// Resolve the seed, falling back to the clock
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
