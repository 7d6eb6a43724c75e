//! Game settings and preferences
//!
//! Stored as JSON next to the executable. Tuning constants are not
//! configurable; they live in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding `asset_dir`
pub const ASSETS_ENV: &str = "SUPER_MARO_ASSETS";
/// Default settings file name
pub const SETTINGS_FILE: &str = "super_maro_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Files ===
    /// Root of `player/`, `ground_obstacles/`, `flying_obstacles/`
    pub asset_dir: PathBuf,
    /// Directory holding sound effects and background music
    pub sound_dir: PathBuf,
    /// Scoreboard file
    pub scores_path: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Landing dust and milestone sparkles
    pub particles: bool,

    // === Simulation ===
    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
    /// Pace the headless demo at 60 ticks per second
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            sound_dir: PathBuf::from("gameplay_sounds"),
            scores_path: PathBuf::from("scores.json"),

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.25,
            muted: false,

            particles: true,

            seed: None,
            realtime: false,
        }
    }
}

impl Settings {
    /// Effective effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable. `SUPER_MARO_ASSETS` overrides the asset dir.
    pub fn load(path: &Path) -> Self {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring corrupt settings in {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}; using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read {}: {err}; using defaults", path.display());
                Self::default()
            }
        };
        if let Ok(dir) = std::env::var(ASSETS_ENV) {
            settings.asset_dir = PathBuf::from(dir);
        }
        settings
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
