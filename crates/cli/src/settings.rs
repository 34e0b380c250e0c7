use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sim_recorder_core::shared::constants::{DEFAULT_FRAMERATE, DEFAULT_PLAY_SPEED, FFMPEG_BINARY};

/// Recording defaults persisted between runs.
///
/// Command-line flags override whatever is stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub framerate: f64,
    pub play_speed: f64,
    pub width: u32,
    pub height: u32,
    pub camera: String,
    pub ffmpeg: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            framerate: DEFAULT_FRAMERATE,
            play_speed: DEFAULT_PLAY_SPEED,
            width: 640,
            height: 480,
            camera: "side".to_string(),
            ffmpeg: FFMPEG_BINARY.to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sim-recorder").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring malformed settings in {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
