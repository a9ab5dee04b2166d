//! Settings management
//!
//! Settings are read from a JSON file once at startup. Every section and
//! field has a default, so a config only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub timing: TimingSettings,
    pub level: LevelSettings,
    pub runtime: RuntimeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub target_fps: u32,
    /// Largest delta handed to systems, in seconds.
    pub max_delta_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub tile_size: u32,
    pub tile_scale: f64,
    pub columns: u32,
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Stop after this many frames; 0 runs until input asks to quit.
    pub max_frames: u64,
    /// Default tracing filter, e.g. "info" or "sprocket_core=trace".
    pub log_level: String,
    /// Log frame statistics every N frames; 0 disables the report.
    pub fps_report_interval: u64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_delta_seconds: 0.25,
        }
    }
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            tile_size: 32,
            tile_scale: 1.0,
            columns: 25,
            rows: 20,
        }
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            max_frames: 600,
            log_level: "info".to_string(),
            fps_report_interval: 120,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SettingsError::Invalid {
                field: "window",
                reason: "width and height must be non-zero",
            });
        }
        if self.timing.target_fps == 0 {
            return Err(SettingsError::Invalid {
                field: "timing.target_fps",
                reason: "must be at least 1",
            });
        }
        let max_delta = self.timing.max_delta_seconds;
        if !(max_delta > 0.0 && max_delta.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "timing.max_delta_seconds",
                reason: "must be positive and finite",
            });
        }
        if self.level.tile_size == 0 {
            return Err(SettingsError::Invalid {
                field: "level.tile_size",
                reason: "must be non-zero",
            });
        }
        if !(self.level.tile_scale > 0.0) {
            return Err(SettingsError::Invalid {
                field: "level.tile_scale",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
