//! User settings for the eraser and motion export.

use crate::tools::{EraserMode, EraserToolState};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default export frame rate.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Default eraser half-size.
pub const DEFAULT_ERASER_THICKNESS: f64 = 5.0;

/// Settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Eraser tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraserSettings {
    /// Eraser half-size (radius).
    pub thickness: f64,
    pub mode: EraserMode,
}

impl Default for EraserSettings {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_ERASER_THICKNESS,
            mode: EraserMode::Default,
        }
    }
}

impl EraserToolState for EraserSettings {
    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn eraser_mode(&self) -> EraserMode {
        self.mode
    }
}

/// Persisted settings. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder that receives motion export subfolders.
    pub motion_export_folder: Option<PathBuf>,
    pub motion_export_frame_rate: u32,
    pub eraser: EraserSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            motion_export_folder: None,
            motion_export_frame_rate: DEFAULT_FRAME_RATE,
            eraser: EraserSettings::default(),
        }
    }
}

impl Settings {
    /// Export frame rate, never below 1.
    pub fn frame_rate(&self) -> u32 {
        self.motion_export_frame_rate.max(1)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, or the defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }
}
