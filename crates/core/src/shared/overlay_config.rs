use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::overlay::domain::overlay_layers::StalePlacementPolicy;
use crate::overlay::domain::placement_engine::PlacementTuning;
use crate::shared::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_SEPIA_INTENSITY};
use crate::shared::geometry::ViewportSize;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything about overlay behaviour that can be tuned without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub tuning: PlacementTuning,
    pub stale_policy: StalePlacementPolicy,
    /// Viewport to map into; unknown until layout when `None`.
    pub viewport: Option<ViewportSize>,
    pub sepia_intensity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tuning: PlacementTuning::default(),
            stale_policy: StalePlacementPolicy::default(),
            viewport: None,
            sepia_intensity: DEFAULT_SEPIA_INTENSITY,
        }
    }
}

impl OverlayConfig {
    /// Per-user config location, e.g. `~/.config/FaceOverlay/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path if given, else the per-user file if it exists,
    /// else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Using config {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate().map_err(ConfigError::Invalid)?;
        if !(0.0..=1.0).contains(&self.sepia_intensity) {
            return Err(ConfigError::Invalid(format!(
                "sepia intensity must be between 0.0 and 1.0, got {}",
                self.sepia_intensity
            )));
        }
        if let Some(v) = self.viewport {
            if v.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "viewport must be positive, got {}x{}",
                    v.width, v.height
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
