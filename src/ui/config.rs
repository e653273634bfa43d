//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/bisect-tui/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so a partial
//! file (or none at all) is fine.
//!
//! ```json
//! {
//!   "theme": "Classic",
//!   "max_random_size": 200,
//!   "animation_speed": 1.0
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::dataset::DEFAULT_MAX_RANDOM_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Largest size accepted by "Generate Random Data".
    #[serde(default = "default_max_random_size")]
    pub max_random_size: usize,

    /// Highlight playback speed; 2.0 plays twice as fast.
    #[serde(default = "default_animation_speed")]
    pub animation_speed: f32,
}

fn default_theme_name() -> String {
    "Classic".to_string()
}

fn default_max_random_size() -> usize {
    DEFAULT_MAX_RANDOM_SIZE
}

fn default_animation_speed() -> f32 {
    1.0
}

/// Accepted `animation_speed` values.
const ANIMATION_SPEED_RANGE: std::ops::RangeInclusive<f32> = 0.05..=20.0;

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            max_random_size: default_max_random_size(),
            animation_speed: default_animation_speed(),
        }
    }
}

impl Config {
    /// Load configuration from the default location. Returns
    /// `Config::default()` if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "bisect-tui")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Replace values the application cannot use with their defaults.
    fn sanitized(mut self) -> Self {
        if !ANIMATION_SPEED_RANGE.contains(&self.animation_speed) {
            tracing::warn!(
                speed = self.animation_speed,
                "invalid animation_speed, using default"
            );
            self.animation_speed = default_animation_speed();
        }
        self
    }
}
