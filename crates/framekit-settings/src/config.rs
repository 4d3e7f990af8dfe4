//! Frame job configuration
//!
//! Supports JSON and TOML files. The default location is
//! `<config dir>/framekit/config.toml` in the platform-specific directory.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use framekit_core::FeedRateUnits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "framekit";
const CONFIG_FILE: &str = "config.toml";

fn default_feed_rate() -> f64 {
    2000.0
}

fn default_true() -> bool {
    true
}

fn default_restore_parameter() -> u32 {
    1000
}

/// How a frame job annotates and closes the outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSettings {
    /// Feed used when the operator left the feed field empty
    #[serde(default = "default_feed_rate")]
    pub default_feed_rate: f64,
    /// Units the operator enters feed rates in
    #[serde(default)]
    pub feed_units: FeedRateUnits,
    /// Rapid back to the starting position after the outline
    #[serde(default = "default_true")]
    pub return_to_start: bool,
    /// Controller parameter that receives the original feed setting
    #[serde(default = "default_restore_parameter")]
    pub restore_feed_parameter: u32,
    /// Macro invoked after writing the parameter; absent disables the restore line
    pub restore_feed_macro: Option<String>,
    /// Close the outline with `M30`
    #[serde(default = "default_true")]
    pub end_program: bool,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            default_feed_rate: default_feed_rate(),
            feed_units: FeedRateUnits::default(),
            return_to_start: true,
            restore_feed_parameter: default_restore_parameter(),
            restore_feed_macro: Some("M221".to_string()),
            end_program: true,
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub frame: FrameSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => {
            let extension = other.unwrap_or("<none>").to_string();
            Err(ConfigError::UnsupportedFormat(extension).into())
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/framekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Ok(default) if default.is_file() => Self::load_from_file(&default),
            Ok(_) => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                debug!("{}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let frame = &self.frame;

        if !frame.default_feed_rate.is_finite() || frame.default_feed_rate <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "frame.default_feed_rate".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        if let Some(macro_name) = &frame.restore_feed_macro {
            if macro_name.trim().is_empty() {
                return Err(SettingsError::InvalidSetting {
                    key: "frame.restore_feed_macro".to_string(),
                    reason: "must not be blank".to_string(),
                });
            }
        }

        Ok(())
    }
}
