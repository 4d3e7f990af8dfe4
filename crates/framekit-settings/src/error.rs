//! Settings errors
//!
//! Every failure carries the path or key it concerns. Reading and writing
//! report the file, parsing reports the format's own error, and validation
//! names the offending `frame.*` key.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading the config file failed
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// Writing the config file failed
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A loaded or about-to-be-saved value is out of range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The directory for a saved config could not be created
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// The path itself is unusable as a config location
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Problems with where the config lives rather than what it says
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Extension other than `.json` or `.toml`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// No per-user config directory on this OS
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::LoadError("config.toml: not found".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to load settings: config.toml: not found"
        );

        let err = SettingsError::InvalidSetting {
            key: "frame.default_feed_rate".to_string(),
            reason: "must be > 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'frame.default_feed_rate': must be > 0"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }

    #[test]
    fn test_parse_errors_convert() {
        let json_err = serde_json::from_str::<u32>("{").unwrap_err();
        assert!(matches!(
            SettingsError::from(json_err),
            SettingsError::JsonError(_)
        ));

        let settings_err: SettingsError = ConfigError::UnsupportedFormat("ini".to_string()).into();
        assert!(matches!(settings_err, SettingsError::Config(_)));
    }
}
