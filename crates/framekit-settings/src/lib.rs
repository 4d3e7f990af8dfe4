//! Framekit Settings Crate
//!
//! Loads, validates and saves the configuration of a frame job.

pub mod config;
pub mod error;

pub use config::{Config, FrameSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use framekit_core::FeedRateUnits;
