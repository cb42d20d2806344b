//! # Text2Gcode Settings
//!
//! Loading, saving and validating persistent conversion settings.

pub mod config;
pub mod error;

pub use config::{default_config_path, FitSettings, Settings, TextSettings};
pub use error::{Result, SettingsError};
