//! Error types for the settings crate.

use std::io;
use thiserror::Error;

use text2gcode_core::ConfigError;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O error during file operations.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported settings format for '{0}': expected .json or .toml")]
    UnsupportedFormat(String),

    /// A settings value failed validation.
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
