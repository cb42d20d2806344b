//! Error handling for Text2Gcode
//!
//! Provides error types for the conversion pipeline:
//! - Configuration errors (rejected before any geometry is processed)
//! - Font errors (font resolution, font data and glyph tables)
//!
//! Blank text and unreachable fit targets are not errors; they still
//! produce a well-formed program.

use thiserror::Error;

/// Configuration error type
///
/// Raised by `validate()` on the immutable configuration structs. A request
/// carrying an invalid configuration is rejected as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric parameter has an unusable value
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The font size search range is inverted
    #[error("Font size range is inverted: min_size {min} > max_size {max}")]
    SizeRangeInverted {
        /// The configured minimum size.
        min: f64,
        /// The configured maximum size.
        max: f64,
    },

    /// Auto-fit was requested without any target dimension
    #[error("Auto-fit requires a target width, a target height, or both")]
    NoFitTarget,
}

impl ConfigError {
    /// Create an [`ConfigError::InvalidValue`] for the named parameter
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Font error type
///
/// Represents failures to obtain outline geometry for a font.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    /// No face matched the family and no fallback was available
    #[error("Font family '{family}' not found")]
    NotFound {
        /// The requested family name.
        family: String,
    },

    /// Font bytes could not be parsed
    #[error("Invalid font data in {source_name}")]
    InvalidFontData {
        /// File path or other description of where the bytes came from.
        source_name: String,
    },

    /// A glyph table was malformed
    #[error("Invalid glyph table: {reason}")]
    GlyphTable {
        /// What was wrong with the table.
        reason: String,
    },

    /// Font or glyph-table file could not be read
    #[error("Failed to read {path}: {reason}")]
    Io {
        /// The file that failed to load.
        path: String,
        /// The underlying I/O failure.
        reason: String,
    },
}

/// Main error type for Text2Gcode
///
/// A unified error type used in the public APIs of the pipeline crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Font error
    #[error(transparent)]
    Font(#[from] FontError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is a font error
    pub fn is_font_error(&self) -> bool {
        matches!(self, Error::Font(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
