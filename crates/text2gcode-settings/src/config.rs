//! Settings for Text2Gcode
//!
//! Persistent defaults for the conversion: text rendering, auto-fit and
//! G-code emission. Stored as JSON or TOML, chosen by file extension.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SettingsError};
use text2gcode_core::config::ensure_positive;
use text2gcode_core::{FitConfig, FontDescriptor, GCodeConfig};

/// Text rendering defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size used when auto-fit is off
    pub font_size: f64,
    /// Curve flattening tolerance in font units
    pub flatten_tolerance: f64,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            bold: false,
            italic: false,
            font_size: 100.0,
            flatten_tolerance: 0.1,
        }
    }
}

/// Auto-fit defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    /// Fit to the maximum dimensions instead of using a fixed size
    pub enabled: bool,
    pub max_width_mm: f64,
    pub max_height_mm: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for FitSettings {
    fn default() -> Self {
        let search = FitConfig::default();
        Self {
            enabled: false,
            max_width_mm: 100.0,
            max_height_mm: 50.0,
            min_size: search.min_size,
            max_size: search.max_size,
            tolerance: search.tolerance,
            max_iterations: search.max_iterations,
        }
    }
}

/// Complete settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub text: TextSettings,
    pub fit: FitSettings,
    pub gcode: GCodeConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let settings: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Loads the settings at [`default_config_path`] if that file exists,
    /// otherwise returns defaults.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        ensure_positive("font_size", self.text.font_size)?;
        ensure_positive("flatten_tolerance", self.text.flatten_tolerance)?;
        self.gcode.validate()?;
        self.fit_config().validate()?;
        Ok(())
    }

    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(self.text.font_family.clone())
            .with_style(self.text.bold, self.text.italic)
    }

    /// Fit search constrained to both maximum dimensions.
    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            target_width_mm: Some(self.fit.max_width_mm),
            target_height_mm: Some(self.fit.max_height_mm),
            min_size: self.fit.min_size,
            max_size: self.fit.max_size,
            tolerance: self.fit.tolerance,
            max_iterations: self.fit.max_iterations,
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// `<config dir>/text2gcode/config.toml`, falling back to the home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("text2gcode").join("config.toml"))
}
