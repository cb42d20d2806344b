//! Immutable conversion configuration
//!
//! These structs are passed by reference into the sizer and emitter; nothing
//! in the pipeline keeps module-wide settings. Each struct is validated once,
//! before any geometry is processed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Default font/design-unit to millimetre scale factor.
pub const DEFAULT_SCALE_FACTOR: f64 = 0.1;
/// Default pen-up height in mm.
pub const DEFAULT_SAFE_Z: f64 = 5.0;
/// Default pen-down height in mm.
pub const DEFAULT_CUT_Z: f64 = 0.0;
/// Default drawing feedrate in mm/min.
pub const DEFAULT_FEEDRATE: f64 = 500.0;
/// Largest accepted scale factor.
pub const MAX_SCALE_FACTOR: f64 = 1.0e6;

/// Font selection passed to outline providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    /// Family name. `""`/`Sans`, `Serif` and `Monospace` select generic families.
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn with_style(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Arial")
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        match (self.bold, self.italic) {
            (true, true) => write!(f, " Bold Italic"),
            (true, false) => write!(f, " Bold"),
            (false, true) => write!(f, " Italic"),
            (false, false) => Ok(()),
        }
    }
}

/// Auto-fit search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Maximum rendered width in mm, if width participates in fitting
    pub target_width_mm: Option<f64>,
    /// Maximum rendered height in mm, if height participates in fitting
    pub target_height_mm: Option<f64>,
    /// Smallest font size the search may return
    pub min_size: f64,
    /// Largest font size the search may return
    pub max_size: f64,
    /// The search stops once the bracket is narrower than this (font size units)
    pub tolerance: f64,
    /// Upper bound on bisection steps
    pub max_iterations: u32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            target_width_mm: None,
            target_height_mm: None,
            min_size: 1.0,
            max_size: 500.0,
            tolerance: 0.01,
            max_iterations: 50,
        }
    }
}

impl FitConfig {
    /// Fit config constraining both axes, with default search parameters.
    pub fn within(width_mm: f64, height_mm: f64) -> Self {
        Self {
            target_width_mm: Some(width_mm),
            target_height_mm: Some(height_mm),
            ..Self::default()
        }
    }

    pub fn has_target(&self) -> bool {
        self.target_width_mm.is_some() || self.target_height_mm.is_some()
    }

    /// True when a `width` x `height` (mm) result satisfies every supplied target.
    pub fn accepts(&self, width_mm: f64, height_mm: f64) -> bool {
        self.target_width_mm.is_none_or(|w| width_mm <= w)
            && self.target_height_mm.is_none_or(|h| height_mm <= h)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.has_target() {
            return Err(ConfigError::NoFitTarget);
        }
        if let Some(w) = self.target_width_mm {
            ensure_positive("target_width_mm", w)?;
        }
        if let Some(h) = self.target_height_mm {
            ensure_positive("target_height_mm", h)?;
        }
        ensure_positive("min_size", self.min_size)?;
        ensure_positive("max_size", self.max_size)?;
        if self.min_size > self.max_size {
            return Err(ConfigError::SizeRangeInverted {
                min: self.min_size,
                max: self.max_size,
            });
        }
        ensure_positive("tolerance", self.tolerance)?;
        if self.max_iterations == 0 {
            return Err(ConfigError::invalid("max_iterations", "must be > 0"));
        }
        Ok(())
    }
}

/// Program emission parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GCodeConfig {
    /// Font/design units to millimetres
    pub scale_factor: f64,
    /// Pen-up Z height (mm)
    pub safe_z: f64,
    /// Pen-down Z height (mm)
    pub cut_z: f64,
    /// Feedrate for every linear move (mm/min)
    pub feedrate: f64,
    /// Emit the `G21`/`G90` setup lines
    pub preamble: bool,
    /// Append `; comment` explanations to command lines
    pub annotate: bool,
    /// Prefix command lines with `N` line numbers
    pub line_numbers: bool,
}

impl Default for GCodeConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            safe_z: DEFAULT_SAFE_Z,
            cut_z: DEFAULT_CUT_Z,
            feedrate: DEFAULT_FEEDRATE,
            preamble: true,
            annotate: false,
            line_numbers: false,
        }
    }
}

impl GCodeConfig {
    /// Checks scale factor and feedrate. `safe_z > cut_z` is left to callers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("scale_factor", self.scale_factor)?;
        if self.scale_factor > MAX_SCALE_FACTOR {
            return Err(ConfigError::invalid(
                "scale_factor",
                format!(
                    "must be <= {} (got {})",
                    MAX_SCALE_FACTOR, self.scale_factor
                ),
            ));
        }
        ensure_positive("feedrate", self.feedrate)?;
        ensure_finite("safe_z", self.safe_z)?;
        ensure_finite("cut_z", self.cut_z)?;
        Ok(())
    }
}

/// Rejects NaN, infinities, zero and negative values.
pub fn ensure_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::invalid(
            name,
            format!("must be > 0 (got {})", value),
        ));
    }
    Ok(())
}

fn ensure_finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(name, "must be a finite number"));
    }
    Ok(())
}
