//! Auto-fit font sizing
//!
//! Finds the largest font size whose rendered text, once scaled to
//! millimetres, stays within the target width and/or height. The search is a
//! bisection over `[min_size, max_size]` and assumes rendered extent grows
//! monotonically with size.

use serde::{Deserialize, Serialize};
use std::fmt;

use text2gcode_core::config::ensure_positive;
use text2gcode_core::{FitConfig, FontDescriptor, OutlineSet, Result};
use text2gcode_designer::{flatten, OutlineProvider, DEFAULT_FLATTEN_TOLERANCE};

/// How the chosen size relates to the targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStatus {
    /// Bisection converged on a fitting size
    Fits,
    /// Even `max_size` fits
    AtMaximum,
    /// `min_size` does not fit; it is returned as a best effort
    Unreachable,
    /// Text has no drawable outline at any size
    NoContent,
}

impl fmt::Display for FitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fits => "fits",
            Self::AtMaximum => "at maximum size",
            Self::Unreachable => "target unreachable",
            Self::NoContent => "no content",
        };
        write!(f, "{}", s)
    }
}

/// Result of [`AutoFitSizer::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Chosen font size
    pub size: f64,
    /// Flattened outlines at `size`, in font units
    pub outlines: OutlineSet,
    pub status: FitStatus,
    /// Bisection steps performed
    pub iterations: u32,
}

/// Bisection sizer over an [`OutlineProvider`].
pub struct AutoFitSizer<P> {
    provider: P,
    scale_factor: f64,
    flatten_tolerance: f64,
}

impl<P: OutlineProvider> AutoFitSizer<P> {
    /// `scale_factor` converts font units to millimetres when measuring.
    pub fn new(provider: P, scale_factor: f64) -> Self {
        Self {
            provider,
            scale_factor,
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }

    pub fn with_flatten_tolerance(mut self, tolerance: f64) -> Self {
        self.flatten_tolerance = tolerance;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Outlines and flattens `text` at `size`.
    pub fn render(&self, text: &str, font: &FontDescriptor, size: f64) -> Result<OutlineSet> {
        let path = self.provider.outline(text, font, size)?;
        Ok(flatten(&path, self.flatten_tolerance))
    }

    /// Width and height in millimetres.
    pub fn measure(&self, outlines: &OutlineSet) -> (f64, f64) {
        let b = outlines.bounds();
        (b.width() * self.scale_factor, b.height() * self.scale_factor)
    }

    fn fits(&self, config: &FitConfig, outlines: &OutlineSet) -> bool {
        let (w, h) = self.measure(outlines);
        config.accepts(w, h)
    }

    /// Searches for the largest size in `[min_size, max_size]` that fits.
    ///
    /// Returns `min_size` when even that is too large and `max_size` when it
    /// already fits. Fails only on invalid configuration or provider errors.
    pub fn fit(&self, text: &str, font: &FontDescriptor, config: &FitConfig) -> Result<FitOutcome> {
        config.validate()?;
        ensure_positive("scale_factor", self.scale_factor)?;

        let min_set = self.render(text, font, config.min_size)?;
        if min_set.is_empty() {
            tracing::debug!("'{}' has no outline; nothing to fit", text);
            return Ok(FitOutcome {
                size: config.max_size,
                outlines: OutlineSet::empty(),
                status: FitStatus::NoContent,
                iterations: 0,
            });
        }
        if !self.fits(config, &min_set) {
            return Ok(FitOutcome {
                size: config.min_size,
                outlines: min_set,
                status: FitStatus::Unreachable,
                iterations: 0,
            });
        }

        let max_set = self.render(text, font, config.max_size)?;
        if self.fits(config, &max_set) {
            return Ok(FitOutcome {
                size: config.max_size,
                outlines: max_set,
                status: FitStatus::AtMaximum,
                iterations: 0,
            });
        }

        let mut lo = config.min_size;
        let mut lo_set = min_set;
        let mut hi = config.max_size;
        let mut iterations = 0;

        while hi - lo >= config.tolerance && iterations < config.max_iterations {
            let mid = (lo + hi) / 2.0;
            let set = self.render(text, font, mid)?;
            iterations += 1;

            let (w, h) = self.measure(&set);
            let ok = config.accepts(w, h);
            tracing::debug!(
                "Fit step {}: size {:.4} -> {:.3} x {:.3} mm ({})",
                iterations,
                mid,
                w,
                h,
                if ok { "fits" } else { "too large" }
            );

            if ok {
                lo = mid;
                lo_set = set;
            } else {
                hi = mid;
            }
        }

        Ok(FitOutcome {
            size: lo,
            outlines: lo_set,
            status: FitStatus::Fits,
            iterations,
        })
    }
}
