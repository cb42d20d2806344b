//! Text engraving pipeline
//!
//! Validates the request, picks a font size (fixed or auto-fit), flattens and
//! scales the outlines and emits the pen-plotter program.

use serde::{Deserialize, Serialize};

use crate::auto_fit::{AutoFitSizer, FitStatus};
use crate::gcode_emitter::{emit, GCodeProgram};
use crate::scaler::scale;
use text2gcode_core::config::ensure_positive;
use text2gcode_core::{
    BoundingBox, ConfigError, FitConfig, FontDescriptor, GCodeConfig, MotionCommand, Result,
};
use text2gcode_designer::{OutlineProvider, DEFAULT_FLATTEN_TOLERANCE};

/// How the font size is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSizing {
    /// Render at this font size
    Fixed(f64),
    /// Search for the largest size within the fit targets
    Fit(FitConfig),
}

impl Default for TextSizing {
    fn default() -> Self {
        Self::Fixed(100.0)
    }
}

/// Text engraving parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEngravingParameters {
    pub text: String,
    pub font: FontDescriptor,
    pub sizing: TextSizing,
    /// Maximum curve deviation in font units
    pub flatten_tolerance: f64,
    pub gcode: GCodeConfig,
    /// Prefix the program with a descriptive comment block
    pub header: bool,
}

impl Default for TextEngravingParameters {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: FontDescriptor::default(),
            sizing: TextSizing::default(),
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
            gcode: GCodeConfig::default(),
            header: true,
        }
    }
}

impl TextEngravingParameters {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.gcode.validate()?;
        ensure_positive("flatten_tolerance", self.flatten_tolerance)?;
        match &self.sizing {
            TextSizing::Fixed(size) => ensure_positive("font_size", *size),
            TextSizing::Fit(fit) => fit.validate(),
        }
    }
}

/// Output of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub font_size: f64,
    /// Bounds of the emitted geometry in mm
    pub bounds: BoundingBox,
    /// Set when auto-fit chose the size
    pub fit_status: Option<FitStatus>,
    pub commands: Vec<MotionCommand>,
    pub program: String,
}

impl Conversion {
    /// Width and height of the drawing in mm.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.bounds.width(), self.bounds.height())
    }

    pub fn is_empty(&self) -> bool {
        self.commands.len() <= 1
    }

    /// `Dimensions: W x H mm`
    pub fn summary(&self) -> String {
        let (w, h) = self.dimensions();
        format!("Dimensions: {:.2} x {:.2} mm", w, h)
    }
}

/// Converts text to a G-code program through an [`OutlineProvider`].
pub struct TextEngraver<P> {
    provider: P,
    params: TextEngravingParameters,
}

impl<P: OutlineProvider> TextEngraver<P> {
    pub fn new(provider: P, params: TextEngravingParameters) -> Self {
        Self { provider, params }
    }

    pub fn params(&self) -> &TextEngravingParameters {
        &self.params
    }

    /// Runs the whole pipeline. Configuration is checked before any outline
    /// is requested.
    pub fn convert(&self) -> Result<Conversion> {
        self.params.validate()?;
        let params = &self.params;

        let sizer = AutoFitSizer::new(&self.provider, params.gcode.scale_factor)
            .with_flatten_tolerance(params.flatten_tolerance);

        let (font_size, outlines, fit_status) = match &params.sizing {
            TextSizing::Fixed(size) => {
                let outlines = sizer.render(&params.text, &params.font, *size)?;
                (*size, outlines, None)
            }
            TextSizing::Fit(fit) => {
                let outcome = sizer.fit(&params.text, &params.font, fit)?;
                match outcome.status {
                    FitStatus::Unreachable => tracing::warn!(
                        "Text does not fit the target even at minimum size {:.2}; using it anyway",
                        outcome.size
                    ),
                    _ => tracing::debug!(
                        "Auto-fit chose size {:.4} after {} steps ({})",
                        outcome.size,
                        outcome.iterations,
                        outcome.status
                    ),
                }
                (outcome.size, outcome.outlines, Some(outcome.status))
            }
        };

        if outlines.is_empty() {
            tracing::info!("Nothing to draw for '{}'", params.text);
        }

        let scaled = scale(&outlines, params.gcode.scale_factor);
        let bounds = scaled.bounds();
        if !bounds.is_finite() {
            return Err(ConfigError::invalid(
                "font_size",
                format!("{} overflows the coordinate range", font_size),
            )
            .into());
        }
        let commands = emit(&scaled, &params.gcode);

        let mut program = GCodeProgram::new(commands.clone(), &params.gcode);
        if params.header {
            program = program
                .with_header_line("Text2Gcode")
                .with_header_line(format!("Text: {}", params.text))
                .with_header_line(format!("Font: {}", params.font))
                .with_header_line(format!("Font size: {:.2}", font_size))
                .with_header_line(format!(
                    "Dimensions: {:.2} x {:.2} mm",
                    bounds.width(),
                    bounds.height()
                ));
        }

        tracing::info!(
            "Converted '{}' at size {:.2}: {} contours, {} commands",
            params.text,
            font_size,
            scaled.len(),
            commands.len()
        );

        Ok(Conversion {
            font_size,
            bounds,
            fit_status,
            program: program.to_gcode(),
            commands,
        })
    }
}
