//! `text2gcode` - render text in a font and write it as pen-plotter G-code.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use text2gcode::{
    init_logging, suggested_filename, FitConfig, GlyphTableProvider, OutlineProvider,
    RustTypeOutlineProvider, Settings, TextEngraver, TextEngravingParameters, TextSizing,
};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "text2gcode",
    version,
    long_version = LONG_VERSION,
    about = "Convert text to G-code for pen plotters and light engraving"
)]
struct Cli {
    /// Text to convert
    text: String,

    /// Font family; generic names Sans, Serif and Monospace are accepted
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    /// Use this TTF/OTF file instead of a system font
    #[arg(long, value_name = "PATH", conflicts_with = "glyph_table")]
    font_file: Option<PathBuf>,

    /// Use a JSON glyph table instead of a font
    #[arg(long, value_name = "PATH")]
    glyph_table: Option<PathBuf>,

    /// Fixed font size
    #[arg(long, value_name = "PT")]
    size: Option<f64>,

    /// Fit the text within this width (mm)
    #[arg(long, value_name = "MM")]
    max_width: Option<f64>,

    /// Fit the text within this height (mm)
    #[arg(long, value_name = "MM")]
    max_height: Option<f64>,

    /// Font units to millimetres
    #[arg(long)]
    scale: Option<f64>,

    /// Pen-up height (mm)
    #[arg(long, allow_negative_numbers = true)]
    safe_z: Option<f64>,

    /// Pen-down height (mm)
    #[arg(long, allow_negative_numbers = true)]
    cut_z: Option<f64>,

    /// Drawing feedrate (mm/min)
    #[arg(long)]
    feed: Option<f64>,

    /// Curve flattening tolerance (font units)
    #[arg(long, value_name = "UNITS")]
    tolerance: Option<f64>,

    /// Omit the G21/G90 setup lines
    #[arg(long)]
    no_preamble: bool,

    /// Omit the comment header
    #[arg(long)]
    no_header: bool,

    /// Explain each line with a trailing comment
    #[arg(long)]
    annotate: bool,

    /// Number program lines (N10, N20, ...)
    #[arg(long)]
    line_numbers: bool,

    /// Settings file (.json or .toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the program to this file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Write the program to `<text>.g` in the current directory
    #[arg(long)]
    save: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => Settings::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            None => Settings::load_default().context("Failed to load default settings"),
        }
    }

    fn parameters(&self, settings: &Settings) -> TextEngravingParameters {
        let mut font = settings.font();
        if let Some(family) = &self.font {
            font.family = family.clone();
        }
        font.bold |= self.bold;
        font.italic |= self.italic;

        let sizing = if self.max_width.is_some() || self.max_height.is_some() {
            TextSizing::Fit(FitConfig {
                target_width_mm: self.max_width,
                target_height_mm: self.max_height,
                ..settings.fit_config()
            })
        } else if let Some(size) = self.size {
            TextSizing::Fixed(size)
        } else if settings.fit.enabled {
            TextSizing::Fit(settings.fit_config())
        } else {
            TextSizing::Fixed(settings.text.font_size)
        };

        let mut gcode = settings.gcode.clone();
        if let Some(scale) = self.scale {
            gcode.scale_factor = scale;
        }
        if let Some(z) = self.safe_z {
            gcode.safe_z = z;
        }
        if let Some(z) = self.cut_z {
            gcode.cut_z = z;
        }
        if let Some(feed) = self.feed {
            gcode.feedrate = feed;
        }
        gcode.preamble &= !self.no_preamble;
        gcode.annotate |= self.annotate;
        gcode.line_numbers |= self.line_numbers;

        TextEngravingParameters {
            text: self.text.clone(),
            font,
            sizing,
            flatten_tolerance: self.tolerance.unwrap_or(settings.text.flatten_tolerance),
            gcode,
            header: !self.no_header,
        }
    }

    fn provider(&self) -> Result<Box<dyn OutlineProvider>> {
        if let Some(path) = &self.glyph_table {
            let provider = GlyphTableProvider::from_file(path)
                .with_context(|| format!("Failed to load glyph table {}", path.display()))?;
            return Ok(Box::new(provider));
        }
        if let Some(path) = &self.font_file {
            let provider = RustTypeOutlineProvider::from_font_file(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?;
            return Ok(Box::new(provider));
        }
        Ok(Box::new(RustTypeOutlineProvider::system()))
    }

    fn destination(&self) -> Option<PathBuf> {
        if self.save {
            Some(PathBuf::from(suggested_filename(&self.text)))
        } else {
            self.output.clone()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let settings = cli.settings()?;
    let params = cli.parameters(&settings);
    let provider = cli.provider()?;

    let conversion = TextEngraver::new(provider, params)
        .convert()
        .with_context(|| format!("Failed to convert '{}'", cli.text))?;

    tracing::info!("Font size: {:.2}", conversion.font_size);
    tracing::info!("{}", conversion.summary());

    match cli.destination() {
        Some(path) => {
            fs::write(&path, &conversion.program)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(conversion.program.as_bytes())
                .context("Failed to write program to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
