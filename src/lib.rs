//! # Text2Gcode
//!
//! Converts text rendered in a font into G-code for pen plotters and light
//! engraving machines.
//!
//! ## Architecture
//!
//! The workspace is split into crates along the conversion pipeline:
//!
//! 1. **text2gcode-core** - Geometry, motion commands, configuration, errors
//! 2. **text2gcode-designer** - Outline providers and curve flattening
//! 3. **text2gcode-camtools** - Auto-fit sizing, scaling and G-code emission
//! 4. **text2gcode-settings** - Persistent settings (JSON/TOML)
//! 5. **text2gcode** - Command-line binary that ties the crates together

pub use text2gcode_camtools::{
    AutoFitSizer, Conversion, FitStatus, GCodeEmitter, GCodeProgram, TextEngraver,
    TextEngravingParameters, TextSizing,
};
pub use text2gcode_core::{
    BoundingBox, Error, FitConfig, FontDescriptor, GCodeConfig, MotionCommand, OutlineSet,
    Result,
};
pub use text2gcode_designer::{GlyphTableProvider, OutlineProvider, RustTypeOutlineProvider};
pub use text2gcode_settings::Settings;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// File name offered by `--save`: the trimmed text with a `.g` extension,
/// or `gcode.g` when nothing is left.
pub fn suggested_filename(text: &str) -> String {
    let stem: String = text
        .trim()
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if stem.is_empty() {
        "gcode.g".to_string()
    } else {
        format!("{}.g", stem)
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so a program written to stdout stays clean
/// - RUST_LOG environment variable support (default level: info)
pub fn init_logging() -> anyhow::Result<()> {
    use std::io::IsTerminal;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("Hello"), "Hello.g");
        assert_eq!(suggested_filename("  Hi there \n"), "Hi there.g");
        assert_eq!(suggested_filename("a/b"), "a_b.g");
    }

    #[test]
    fn test_suggested_filename_blank() {
        assert_eq!(suggested_filename(""), "gcode.g");
        assert_eq!(suggested_filename(" \t "), "gcode.g");
    }

    #[test]
    fn test_build_metadata_present() {
        assert!(!VERSION.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }
}
