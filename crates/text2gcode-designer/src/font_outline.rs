//! Outline provider backed by TrueType/OpenType fonts.

use lyon::path::Path;
use rusttype::{point as rt_point, Font, Scale};
use std::path::Path as StdPath;

use crate::font_manager;
use crate::outline::{LyonOutlineBuilder, OutlineProvider};
use text2gcode_core::{ConfigError, FontDescriptor, Result};

/// Renders glyph outlines with `rusttype`.
///
/// By default fonts are resolved from the system font database; a provider
/// built from a font file ignores the descriptor and always uses that font.
pub struct RustTypeOutlineProvider {
    pinned: Option<Font<'static>>,
}

impl RustTypeOutlineProvider {
    /// Resolves fonts through the system font database.
    pub fn system() -> Self {
        Self { pinned: None }
    }

    /// Uses the font stored in `path` for every request.
    pub fn from_font_file<P: AsRef<StdPath>>(path: P) -> Result<Self> {
        let font = font_manager::load_font_file(path.as_ref())?;
        Ok(Self { pinned: Some(font) })
    }

    /// Uses an in-memory font for every request.
    pub fn from_bytes(bytes: Vec<u8>, source_name: &str) -> Result<Self> {
        let font = font_manager::parse_font_bytes(bytes, source_name)?;
        Ok(Self { pinned: Some(font) })
    }

    fn font_for(&self, font: &FontDescriptor) -> Result<&Font<'static>> {
        match &self.pinned {
            Some(pinned) => Ok(pinned),
            None => Ok(font_manager::get_font_for(font)?),
        }
    }
}

impl Default for RustTypeOutlineProvider {
    fn default() -> Self {
        Self::system()
    }
}

impl OutlineProvider for RustTypeOutlineProvider {
    fn outline(&self, text: &str, font: &FontDescriptor, size: f64) -> Result<Path> {
        if !size.is_finite() || size <= 0.0 {
            return Err(
                ConfigError::invalid("font_size", format!("must be > 0 (got {})", size)).into(),
            );
        }

        let face = self.font_for(font)?;
        let scale = Scale::uniform(size as f32);
        let start = rt_point(0.0, 0.0);

        let mut builder = LyonOutlineBuilder::new();
        for glyph in face.layout(text, scale, start) {
            // Glyph 0 is .notdef: characters the font does not map.
            if glyph.id().0 == 0 {
                continue;
            }
            // Unpositioned outlines are relative to the glyph origin on the
            // baseline, Y down; the pen position places them on the line.
            let origin = glyph.position();
            builder.set_offset(origin.x, origin.y);
            glyph.unpositioned().build_outline(&mut builder);
        }
        Ok(builder.build())
    }
}
