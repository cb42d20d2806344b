use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{Mutex, OnceLock},
};

use text2gcode_core::{FontDescriptor, FontError};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// Resolves a descriptor to a parsed system font.
///
/// Unknown families fall back to the generic sans-serif family. Parsed fonts
/// are cached for the lifetime of the process.
pub fn get_font_for(font: &FontDescriptor) -> Result<&'static Font<'static>, FontError> {
    static CACHE: OnceLock<Mutex<HashMap<FontDescriptor, &'static Font<'static>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let cached = cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .get(font)
        .copied();
    if let Some(found) = cached {
        return Ok(found);
    }

    let loaded = match load_font_from_system(&font.family, font.bold, font.italic) {
        Some(loaded) => loaded,
        None if !is_generic(&font.family) => {
            tracing::warn!(
                "Font family '{}' not found, falling back to sans-serif",
                font.family
            );
            load_font_from_system("Sans", font.bold, font.italic).ok_or_else(|| {
                FontError::NotFound {
                    family: font.family.clone(),
                }
            })?
        }
        None => {
            return Err(FontError::NotFound {
                family: font.family.clone(),
            })
        }
    };

    let font_ref: &'static Font<'static> = Box::leak(Box::new(loaded));
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(font.clone(), font_ref);
    Ok(font_ref)
}

/// Parses a TTF/OTF file into a font.
pub fn load_font_file(path: &Path) -> Result<Font<'static>, FontError> {
    let bytes = fs::read(path).map_err(|e| FontError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_font_bytes(bytes, &path.display().to_string())
}

/// Parses in-memory font bytes.
pub fn parse_font_bytes(bytes: Vec<u8>, source_name: &str) -> Result<Font<'static>, FontError> {
    Font::try_from_vec(bytes).ok_or_else(|| FontError::InvalidFontData {
        source_name: source_name.to_string(),
    })
}

fn is_generic(family: &str) -> bool {
    matches!(family.trim(), "" | "Sans" | "Serif" | "Monospace")
}

fn generic_families(family: &str) -> Vec<Family<'_>> {
    match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other)],
    }
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families = generic_families(family);

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    let bytes = match &face.source {
        fontdb::Source::File(path) => fs::read(path).ok()?,
        fontdb::Source::SharedFile(path, _) => fs::read(path).ok()?,
        fontdb::Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec_and_index(bytes, face.index)
}
