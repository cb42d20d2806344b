//! Precomputed glyph tables
//!
//! A glyph table stores per-character outlines in font units (Y up, baseline
//! at 0) and is loaded from JSON. It renders text without any font files,
//! which keeps output identical across machines.

use lyon::path::Path;
use rusttype::OutlineBuilder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path as StdPath;

use crate::outline::{LyonOutlineBuilder, OutlineProvider};
use text2gcode_core::{ConfigError, FontDescriptor, FontError, Result};

/// One outline command, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Move([f64; 2]),
    Line([f64; 2]),
    Quad([[f64; 2]; 2]),
    Cubic([[f64; 2]; 3]),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    #[serde(default = "default_closed")]
    pub closed: bool,
    pub segments: Vec<Segment>,
}

fn default_closed() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units
    pub advance: f64,
    #[serde(default)]
    pub contours: Vec<Contour>,
}

/// Serialized glyph table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphTable {
    #[serde(default)]
    pub name: Option<String>,
    pub units_per_em: f64,
    /// Advance for characters missing from the table (default: half an em)
    #[serde(default)]
    pub missing_advance: Option<f64>,
    /// Keyed by single-character strings
    pub glyphs: BTreeMap<String, Glyph>,
}

impl GlyphTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: GlyphTable = serde_json::from_str(json).map_err(|e| FontError::GlyphTable {
            reason: e.to_string(),
        })?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_file<P: AsRef<StdPath>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FontError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Checks em size, advances, keys and contour structure.
    pub fn validate(&self) -> std::result::Result<(), FontError> {
        let invalid = |reason: String| FontError::GlyphTable { reason };

        if !self.units_per_em.is_finite() || self.units_per_em <= 0.0 {
            return Err(invalid(format!(
                "units_per_em must be > 0 (got {})",
                self.units_per_em
            )));
        }
        if let Some(adv) = self.missing_advance {
            if !adv.is_finite() || adv < 0.0 {
                return Err(invalid("missing_advance must be >= 0".to_string()));
            }
        }

        for (key, glyph) in &self.glyphs {
            if key.chars().count() != 1 {
                return Err(invalid(format!(
                    "glyph key '{}' must be a single character",
                    key
                )));
            }
            if !glyph.advance.is_finite() {
                return Err(invalid(format!("glyph '{}' has a non-finite advance", key)));
            }
            for (idx, contour) in glyph.contours.iter().enumerate() {
                match contour.segments.first() {
                    Some(Segment::Move(_)) => {}
                    _ => {
                        return Err(invalid(format!(
                            "contour {} of glyph '{}' must start with a move",
                            idx, key
                        )))
                    }
                }
                if contour
                    .segments
                    .iter()
                    .skip(1)
                    .any(|s| matches!(s, Segment::Move(_)))
                {
                    return Err(invalid(format!(
                        "contour {} of glyph '{}' has more than one move",
                        idx, key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Outline provider that lays text out from a [`GlyphTable`].
#[derive(Debug, Clone)]
pub struct GlyphTableProvider {
    units_per_em: f64,
    missing_advance: f64,
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTableProvider {
    pub fn new(table: GlyphTable) -> Result<Self> {
        table.validate()?;
        let missing_advance = table.missing_advance.unwrap_or(table.units_per_em / 2.0);
        let glyphs = table
            .glyphs
            .into_iter()
            .filter_map(|(key, glyph)| key.chars().next().map(|c| (c, glyph)))
            .collect();
        Ok(Self {
            units_per_em: table.units_per_em,
            missing_advance,
            glyphs,
        })
    }

    pub fn from_file<P: AsRef<StdPath>>(path: P) -> Result<Self> {
        Self::new(GlyphTable::from_file(path)?)
    }

    pub fn has_glyph(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }
}

impl OutlineProvider for GlyphTableProvider {
    fn outline(&self, text: &str, font: &FontDescriptor, size: f64) -> Result<Path> {
        if !size.is_finite() || size <= 0.0 {
            return Err(
                ConfigError::invalid("font_size", format!("must be > 0 (got {})", size)).into(),
            );
        }
        tracing::trace!("Glyph table layout for '{}' ignores font {}", text, font);

        let k = size / self.units_per_em;
        let mut builder = LyonOutlineBuilder::new();
        let mut cursor = 0.0;

        for c in text.chars() {
            let Some(glyph) = self.glyphs.get(&c) else {
                cursor += self.missing_advance * k;
                continue;
            };

            // Font units are Y up; providers hand out Y down.
            let map = |[x, y]: [f64; 2]| ((cursor + x * k) as f32, (-y * k) as f32);

            for contour in &glyph.contours {
                for segment in &contour.segments {
                    match *segment {
                        Segment::Move(p) => {
                            let (x, y) = map(p);
                            builder.move_to(x, y);
                        }
                        Segment::Line(p) => {
                            let (x, y) = map(p);
                            builder.line_to(x, y);
                        }
                        Segment::Quad([c1, p]) => {
                            let (x1, y1) = map(c1);
                            let (x, y) = map(p);
                            builder.quad_to(x1, y1, x, y);
                        }
                        Segment::Cubic([c1, c2, p]) => {
                            let (x1, y1) = map(c1);
                            let (x2, y2) = map(c2);
                            let (x, y) = map(p);
                            builder.curve_to(x1, y1, x2, y2, x, y);
                        }
                    }
                }
                if contour.closed {
                    builder.close();
                } else {
                    builder.end_open();
                }
            }
            cursor += glyph.advance * k;
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::path::Event;

    const BAR_TABLE: &str = r#"{
        "units_per_em": 1000,
        "glyphs": {
            "I": {
                "advance": 300,
                "contours": [
                    { "segments": [ {"move": [100, 0]}, {"line": [200, 0]},
                                    {"line": [200, 700]}, {"line": [100, 700]} ] }
                ]
            },
            "-": {
                "advance": 400,
                "contours": [
                    { "closed": false,
                      "segments": [ {"move": [50, 300]}, {"line": [350, 300]} ] }
                ]
            }
        }
    }"#;

    fn begin_points(path: &Path) -> Vec<(f32, f32)> {
        path.iter()
            .filter_map(|e| match e {
                Event::Begin { at } => Some((at.x, at.y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layout_advances_and_flips() {
        let provider =
            GlyphTableProvider::new(GlyphTable::from_json_str(BAR_TABLE).unwrap()).unwrap();
        let path = provider
            .outline("II", &FontDescriptor::default(), 10.0)
            .unwrap();

        // k = 10 / 1000; second glyph starts one advance (3.0) later.
        let begins = begin_points(&path);
        assert_eq!(begins.len(), 2);
        assert!((begins[0].0 - 1.0).abs() < 1e-6);
        assert!((begins[1].0 - 4.0).abs() < 1e-6);
        assert!(begins[0].1.abs() < 1e-6);

        // Cap height 700 lands above the baseline, i.e. at negative Y.
        let min_y = path
            .iter()
            .filter_map(|e| match e {
                Event::Line { to, .. } => Some(to.y),
                _ => None,
            })
            .fold(f32::MAX, f32::min);
        assert!((min_y + 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_missing_glyph_advances_half_em() {
        let provider =
            GlyphTableProvider::new(GlyphTable::from_json_str(BAR_TABLE).unwrap()).unwrap();
        let path = provider
            .outline("?I", &FontDescriptor::default(), 10.0)
            .unwrap();
        let begins = begin_points(&path);
        assert_eq!(begins.len(), 1);
        assert!((begins[0].0 - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_open_contour_stays_open() {
        let provider =
            GlyphTableProvider::new(GlyphTable::from_json_str(BAR_TABLE).unwrap()).unwrap();
        let path = provider
            .outline("-", &FontDescriptor::default(), 10.0)
            .unwrap();
        assert!(path
            .iter()
            .any(|e| matches!(e, Event::End { close: false, .. })));
    }

    #[test]
    fn test_empty_text_gives_empty_path() {
        let provider =
            GlyphTableProvider::new(GlyphTable::from_json_str(BAR_TABLE).unwrap()).unwrap();
        let path = provider.outline("", &FontDescriptor::default(), 10.0).unwrap();
        assert_eq!(path.iter().count(), 0);
    }

    #[test]
    fn test_rejects_contour_without_move() {
        let json = r#"{ "units_per_em": 1000, "glyphs": {
            "x": { "advance": 500, "contours": [ { "segments": [ {"line": [1, 1]} ] } ] } } }"#;
        let err = GlyphTable::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("must start with a move"));
    }

    #[test]
    fn test_rejects_multi_char_key() {
        let json = r#"{ "units_per_em": 1000, "glyphs": { "ab": { "advance": 500 } } }"#;
        assert!(GlyphTable::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_non_positive_em() {
        let json = r#"{ "units_per_em": 0, "glyphs": {} }"#;
        assert!(GlyphTable::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_zero_size() {
        let provider =
            GlyphTableProvider::new(GlyphTable::from_json_str(BAR_TABLE).unwrap()).unwrap();
        let result = provider.outline("I", &FontDescriptor::default(), 0.0);
        assert!(matches!(result, Err(e) if e.is_config_error()));
    }
}
