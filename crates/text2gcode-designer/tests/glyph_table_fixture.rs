use std::path::PathBuf;

use text2gcode_core::{bounds, FontDescriptor};
use text2gcode_designer::{flatten, GlyphTable, GlyphTableProvider, OutlineProvider};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/block_font.json")
}

fn provider() -> GlyphTableProvider {
    GlyphTableProvider::from_file(fixture_path()).expect("fixture loads")
}

#[test]
fn test_fixture_parses() {
    let table = GlyphTable::from_file(fixture_path()).unwrap();
    assert_eq!(table.name.as_deref(), Some("Block Test"));
    assert_eq!(table.units_per_em, 1000.0);
    assert!(table.glyphs.contains_key("A"));
}

#[test]
fn test_hello_contours_and_extent() {
    let path = provider()
        .outline("Hello", &FontDescriptor::default(), 100.0)
        .unwrap();
    let set = flatten(&path, 0.05);

    // H, e (2), l, l, o (2)
    assert_eq!(set.len(), 7);
    assert!(set.iter().all(|p| p.is_closed()));

    let b = bounds(&set);
    assert!((b.min_x - 5.0).abs() < 1e-3, "min_x = {}", b.min_x);
    assert!((b.max_x - 221.0).abs() < 1e-3, "max_x = {}", b.max_x);
    assert!((b.min_y + 73.0).abs() < 1e-3, "min_y = {}", b.min_y);
    assert!((b.max_y - 1.0).abs() < 1e-3, "max_y = {}", b.max_y);
}

#[test]
fn test_outline_scales_linearly_with_size() {
    let p = provider();
    let font = FontDescriptor::default();
    let small = bounds(&flatten(&p.outline("H", &font, 10.0).unwrap(), 0.01));
    let large = bounds(&flatten(&p.outline("H", &font, 40.0).unwrap(), 0.01));

    assert!((large.width() - 4.0 * small.width()).abs() < 1e-3);
    assert!((large.height() - 4.0 * small.height()).abs() < 1e-3);
}

#[test]
fn test_whitespace_only_is_empty() {
    let path = provider()
        .outline("   ", &FontDescriptor::default(), 50.0)
        .unwrap();
    assert!(flatten(&path, 0.1).is_empty());
}

#[test]
fn test_open_stroke_survives_flattening() {
    let path = provider()
        .outline("/", &FontDescriptor::default(), 10.0)
        .unwrap();
    let set = flatten(&path, 0.01);
    assert_eq!(set.len(), 1);
    assert!(!set.polylines()[0].is_closed());
    assert!(set.polylines()[0].len() > 2);
}

#[test]
fn test_table_written_to_disk_round_trips() {
    let table = GlyphTable::from_file(fixture_path()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let copy = dir.path().join("copy.json");
    std::fs::write(&copy, serde_json::to_string_pretty(&table).unwrap()).unwrap();

    assert_eq!(GlyphTable::from_file(&copy).unwrap(), table);
}

#[test]
fn test_broken_table_file_is_font_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    let err = GlyphTableProvider::from_file(&bad).unwrap_err();
    assert!(err.is_font_error());
}
