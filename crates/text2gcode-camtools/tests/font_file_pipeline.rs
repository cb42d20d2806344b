//! Pipeline runs through a real TrueType font (Tuffy, public domain).

use text2gcode_camtools::{
    AutoFitSizer, FitStatus, TextEngraver, TextEngravingParameters, TextSizing,
};
use text2gcode_core::{FitConfig, FontDescriptor, MotionCommand};
use text2gcode_designer::RustTypeOutlineProvider;

const TUFFY: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../text2gcode-designer/tests/fixtures/Tuffy.ttf"
);

fn provider() -> RustTypeOutlineProvider {
    RustTypeOutlineProvider::from_font_file(TUFFY).expect("fixture font loads")
}

#[test]
fn test_unmapped_text_is_no_content() {
    let params = TextEngravingParameters {
        sizing: TextSizing::Fixed(50.0),
        header: false,
        ..TextEngravingParameters::new("\u{E000}")
    };
    let conversion = TextEngraver::new(provider(), params).convert().unwrap();
    assert_eq!(conversion.commands, vec![MotionCommand::ProgramEnd]);

    let params = TextEngravingParameters {
        sizing: TextSizing::Fit(FitConfig::within(50.0, 20.0)),
        header: false,
        ..TextEngravingParameters::new("\u{E000}\u{E001}")
    };
    let conversion = TextEngraver::new(provider(), params).convert().unwrap();
    assert_eq!(conversion.fit_status, Some(FitStatus::NoContent));
    assert_eq!(conversion.commands, vec![MotionCommand::ProgramEnd]);
}

#[test]
fn test_fit_measures_the_whole_string() {
    let config = FitConfig {
        target_width_mm: Some(50.0),
        ..FitConfig::default()
    };
    let sizer = AutoFitSizer::new(provider(), 1.0);
    let font = FontDescriptor::default();

    let single = sizer.fit("H", &font, &config).unwrap();
    let word = sizer.fit("Hello", &font, &config).unwrap();

    assert_eq!(word.status, FitStatus::Fits);
    let (w, _) = sizer.measure(&word.outlines);
    assert!(w <= 50.0 + 1e-9, "width {}", w);
    assert!(w > 49.0, "width {}", w);
    assert!(
        word.size < single.size / 3.0,
        "Hello at {} vs H at {}",
        word.size,
        single.size
    );
}

#[test]
fn test_letters_sit_on_the_baseline() {
    let params = TextEngravingParameters {
        sizing: TextSizing::Fixed(100.0),
        ..TextEngravingParameters::new("xH")
    };
    let conversion = TextEngraver::new(provider(), params).convert().unwrap();

    // Y up after scaling: the baseline is y = 0 and glyphs extend upwards.
    assert!(conversion.bounds.min_y.abs() < 0.05, "{:?}", conversion.bounds);
    assert!(conversion.bounds.max_y > 5.0);
    assert!(!conversion.program.contains("inf"));
}
