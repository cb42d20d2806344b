//! End-to-end runs of the `text2gcode` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn block_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates/text2gcode-designer/tests/fixtures/block_font.json")
}

/// Runs the binary with an isolated home so no user settings are picked up.
fn run_text2gcode(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_text2gcode"))
        .args(args)
        .current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd)
        .env("RUST_LOG", "info")
        .output()
        .expect("run text2gcode")
}

#[test]
fn program_goes_to_stdout_and_summary_to_stderr() {
    let dir = TempDir::new().unwrap();
    let table = block_font();
    let output = run_text2gcode(
        &["A", "--glyph-table", table.to_str().unwrap(), "--size", "10"],
        dir.path(),
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("; Text2Gcode\n"));
    assert!(stdout.contains("\nG21\nG90\nG0 Z5.000\nG0 X0.000 Y0.000\n"));
    assert!(stdout.ends_with("M2\n"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Dimensions: 0.60 x 0.70 mm"), "stderr: {stderr}");
}

#[test]
fn auto_fit_flags_limit_dimensions() {
    let dir = TempDir::new().unwrap();
    let table = block_font();
    let output = run_text2gcode(
        &[
            "Hello",
            "--glyph-table",
            table.to_str().unwrap(),
            "--max-width",
            "50",
            "--max-height",
            "20",
        ],
        dir.path(),
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Dimensions: 50.00 x"), "stderr: {stderr}");
}

#[test]
fn save_writes_text_named_file() {
    let dir = TempDir::new().unwrap();
    let table = block_font();
    let output = run_text2gcode(
        &["lol", "--glyph-table", table.to_str().unwrap(), "--save", "--no-header"],
        dir.path(),
    );

    assert!(output.status.success(), "process failed: {output:?}");
    assert!(output.stdout.is_empty());
    let program = std::fs::read_to_string(dir.path().join("lol.g")).unwrap();
    assert!(program.starts_with("G21\nG90\n"));
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "[gcode]\nfeedrate = 1234.0\nsafe_z = 2.5\n").unwrap();
    let table = block_font();
    let output = run_text2gcode(
        &[
            "l",
            "--glyph-table",
            table.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--no-preamble",
        ],
        dir.path(),
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" F1234\n"));
    assert!(stdout.contains("G0 Z2.500\n"));
    assert!(!stdout.contains("G21"));
}

#[test]
fn invalid_configuration_fails() {
    let dir = TempDir::new().unwrap();
    let table = block_font();
    let output = run_text2gcode(
        &["A", "--glyph-table", table.to_str().unwrap(), "--feed", "0"],
        dir.path(),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("feedrate"), "stderr: {stderr}");
}

#[test]
fn missing_glyph_table_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_text2gcode(&["A", "--glyph-table", "absent.json"], dir.path());
    assert!(!output.status.success());
}
