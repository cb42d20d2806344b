//! Font-unit to machine-coordinate scaling.

use text2gcode_core::{OutlineSet, Point2D};

/// Providers emit Y-down coordinates; machine motion is Y-up.
pub const FLIP_Y: bool = true;

/// Multiplies every coordinate by `scale_factor` and, with [`FLIP_Y`],
/// negates Y. Polyline order and closedness are unchanged.
pub fn scale(outlines: &OutlineSet, scale_factor: f64) -> OutlineSet {
    let y_sign = if FLIP_Y { -1.0 } else { 1.0 };
    outlines.map_points(|p| Point2D::new(p.x * scale_factor, y_sign * p.y * scale_factor))
}
