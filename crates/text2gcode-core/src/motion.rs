//! Motion commands
//!
//! The emitted program is an ordered list of [`MotionCommand`]s. Each command
//! renders to exactly one G-code line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places used for X, Y and Z words (1 µm resolution in mm mode).
pub const COORD_DECIMALS: usize = 3;

/// A single motion command of the output program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionCommand {
    /// Non-drawing positioning move (`G0 X Y`)
    Rapid { x: f64, y: f64 },
    /// Drawing move at the program feedrate (`G1 X Y F`)
    Linear { x: f64, y: f64, feed: f64 },
    /// Pen lift or lower (`G0 Z`)
    PenZ { z: f64 },
    /// End of program (`M2`)
    ProgramEnd,
}

impl MotionCommand {
    /// Short description used when annotating program lines.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Rapid { .. } => "Move to contour start",
            Self::Linear { .. } => "Draw",
            Self::PenZ { .. } => "Pen height",
            Self::ProgramEnd => "Program end",
        }
    }

    pub fn is_pen_move(&self) -> bool {
        matches!(self, Self::PenZ { .. })
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid { x, y } => {
                write!(f, "G0 X{} Y{}", format_coord(*x), format_coord(*y))
            }
            Self::Linear { x, y, feed } => write!(
                f,
                "G1 X{} Y{} F{}",
                format_coord(*x),
                format_coord(*y),
                format_feed(*feed)
            ),
            Self::PenZ { z } => write!(f, "G0 Z{}", format_coord(*z)),
            Self::ProgramEnd => write!(f, "M2"),
        }
    }
}

/// Formats a coordinate with [`COORD_DECIMALS`] places.
///
/// Values that round to zero are printed without a sign.
pub fn format_coord(value: f64) -> String {
    let factor = 10f64.powi(COORD_DECIMALS as i32);
    let rounded = (value * factor).round() / factor;
    // -0.0 + 0.0 == +0.0
    format!("{:.*}", COORD_DECIMALS, rounded + 0.0)
}

/// Formats a feedrate at coordinate precision without trailing zeros, so
/// `500.0` prints as `500` and `0.4` as `0.4`.
pub fn format_feed(value: f64) -> String {
    let formatted = format_coord(value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
