//! # Text2Gcode CAM Tools
//!
//! Turns glyph outlines into pen-plotter G-code.
//!
//! - **Auto-fit**: bisection search for the largest font size that keeps the
//!   rendered text within a target width and/or height
//! - **Scaler**: font units to millimetres, with the vertical axis flipped
//! - **G-code emitter**: pen-up/pen-down motion commands and program text
//! - **Text engraver**: the end-to-end text to program pipeline

pub mod auto_fit;
pub mod gcode_emitter;
pub mod scaler;
pub mod text_engraver;

pub use auto_fit::{AutoFitSizer, FitOutcome, FitStatus};
pub use gcode_emitter::{emit, GCodeEmitter, GCodeProgram};
pub use scaler::{scale, FLIP_Y};
pub use text_engraver::{Conversion, TextEngraver, TextEngravingParameters, TextSizing};
