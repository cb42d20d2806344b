//! # Text2Gcode Core
//!
//! Core types shared by every stage of the text-to-G-code pipeline:
//! geometry (points, polylines, outline sets, bounding boxes), motion
//! commands, immutable conversion configuration and the error taxonomy.

pub mod config;
pub mod error;
pub mod geometry;
pub mod motion;

pub use config::{
    FitConfig, FontDescriptor, GCodeConfig, DEFAULT_CUT_Z, DEFAULT_FEEDRATE, DEFAULT_SAFE_Z,
    DEFAULT_SCALE_FACTOR, MAX_SCALE_FACTOR,
};
pub use error::{ConfigError, Error, FontError, Result};
pub use geometry::{bounds, BoundingBox, OutlineSet, Point2D, Polyline};
pub use motion::{format_coord, format_feed, MotionCommand, COORD_DECIMALS};
