//! # Text2Gcode Designer
//!
//! Glyph outline extraction and flattening.
//!
//! - **Outline providers**: [`OutlineProvider`] implementations backed by
//!   system or file fonts ([`RustTypeOutlineProvider`]) and by precomputed
//!   JSON glyph tables ([`GlyphTableProvider`])
//! - **Font manager**: system font lookup through `fontdb` with a
//!   process-wide cache of parsed fonts
//! - **Flattening**: curve-to-polyline conversion within a tolerance

pub mod flatten;
pub mod font_manager;
pub mod font_outline;
pub mod glyph_table;
pub mod outline;

pub use flatten::{flatten, DEFAULT_FLATTEN_TOLERANCE, MIN_FLATTEN_TOLERANCE};
pub use font_outline::RustTypeOutlineProvider;
pub use glyph_table::{Contour, Glyph, GlyphTable, GlyphTableProvider, Segment};
pub use outline::{LyonOutlineBuilder, OutlineProvider};
