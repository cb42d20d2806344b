//! Glyph outline extraction.
//!
//! [`OutlineProvider`] is the seam between the pipeline and whatever renders
//! glyph geometry. Providers return a `lyon` path in font units at the
//! requested size, with the Y axis pointing down and the baseline at `y = 0`.

use lyon::math::{point, Point};
use lyon::path::path::Builder;
use lyon::path::Path;
use rusttype::OutlineBuilder;

use text2gcode_core::{FontDescriptor, Result};

/// Produces outline geometry for a run of text.
///
/// Each call is a self-contained query; implementations keep no state that
/// would make a second call with the same arguments return different geometry.
pub trait OutlineProvider {
    /// Lays out `text` in `font` at `size` and returns its glyph outlines,
    /// contours in glyph order.
    fn outline(&self, text: &str, font: &FontDescriptor, size: f64) -> Result<Path>;
}

impl<P: OutlineProvider + ?Sized> OutlineProvider for &P {
    fn outline(&self, text: &str, font: &FontDescriptor, size: f64) -> Result<Path> {
        (**self).outline(text, font, size)
    }
}

impl<P: OutlineProvider + ?Sized> OutlineProvider for Box<P> {
    fn outline(&self, text: &str, font: &FontDescriptor, size: f64) -> Result<Path> {
        (**self).outline(text, font, size)
    }
}

/// Collects outline callbacks into a `lyon::path::Path`.
///
/// Incoming coordinates are translated by the current offset, so glyphs laid
/// out one after another can share a single builder.
pub struct LyonOutlineBuilder {
    builder: Builder,
    contour_open: bool,
    offset: (f32, f32),
}

impl LyonOutlineBuilder {
    pub fn new() -> Self {
        Self {
            builder: Path::builder(),
            contour_open: false,
            offset: (0.0, 0.0),
        }
    }

    /// Sets the translation applied to every following point.
    pub fn set_offset(&mut self, dx: f32, dy: f32) {
        self.offset = (dx, dy);
    }

    fn at(&self, x: f32, y: f32) -> Point {
        point(x + self.offset.0, y + self.offset.1)
    }

    /// Ends the current contour without closing it.
    pub fn end_open(&mut self) {
        if self.contour_open {
            self.builder.end(false);
            self.contour_open = false;
        }
    }

    pub fn build(mut self) -> Path {
        if self.contour_open {
            self.builder.close();
            self.contour_open = false;
        }
        self.builder.build()
    }

    /// Returns false when there was no open contour; a drawing command
    /// without a preceding move then only starts a contour at its end point.
    fn ensure_open(&mut self, x: f32, y: f32) -> bool {
        if self.contour_open {
            return true;
        }
        let at = self.at(x, y);
        self.builder.begin(at);
        self.contour_open = true;
        false
    }
}

impl Default for LyonOutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineBuilder for LyonOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.contour_open {
            self.builder.close();
        }
        let at = self.at(x, y);
        self.builder.begin(at);
        self.contour_open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        if self.ensure_open(x, y) {
            let to = self.at(x, y);
            self.builder.line_to(to);
        }
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        if self.ensure_open(x, y) {
            let (ctrl, to) = (self.at(x1, y1), self.at(x, y));
            self.builder.quadratic_bezier_to(ctrl, to);
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        if self.ensure_open(x, y) {
            let (ctrl1, ctrl2, to) = (self.at(x1, y1), self.at(x2, y2), self.at(x, y));
            self.builder.cubic_bezier_to(ctrl1, ctrl2, to);
        }
    }

    fn close(&mut self) {
        if self.contour_open {
            self.builder.close();
            self.contour_open = false;
        }
    }
}
