//! Geometry data model
//!
//! Polylines are produced by flattening glyph outlines and are never mutated
//! afterwards; every transformation builds a new [`OutlineSet`].

mod bbox;

pub use bbox::{bounds, BoundingBox};

use serde::{Deserialize, Serialize};

/// A 2D point in font units or millimetres, depending on pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Straight-segment approximation of one glyph contour.
///
/// Closed polylines carry their closing vertex explicitly, so the last point
/// equals the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point2D>,
    closed: bool,
}

impl Polyline {
    /// Creates an open polyline.
    pub fn open(points: Vec<Point2D>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Creates a closed polyline, appending the first point if the contour
    /// does not already end on it.
    pub fn closed(mut points: Vec<Point2D>) -> Self {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if points.len() > 1 && first != last {
                points.push(first);
            }
        }
        Self {
            points,
            closed: true,
        }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point2D> {
        self.points.first().copied()
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Builds a new polyline with every point passed through `f`.
    pub fn map_points<F>(&self, f: F) -> Polyline
    where
        F: Fn(Point2D) -> Point2D,
    {
        Polyline {
            points: self.points.iter().map(|p| f(*p)).collect(),
            closed: self.closed,
        }
    }
}

/// All contours of a rendered string, in glyph order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlineSet {
    polylines: Vec<Polyline>,
}

impl OutlineSet {
    pub fn new(polylines: Vec<Polyline>) -> Self {
        Self { polylines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polyline> {
        self.polylines.iter()
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Number of vertices across all polylines.
    pub fn point_count(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }

    /// Tightest axis-aligned box around every point. Recomputed on each call.
    pub fn bounds(&self) -> BoundingBox {
        bounds(self)
    }

    /// Builds a new outline set with every point passed through `f`.
    pub fn map_points<F>(&self, f: F) -> OutlineSet
    where
        F: Fn(Point2D) -> Point2D,
    {
        OutlineSet {
            polylines: self.polylines.iter().map(|p| p.map_points(&f)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OutlineSet {
    type Item = &'a Polyline;
    type IntoIter = std::slice::Iter<'a, Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.iter()
    }
}

impl FromIterator<Polyline> for OutlineSet {
    fn from_iter<I: IntoIterator<Item = Polyline>>(iter: I) -> Self {
        Self {
            polylines: iter.into_iter().collect(),
        }
    }
}
