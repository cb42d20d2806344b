use serde::{Deserialize, Serialize};

use super::OutlineSet;

/// Axis-aligned bounds of an [`OutlineSet`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Zero-area box at the origin, returned for outline sets without points.
    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when every edge is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
    }

    /// True for a zero-area box, i.e. no drawable content.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 && self.height() <= 0.0
    }
}

/// Returns the tightest box enclosing all points of all polylines.
///
/// An outline set without points yields [`BoundingBox::EMPTY`].
pub fn bounds(outlines: &OutlineSet) -> BoundingBox {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    let mut has_points = false;

    for p in outlines.iter().flat_map(|poly| poly.points()) {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
        has_points = true;
    }

    if !has_points {
        return BoundingBox::EMPTY;
    }

    BoundingBox::new(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point2D, Polyline};

    #[test]
    fn test_empty_outline_set_has_zero_box_at_origin() {
        let bb = bounds(&OutlineSet::empty());
        assert_eq!(bb, BoundingBox::EMPTY);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_bounds_span_all_polylines() {
        let set = OutlineSet::new(vec![
            Polyline::open(vec![Point2D::new(-1.0, 2.0), Point2D::new(4.0, 3.0)]),
            Polyline::open(vec![Point2D::new(2.0, -5.0), Point2D::new(1.0, 0.5)]),
        ]);
        let bb = bounds(&set);
        assert_eq!(bb, BoundingBox::new(-1.0, -5.0, 4.0, 3.0));
        assert_eq!(bb.width(), 5.0);
        assert_eq!(bb.height(), 8.0);
        assert!(!bb.is_empty());
    }

    #[test]
    fn test_horizontal_line_is_not_empty() {
        let set = OutlineSet::new(vec![Polyline::open(vec![
            Point2D::new(0.0, 1.0),
            Point2D::new(10.0, 1.0),
        ])]);
        let bb = set.bounds();
        assert_eq!(bb.height(), 0.0);
        assert!(!bb.is_empty());
    }
}
