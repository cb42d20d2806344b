//! Path flattening
//!
//! Turns provider outlines (lines, quadratic and cubic curves) into
//! polylines whose deviation from the curves stays within a tolerance.

use lyon::path::iterator::PathIterator;
use lyon::path::{Event, Path};

use text2gcode_core::{OutlineSet, Point2D, Polyline};

/// Default flattening tolerance in font units.
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 0.1;

/// Smallest tolerance handed to lyon; finer values only multiply segments.
pub const MIN_FLATTEN_TOLERANCE: f64 = 1e-4;

/// Flattens every contour of `path` into a polyline.
///
/// Contours with fewer than two distinct points are dropped. Closed contours
/// end on their starting point.
pub fn flatten(path: &Path, tolerance: f64) -> OutlineSet {
    let tolerance = if tolerance.is_finite() {
        tolerance.max(MIN_FLATTEN_TOLERANCE)
    } else {
        DEFAULT_FLATTEN_TOLERANCE
    };

    let mut polylines = Vec::new();
    let mut current: Vec<Point2D> = Vec::new();

    for event in path.iter().flattened(tolerance as f32) {
        match event {
            Event::Begin { at } => {
                current.clear();
                current.push(Point2D::new(at.x as f64, at.y as f64));
            }
            Event::Line { to, .. } => {
                let p = Point2D::new(to.x as f64, to.y as f64);
                if current.last() != Some(&p) {
                    current.push(p);
                }
            }
            Event::End { close, .. } => {
                let points = std::mem::take(&mut current);
                if points.len() < 2 {
                    tracing::trace!("Dropping degenerate contour");
                    continue;
                }
                polylines.push(if close {
                    Polyline::closed(points)
                } else {
                    Polyline::open(points)
                });
            }
            _ => {}
        }
    }

    OutlineSet::new(polylines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::math::point;

    #[test]
    fn test_square_is_closed_polyline() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(10.0, 0.0));
        builder.line_to(point(10.0, 10.0));
        builder.line_to(point(0.0, 10.0));
        builder.close();
        let set = flatten(&builder.build(), DEFAULT_FLATTEN_TOLERANCE);

        assert_eq!(set.len(), 1);
        let poly = &set.polylines()[0];
        assert!(poly.is_closed());
        assert_eq!(poly.len(), 5);
        assert_eq!(poly.points()[4], Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_open_stroke_not_closed() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(5.0, 0.0));
        builder.end(false);
        let set = flatten(&builder.build(), DEFAULT_FLATTEN_TOLERANCE);

        assert_eq!(set.len(), 1);
        assert!(!set.polylines()[0].is_closed());
        assert_eq!(set.polylines()[0].len(), 2);
    }

    #[test]
    fn test_degenerate_contours_dropped() {
        let mut builder = Path::builder();
        builder.begin(point(1.0, 1.0));
        builder.end(true);
        builder.begin(point(2.0, 2.0));
        builder.line_to(point(2.0, 2.0));
        builder.end(false);
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.end(false);
        let set = flatten(&builder.build(), DEFAULT_FLATTEN_TOLERANCE);

        assert_eq!(set.len(), 1);
        assert_eq!(set.polylines()[0].first(), Some(Point2D::new(0.0, 0.0)));
    }

    #[test]
    fn test_contour_order_preserved() {
        let mut builder = Path::builder();
        for i in 0..5 {
            let x = i as f32 * 10.0;
            builder.begin(point(x, 0.0));
            builder.line_to(point(x + 5.0, 0.0));
            builder.line_to(point(x + 5.0, 5.0));
            builder.close();
        }
        let set = flatten(&builder.build(), DEFAULT_FLATTEN_TOLERANCE);
        let starts: Vec<f64> = set.iter().filter_map(|p| p.first()).map(|p| p.x).collect();
        assert_eq!(starts, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_curve_produces_many_segments() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.quadratic_bezier_to(point(50.0, 100.0), point(100.0, 0.0));
        builder.end(false);
        let path = builder.build();

        let coarse = flatten(&path, 5.0);
        let fine = flatten(&path, 0.05);
        assert!(fine.point_count() > coarse.point_count());
        assert!(coarse.point_count() > 2);
    }

    #[test]
    fn test_empty_path() {
        let set = flatten(&Path::new(), DEFAULT_FLATTEN_TOLERANCE);
        assert!(set.is_empty());
    }
}
