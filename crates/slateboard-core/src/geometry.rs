//! Pure geometry helpers shared by hit-testing and rendering.

use crate::element::{Element, ElementKind};
use kurbo::{Point, Rect};

/// Hit tolerance in scene units for stroke-like elements.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Minimum bounds padding in scene units.
const MIN_BOUNDS_PADDING: f64 = 5.0;

/// Distance from `p` to the segment `ab`.
///
/// Perpendicular distance when the projection of `p` falls within the
/// segment, otherwise distance to the nearest endpoint.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq < f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Padded bounding box of an element.
///
/// Freedraw bounds come from the recorded point extrema, falling back to the
/// anchor box while no points exist. Every other kind uses the normalized
/// anchor box. A padding of `max(strokeWidth, 5)` is added on all sides so
/// thin strokes stay selectable.
pub fn element_bounds(element: &Element) -> Rect {
    let raw = match &element.kind {
        ElementKind::Freedraw { points } if !points.is_empty() => {
            let mut min_x = f64::INFINITY;
            let mut min_y = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            for p in points {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
            Rect::new(min_x, min_y, max_x, max_y)
        }
        _ => Rect::from_points(
            Point::new(element.x1, element.y1),
            Point::new(element.x2, element.y2),
        ),
    };
    let padding = f64::from(element.style.stroke_width).max(MIN_BOUNDS_PADDING);
    raw.inflate(padding, padding)
}

/// Whether `p` falls inside the ellipse inscribed in `bounds`.
///
/// `p` is normalized into unit-circle space centered on the box with radii
/// equal to the half-extents; inside iff the normalized squared distance
/// is at most 1.
pub fn point_in_ellipse(p: Point, bounds: Rect) -> bool {
    let center = bounds.center();
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (p.x - center.x) / rx;
    let ny = (p.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}
