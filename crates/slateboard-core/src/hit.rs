//! Topmost-element resolution for pointer picking.

use crate::element::{Element, ElementKind};
use crate::geometry::{self, HIT_TOLERANCE};
use kurbo::{Point, Rect};

/// Resolve the topmost live element under `point`.
///
/// Scans in reverse insertion order so later-drawn elements win, mirroring
/// render order where they occlude earlier ones. Tombstoned elements are
/// never returned.
pub fn top_element_at(point: Point, elements: &[Element]) -> Option<&Element> {
    elements
        .iter()
        .rev()
        .filter(|e| !e.is_deleted)
        .find(|e| hits_element(point, e))
}

/// Kind-specific containment test.
///
/// Stroke-like kinds use a distance tolerance instead of their bounding box
/// so a thin diagonal line is not selectable across its whole enclosing
/// rectangle. Text uses the literal anchor box without padding.
pub fn hits_element(point: Point, element: &Element) -> bool {
    match &element.kind {
        ElementKind::Text { .. } => {
            point.x >= element.x1
                && point.x <= element.x2
                && point.y >= element.y1
                && point.y <= element.y2
        }
        ElementKind::Line | ElementKind::Arrow => {
            geometry::distance_to_segment(
                point,
                Point::new(element.x1, element.y1),
                Point::new(element.x2, element.y2),
            ) <= HIT_TOLERANCE
        }
        ElementKind::Freedraw { points } => {
            points.iter().any(|p| p.distance(point) <= HIT_TOLERANCE)
        }
        ElementKind::Ellipse => geometry::point_in_ellipse(point, geometry::element_bounds(element)),
        ElementKind::Rectangle | ElementKind::Diamond => {
            inside(point, geometry::element_bounds(element))
        }
    }
}

/// Strict interior test: points on the padded boundary do not hit.
fn inside(p: Point, bounds: Rect) -> bool {
    p.x > bounds.x0 && p.x < bounds.x1 && p.y > bounds.y0 && p.y < bounds.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn element(kind: ElementKind, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::new(kind, x1, y1, x2, y2, Style::default())
    }

    #[test]
    fn test_rectangle_hit_and_miss() {
        let rect = element(ElementKind::Rectangle, 10.0, 10.0, 50.0, 50.0);
        let elements = vec![rect];
        assert!(top_element_at(Point::new(30.0, 30.0), &elements).is_some());
        assert!(top_element_at(Point::new(5.0, 5.0), &elements).is_none());
    }

    #[test]
    fn test_rectangle_padding_keeps_edges_selectable() {
        let rect = element(ElementKind::Rectangle, 10.0, 10.0, 50.0, 50.0);
        let elements = vec![rect];
        // One unit outside the raw box, within the 5 unit padding.
        assert!(top_element_at(Point::new(9.0, 30.0), &elements).is_some());
        assert!(top_element_at(Point::new(54.0, 30.0), &elements).is_some());
    }

    #[test]
    fn test_topmost_wins_overlap() {
        let below = element(ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        let above = element(ElementKind::Rectangle, 50.0, 50.0, 150.0, 150.0);
        let above_id = above.id;
        let elements = vec![below, above];

        let hit = top_element_at(Point::new(75.0, 75.0), &elements).unwrap();
        assert_eq!(hit.id, above_id);
    }

    #[test]
    fn test_tombstones_are_skipped() {
        let mut top = element(ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        top.is_deleted = true;
        let below = element(ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        let below_id = below.id;
        let elements = vec![below, top];

        let hit = top_element_at(Point::new(50.0, 50.0), &elements).unwrap();
        assert_eq!(hit.id, below_id);

        let only_deleted: Vec<Element> = elements
            .into_iter()
            .map(|mut e| {
                e.is_deleted = true;
                e
            })
            .collect();
        assert!(top_element_at(Point::new(50.0, 50.0), &only_deleted).is_none());
    }

    #[test]
    fn test_empty_scene_is_a_miss() {
        assert!(top_element_at(Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_line_uses_distance_not_bounds() {
        let line = element(ElementKind::Line, 0.0, 0.0, 100.0, 100.0);
        let elements = vec![line];
        // On the line.
        assert!(top_element_at(Point::new(50.0, 50.0), &elements).is_some());
        // Near the line, within tolerance.
        assert!(top_element_at(Point::new(53.0, 47.0), &elements).is_some());
        // Inside the bounding box but far from the diagonal.
        assert!(top_element_at(Point::new(90.0, 10.0), &elements).is_none());
    }

    #[test]
    fn test_text_uses_literal_box() {
        let text = element(ElementKind::Text { text: "hi".into() }, 10.0, 10.0, 34.0, 40.0);
        let elements = vec![text];
        assert!(top_element_at(Point::new(10.0, 10.0), &elements).is_some());
        assert!(top_element_at(Point::new(34.0, 40.0), &elements).is_some());
        // No padding: just outside the box misses.
        assert!(top_element_at(Point::new(35.0, 20.0), &elements).is_none());
        assert!(top_element_at(Point::new(9.5, 20.0), &elements).is_none());
    }

    #[test]
    fn test_freedraw_hits_near_recorded_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)];
        let stroke = Element::freedraw(Point::new(0.0, 0.0), points, Style::default());
        let elements = vec![stroke];
        assert!(top_element_at(Point::new(5.0, 5.0), &elements).is_some());
        // Between the two recorded points but farther than the tolerance
        // from both.
        assert!(top_element_at(Point::new(25.0, 0.0), &elements).is_none());
    }

    #[test]
    fn test_ellipse_rejects_box_corners() {
        let ellipse = element(ElementKind::Ellipse, 0.0, 0.0, 100.0, 60.0);
        let elements = vec![ellipse];
        assert!(top_element_at(Point::new(50.0, 30.0), &elements).is_some());
        // Corner of the padded box, outside the inscribed ellipse.
        assert!(top_element_at(Point::new(2.0, 2.0), &elements).is_none());
    }

    #[test]
    fn test_diamond_uses_padded_box() {
        let diamond = element(ElementKind::Diamond, 20.0, 20.0, 60.0, 60.0);
        let elements = vec![diamond];
        assert!(top_element_at(Point::new(40.0, 40.0), &elements).is_some());
        assert!(top_element_at(Point::new(10.0, 10.0), &elements).is_none());
    }
}
