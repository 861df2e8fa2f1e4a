//! Drawable elements and their factory logic.

use crate::style::Style;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// Kind-specific payload of an element.
///
/// The tag serializes as the element's `"type"` field, keeping the wire
/// format a single flat object per element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    Text { text: String },
    Freedraw { points: Vec<Point> },
}

impl ElementKind {
    /// Wire/display name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Diamond => "diamond",
            ElementKind::Line => "line",
            ElementKind::Arrow => "arrow",
            ElementKind::Text { .. } => "text",
            ElementKind::Freedraw { .. } => "freedraw",
        }
    }
}

/// One drawable primitive.
///
/// `(x1,y1)`/`(x2,y2)` is the anchor box for every kind except freedraw,
/// whose authoritative bounds come from its recorded points. Deleting an
/// element never removes it from the scene; it stays as a tombstone with
/// `is_deleted` set so history snapshots keep referring to consistent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(flatten)]
    pub style: Style,
    pub is_deleted: bool,
    pub locked: bool,
    pub group_ids: Vec<Uuid>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element with a fresh id anchored at the given box.
    pub fn new(kind: ElementKind, x1: f64, y1: f64, x2: f64, y2: f64, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            x1,
            y1,
            x2,
            y2,
            style,
            is_deleted: false,
            locked: false,
            group_ids: Vec::new(),
            kind,
        }
    }

    /// Single-line text element.
    ///
    /// The box is derived from approximate glyph metrics (0.6 em advance,
    /// one line of height plus leading); there is no real text shaping.
    pub fn text(origin: Point, text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        let font_size = f64::from(style.font_size);
        let x2 = origin.x + text.chars().count() as f64 * font_size * 0.6;
        let y2 = origin.y + font_size + 10.0;
        Self::new(ElementKind::Text { text }, origin.x, origin.y, x2, y2, style)
    }

    /// Freehand stroke seeded with the given points.
    pub fn freedraw(origin: Point, points: Vec<Point>, style: Style) -> Self {
        Self::new(
            ElementKind::Freedraw { points },
            origin.x,
            origin.y,
            origin.x,
            origin.y,
            style,
        )
    }

    /// Move the element by `delta` scene units.
    ///
    /// Freedraw strokes move every recorded point along with the anchor box.
    pub fn translate(&mut self, delta: Vec2) {
        self.x1 += delta.x;
        self.y1 += delta.y;
        self.x2 += delta.x;
        self.y2 += delta.y;
        if let ElementKind::Freedraw { points } = &mut self.kind {
            for p in points.iter_mut() {
                *p += delta;
            }
        }
    }
}
