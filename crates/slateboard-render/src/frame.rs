//! Scene-to-display-list construction.
//!
//! [`build_frame`] turns a session's scene, camera, and view preferences
//! into an ordered list of paint operations. The host shell replays the
//! list onto its drawing surface: background first, then the grid, then
//! every live element in insertion order, the in-progress element, and
//! finally the selection outlines. Element geometry stays in scene
//! coordinates; the frame carries the camera transform to apply while
//! replaying.

use kurbo::{Affine, BezPath, Ellipse, Line, Point, Rect, Shape, Size};
use peniko::Color;
use slateboard_core::camera::Camera;
use slateboard_core::element::{Element, ElementKind};
use slateboard_core::geometry;
use slateboard_core::session::{Session, Theme};
use slateboard_core::style::{StrokeStyle, TextAlign};

use crate::color::{Rgba, parse_color};

/// Unparseable colors paint as opaque black rather than failing the frame.
fn resolve_color(value: &str) -> Rgba {
    parse_color(value).unwrap_or_else(|_| Rgba::black())
}

const SELECTION_COLOR: &str = "#1971c2";
const SELECTION_WIDTH: f64 = 1.0;
const GRID_COLOR_LIGHT: &str = "#e0e0e0";
const GRID_COLOR_DARK: &str = "#333";
/// Stroke width for grid lines, in screen pixels.
pub const GRID_LINE_WIDTH: f64 = 0.5;
const DASHED_PATTERN: [f64; 2] = [5.0, 5.0];
const DOTTED_PATTERN: [f64; 2] = [2.0, 2.0];
const ARROWHEAD_LENGTH: f64 = 15.0;
const ARROWHEAD_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// One drawing command in scene coordinates.
#[derive(Debug, Clone)]
pub enum PaintOp {
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    Text {
        /// Top-left corner of the text box.
        position: Point,
        content: String,
        font_size: u32,
        font_family: String,
        align: TextAlign,
        color: Color,
    },
}

/// Display list for one redraw.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Surface clear color.
    pub background: Color,
    /// Grid lines in screen coordinates, empty when the grid is off.
    pub grid: Vec<Line>,
    pub grid_color: Color,
    /// Scene-to-screen transform to apply while replaying `ops`.
    pub transform: Affine,
    /// Paint operations in paint order.
    pub ops: Vec<PaintOp>,
}

/// Build the display list for one redraw of `session` at `viewport` size.
pub fn build_frame(session: &Session, viewport: Size) -> Frame {
    let camera = session.camera();
    let prefs = session.prefs();

    let grid = if prefs.show_grid {
        grid_lines(camera, prefs.grid_size, viewport)
    } else {
        Vec::new()
    };

    let mut ops = Vec::new();
    for element in session.scene().live_elements() {
        push_element(&mut ops, element);
    }
    if let Some(current) = session.current_element() {
        push_element(&mut ops, current);
    }
    for element in session.scene().selected_elements() {
        if element.is_deleted {
            continue;
        }
        push_selection_outline(&mut ops, element);
    }

    Frame {
        background: resolve_color(&prefs.view_background_color).into(),
        grid,
        grid_color: grid_color(prefs.theme).into(),
        transform: camera.transform(),
        ops,
    }
}

fn grid_color(theme: Theme) -> Rgba {
    match theme {
        Theme::Light => resolve_color(GRID_COLOR_LIGHT),
        Theme::Dark => resolve_color(GRID_COLOR_DARK),
    }
}

/// Grid lines covering the viewport, spaced `grid_size * zoom` with the
/// origin following the camera offset.
fn grid_lines(camera: &Camera, grid_size: f64, viewport: Size) -> Vec<Line> {
    let scaled = grid_size * camera.zoom;
    if scaled <= 0.0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let start_x = (-camera.x % scaled).floor();
    let start_y = (-camera.y % scaled).floor();

    let mut x = start_x;
    while x < viewport.width {
        lines.push(Line::new((x, 0.0), (x, viewport.height)));
        x += scaled;
    }
    let mut y = start_y;
    while y < viewport.height {
        lines.push(Line::new((0.0, y), (viewport.width, y)));
        y += scaled;
    }
    lines
}

fn push_element(ops: &mut Vec<PaintOp>, element: &Element) {
    let style = &element.style;
    let stroke_color: Color = resolve_color(&style.stroke_color)
        .with_opacity(style.opacity)
        .into();
    let width = f64::from(style.stroke_width);
    let dash = dash_pattern(style.stroke_style);

    match &element.kind {
        ElementKind::Rectangle => {
            let path = anchor_rect(element).to_path(0.1);
            push_shape(ops, path, element, stroke_color, width, dash);
        }
        ElementKind::Ellipse => {
            let rect = anchor_rect(element);
            let radii = (rect.width() / 2.0, rect.height() / 2.0);
            let path = Ellipse::new(rect.center(), radii, 0.0).to_path(0.1);
            push_shape(ops, path, element, stroke_color, width, dash);
        }
        ElementKind::Diamond => {
            let path = diamond_path(anchor_rect(element));
            push_shape(ops, path, element, stroke_color, width, dash);
        }
        ElementKind::Line => {
            let mut path = BezPath::new();
            path.move_to((element.x1, element.y1));
            path.line_to((element.x2, element.y2));
            ops.push(PaintOp::Stroke {
                path,
                color: stroke_color,
                width,
                dash,
            });
        }
        ElementKind::Arrow => {
            ops.push(PaintOp::Stroke {
                path: arrow_path(element),
                color: stroke_color,
                width,
                dash,
            });
        }
        ElementKind::Text { text } => {
            ops.push(PaintOp::Text {
                position: Point::new(element.x1, element.y1),
                content: text.clone(),
                font_size: style.font_size,
                font_family: style.font_family.clone(),
                align: style.text_align,
                color: stroke_color,
            });
        }
        ElementKind::Freedraw { points } => {
            if points.len() < 2 {
                return;
            }
            let mut path = BezPath::new();
            path.move_to(points[0]);
            for point in &points[1..] {
                path.line_to(*point);
            }
            ops.push(PaintOp::Stroke {
                path,
                color: stroke_color,
                width,
                dash,
            });
        }
    }
}

/// Fill (when a background is set) then stroke a closed shape.
fn push_shape(
    ops: &mut Vec<PaintOp>,
    path: BezPath,
    element: &Element,
    stroke_color: Color,
    width: f64,
    dash: Option<[f64; 2]>,
) {
    let background = resolve_color(&element.style.background_color);
    if !background.is_transparent() {
        ops.push(PaintOp::Fill {
            path: path.clone(),
            color: background.with_opacity(element.style.opacity).into(),
        });
    }
    ops.push(PaintOp::Stroke {
        path,
        color: stroke_color,
        width,
        dash,
    });
}

fn push_selection_outline(ops: &mut Vec<PaintOp>, element: &Element) {
    let bounds = geometry::element_bounds(element);
    ops.push(PaintOp::Stroke {
        path: bounds.to_path(0.1),
        color: resolve_color(SELECTION_COLOR).into(),
        width: SELECTION_WIDTH,
        dash: Some(DASHED_PATTERN),
    });
}

fn dash_pattern(style: StrokeStyle) -> Option<[f64; 2]> {
    match style {
        StrokeStyle::Solid => None,
        StrokeStyle::Dashed => Some(DASHED_PATTERN),
        StrokeStyle::Dotted => Some(DOTTED_PATTERN),
    }
}

/// Anchor box normalized so negative drags still produce a proper rect.
fn anchor_rect(element: &Element) -> Rect {
    Rect::from_points(
        Point::new(element.x1, element.y1),
        Point::new(element.x2, element.y2),
    )
}

/// Polygon through the edge midpoints of the anchor box.
fn diamond_path(rect: Rect) -> BezPath {
    let center = rect.center();
    let mut path = BezPath::new();
    path.move_to((center.x, rect.y0));
    path.line_to((rect.x1, center.y));
    path.line_to((center.x, rect.y1));
    path.line_to((rect.x0, center.y));
    path.close_path();
    path
}

/// Shaft plus two arrowhead strokes angled back from the tip.
fn arrow_path(element: &Element) -> BezPath {
    let angle = (element.y2 - element.y1).atan2(element.x2 - element.x1);
    let tip = Point::new(element.x2, element.y2);

    let mut path = BezPath::new();
    path.move_to((element.x1, element.y1));
    path.line_to(tip);
    for side in [-1.0, 1.0] {
        let theta = angle + side * ARROWHEAD_ANGLE;
        path.move_to(tip);
        path.line_to((
            tip.x - ARROWHEAD_LENGTH * theta.cos(),
            tip.y - ARROWHEAD_LENGTH * theta.sin(),
        ));
    }
    path
}
