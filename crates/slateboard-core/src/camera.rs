//! Camera transform between screen space and scene space.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pan/zoom state mapping scene coordinates to screen coordinates.
///
/// `x,y` is the screen-space translation offset and `zoom` the scale
/// factor. The camera is owned by the session and mutated only through the
/// pan/zoom operations here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Camera {
    pub const MIN_ZOOM: f64 = 0.1;
    pub const MAX_ZOOM: f64 = 5.0;
    /// Step used by the zoom-in/zoom-out controls.
    const ZOOM_STEP: f64 = 1.2;
    /// Screen margin kept around content by `fit_bounds`.
    const FIT_PADDING: f64 = 50.0;

    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }

    /// Scene-to-screen affine for renderers.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y)) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to scene coordinates.
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.x) / self.zoom,
            (screen.y - self.y) / self.zoom,
        )
    }

    /// Convert a scene point to screen coordinates.
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point::new(scene.x * self.zoom + self.x, scene.y * self.zoom + self.y)
    }

    /// Translate by a screen-space delta. Zoom is unaffected.
    pub fn pan(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Scale by `factor`, keeping the scene point under `screen` fixed.
    ///
    /// The zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]` and the offset is
    /// corrected so the cursor stays anchored on the same scene point.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let ratio = new_zoom / self.zoom;
        self.x = screen.x - (screen.x - self.x) * ratio;
        self.y = screen.y - (screen.y - self.y) * ratio;
        self.zoom = new_zoom;
    }

    /// Step zoom in without recentering.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * Self::ZOOM_STEP).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Step zoom out without recentering.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / Self::ZOOM_STEP).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Frame `bounds` (scene space) centered in `viewport`, never zooming
    /// in past 100%.
    pub fn fit_bounds(&mut self, bounds: Rect, viewport: Size) {
        let content_w = bounds.width();
        let content_h = bounds.height();
        if content_w <= 0.0 || content_h <= 0.0 {
            return;
        }
        let zoom_x = (viewport.width - 2.0 * Self::FIT_PADDING) / content_w;
        let zoom_y = (viewport.height - 2.0 * Self::FIT_PADDING) / content_h;
        let new_zoom = zoom_x
            .min(zoom_y)
            .min(1.0)
            .clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let center = bounds.center();
        self.x = viewport.width / 2.0 - center.x * new_zoom;
        self.y = viewport.height / 2.0 - center.y * new_zoom;
        self.zoom = new_zoom;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let camera = Camera::new();
        let p = Point::new(100.0, 200.0);
        assert_eq!(camera.screen_to_scene(p), p);
        assert_eq!(camera.scene_to_screen(p), p);
    }

    #[test]
    fn test_screen_to_scene_with_offset_and_zoom() {
        let camera = Camera {
            x: 50.0,
            y: -30.0,
            zoom: 2.0,
        };
        let scene = camera.screen_to_scene(Point::new(150.0, 70.0));
        assert!((scene.x - 50.0).abs() < 1e-10);
        assert!((scene.y - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let camera = Camera {
            x: 123.0,
            y: -456.0,
            zoom: 2.5,
        };
        let p = Point::new(78.9, -12.3);
        let back = camera.screen_to_scene(camera.scene_to_screen(p));
        assert!((back.x - p.x).abs() < 1e-10);
        assert!((back.y - p.y).abs() < 1e-10);
    }

    #[test]
    fn test_pan_leaves_zoom() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, -20.0));
        assert_eq!(camera.x, 10.0);
        assert_eq!(camera.y, -20.0);
        assert_eq!(camera.zoom, 1.0);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 100.0);
        assert_eq!(camera.zoom, Camera::MAX_ZOOM);
        camera.zoom_at(Point::ZERO, 1e-6);
        assert_eq!(camera.zoom, Camera::MIN_ZOOM);
    }

    #[test]
    fn test_zoom_at_anchors_cursor() {
        let mut camera = Camera {
            x: 40.0,
            y: -10.0,
            zoom: 1.5,
        };
        let cursor = Point::new(320.0, 240.0);
        let before = camera.screen_to_scene(cursor);
        camera.zoom_at(cursor, 1.3);
        let after = camera.screen_to_scene(cursor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_scenario() {
        // Default camera, wheel zoom in at (100,100) with factor 1.1.
        let mut camera = Camera::new();
        let cursor = Point::new(100.0, 100.0);
        let before = camera.screen_to_scene(cursor);
        camera.zoom_at(cursor, 1.1);
        assert!((camera.zoom - 1.1).abs() < 1e-10);
        let after = camera.screen_to_scene(cursor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_buttons_clamp() {
        let mut camera = Camera::new();
        for _ in 0..20 {
            camera.zoom_in();
        }
        assert_eq!(camera.zoom, Camera::MAX_ZOOM);
        for _ in 0..40 {
            camera.zoom_out();
        }
        assert_eq!(camera.zoom, Camera::MIN_ZOOM);
        // Buttons never recenter.
        assert_eq!(camera.x, 0.0);
        assert_eq!(camera.y, 0.0);
    }

    #[test]
    fn test_fit_bounds_centers_content() {
        let mut camera = Camera::new();
        let viewport = Size::new(800.0, 600.0);
        camera.fit_bounds(Rect::new(0.0, 0.0, 100.0, 100.0), viewport);
        // Content fits at 100% because it is smaller than the viewport.
        assert_eq!(camera.zoom, 1.0);
        let center_screen = camera.scene_to_screen(Point::new(50.0, 50.0));
        assert!((center_screen.x - 400.0).abs() < 1e-10);
        assert!((center_screen.y - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_bounds_zooms_out_for_large_content() {
        let mut camera = Camera::new();
        let viewport = Size::new(800.0, 600.0);
        camera.fit_bounds(Rect::new(0.0, 0.0, 1400.0, 500.0), viewport);
        // Width is the limiting axis: (800 - 100) / 1400 = 0.5.
        assert!((camera.zoom - 0.5).abs() < 1e-10);
    }
}
