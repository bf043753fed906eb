//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom factor applied for one zoom-in wheel step.
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Zoom factor applied for one zoom-out wheel step.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between device coordinates and document coordinates:
/// `document = (device - offset) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in device pixels.
    pub offset: Vec2,
    /// Current uniform zoom factor.
    pub scale: f64,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts document coordinates to device coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Convert a device point to document coordinates.
    pub fn to_document(&self, device_point: Point) -> Point {
        Point::new(
            (device_point.x - self.offset.x) / self.scale,
            (device_point.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a document point to device coordinates.
    pub fn to_device(&self, document_point: Point) -> Point {
        self.transform() * document_point
    }

    /// Pan the camera by a delta in device pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given device point fixed.
    pub fn zoom_at(&mut self, device_point: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        // Document point under the anchor before zoom
        let document_point = self.to_document(device_point);

        self.scale = new_scale;

        // Adjust offset so document_point stays at device_point
        let new_device = self.to_device(document_point);
        self.offset += device_point - new_device;
    }

    /// Apply one wheel step anchored at the center of the viewport.
    ///
    /// Positive `delta_y` zooms out, negative zooms in, zero does nothing.
    pub fn wheel(&mut self, delta_y: f64, viewport: Size) {
        let factor = if delta_y > 0.0 {
            ZOOM_OUT_FACTOR
        } else if delta_y < 0.0 {
            ZOOM_IN_FACTOR
        } else {
            return;
        };
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.zoom_at(center, factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_document_identity() {
        let camera = Camera::new();
        let device = Point::new(100.0, 200.0);
        let document = camera.to_document(device);
        assert!((document.x - device.x).abs() < f64::EPSILON);
        assert!((document.y - device.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_document_with_offset_and_scale() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.scale = 2.0;
        let document = camera.to_document(Point::new(150.0, 300.0));
        assert!((document.x - 50.0).abs() < f64::EPSILON);
        assert!((document.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let document = camera.to_document(original);
        let back = camera.to_device(document);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.scale - camera.min_scale).abs() < f64::EPSILON);

        camera.scale = 1.0;
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.scale - camera.max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zoom_out_step() {
        let mut camera = Camera::new();
        camera.wheel(100.0, Size::new(800.0, 600.0));
        assert!((camera.scale - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_zoom_in_step() {
        let mut camera = Camera::new();
        camera.wheel(-3.0, Size::new(800.0, 600.0));
        assert!((camera.scale - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_zero_delta_noop() {
        let mut camera = Camera::new();
        camera.wheel(0.0, Size::new(800.0, 600.0));
        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn test_repeated_zoom_out_stops_at_minimum() {
        let mut camera = Camera::new();
        for _ in 0..200 {
            camera.wheel(1.0, Size::new(800.0, 600.0));
        }
        assert!(camera.scale >= 0.1);
        assert!((camera.scale - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_keeps_viewport_center_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(25.0, -40.0);
        let viewport = Size::new(800.0, 600.0);
        let center = Point::new(400.0, 300.0);
        let before = camera.to_document(center);
        camera.wheel(-1.0, viewport);
        let after = camera.to_document(center);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
