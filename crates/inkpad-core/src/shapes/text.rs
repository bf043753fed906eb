//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, span};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single line of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Baseline origin.
    pub position: Point,
    /// Signed width of the hit box.
    pub width: f64,
    /// Signed height of the drawing gesture (not used for hit-testing).
    pub height: f64,
    /// The text content; `None` until labeled.
    pub content: Option<String>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Font size in document units used for drawing.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Fixed line height used for the hit box above the baseline.
    pub const LINE_HEIGHT: f64 = 20.0;

    /// Placeholder content assigned to text drawn with the text tool.
    pub const PLACEHOLDER: &'static str = "Double click to edit";

    /// Create a new text shape.
    pub fn new(position: Point, width: f64, content: Option<String>) -> Self {
        Self::reconstruct(
            Uuid::new_v4(),
            position,
            width,
            0.0,
            content,
            ShapeStyle::default(),
        )
    }

    /// Reconstruct a text shape with a specific ID.
    pub(crate) fn reconstruct(
        id: ShapeId,
        position: Point,
        width: f64,
        height: f64,
        content: Option<String>,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            position,
            width,
            height,
            content,
            style,
        }
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn extent(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn bounds(&self) -> Rect {
        let (x0, x1) = span(self.position.x, self.width);
        Rect::new(x0, self.position.y - Self::LINE_HEIGHT, x1, self.position.y)
    }

    fn hit_test(&self, point: Point) -> bool {
        let rect = self.bounds();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    fn to_path(&self) -> BezPath {
        BezPath::new()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_box_above_baseline() {
        let text = Text::new(Point::new(10.0, 50.0), 100.0, Some("hi".to_string()));
        assert!(text.hit_test(Point::new(20.0, 40.0)));
        assert!(text.hit_test(Point::new(10.0, 30.0)));
        assert!(!text.hit_test(Point::new(20.0, 55.0)));
        assert!(!text.hit_test(Point::new(20.0, 29.0)));
    }

    #[test]
    fn test_hit_box_ignores_gesture_height() {
        let mut text = Text::new(Point::new(0.0, 100.0), 50.0, None);
        text.height = 80.0;
        assert!(!text.hit_test(Point::new(10.0, 150.0)));
        assert!(text.hit_test(Point::new(10.0, 90.0)));
    }

    #[test]
    fn test_negative_width() {
        let text = Text::new(Point::new(100.0, 100.0), -60.0, None);
        assert!(text.hit_test(Point::new(50.0, 90.0)));
        assert!(!text.hit_test(Point::new(110.0, 90.0)));
    }

    #[test]
    fn test_empty_path() {
        let text = Text::new(Point::ZERO, 10.0, None);
        assert!(text.to_path().elements().is_empty());
    }
}
