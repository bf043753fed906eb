//! Selection decoration geometry.
//!
//! Handles are decorative: nothing hit-tests or drags them.

use crate::shapes::Shape;
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Distance between a shape's bounds and its selection outline.
pub const SELECTION_PADDING: f64 = 5.0;
/// Handle marker size in device pixels.
pub const HANDLE_SIZE: f64 = 8.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    Edge(Edge),
}

/// A selection handle marker with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in document coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }
}

/// Dashed outline drawn around the selected shape, mirroring its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutline {
    Rect(Rect),
    Circle(Circle),
}

impl SelectionOutline {
    /// Bounding box of the outline.
    pub fn bounds(&self) -> Rect {
        match self {
            SelectionOutline::Rect(r) => *r,
            SelectionOutline::Circle(c) => c.bounding_box(),
        }
    }

    /// Path for stroking.
    pub fn to_path(&self) -> BezPath {
        match self {
            SelectionOutline::Rect(r) => r.to_path(0.1),
            SelectionOutline::Circle(c) => c.to_path(0.1),
        }
    }
}

/// Outline offset [`SELECTION_PADDING`] outward from the shape.
pub fn selection_outline(shape: &Shape) -> SelectionOutline {
    match shape {
        Shape::Ellipse(e) => {
            SelectionOutline::Circle(Circle::new(e.center(), e.radius() + SELECTION_PADDING))
        }
        Shape::Rectangle(_) | Shape::Text(_) => {
            SelectionOutline::Rect(shape.bounds().inflate(SELECTION_PADDING, SELECTION_PADDING))
        }
    }
}

/// Corner and cardinal handle markers around the selection outline.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    let b = selection_outline(shape).bounds();
    let center = b.center();
    vec![
        Handle::new(Point::new(b.x0, b.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(b.x1, b.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(b.x0, b.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(b.x1, b.y1), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(Point::new(center.x, b.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(b.x1, center.y), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(center.x, b.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(b.x0, center.y), HandleKind::Edge(Edge::Left)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    #[test]
    fn test_rect_outline_padded() {
        let shape = Shape::new(ShapeKind::Rectangle, Point::new(100.0, 100.0), -50.0, 40.0);
        let SelectionOutline::Rect(r) = selection_outline(&shape) else {
            panic!("expected rect outline");
        };
        assert_eq!(r, Rect::new(45.0, 95.0, 105.0, 145.0));
    }

    #[test]
    fn test_ellipse_outline_is_circle() {
        let shape = Shape::new(ShapeKind::Ellipse, Point::new(0.0, 0.0), 40.0, 10.0);
        let SelectionOutline::Circle(c) = selection_outline(&shape) else {
            panic!("expected circle outline");
        };
        assert_eq!(c.center, Point::new(20.0, 5.0));
        assert!((c.radius - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_outline_uses_line_box() {
        let shape = Shape::new(ShapeKind::Text, Point::new(0.0, 50.0), 80.0, 0.0);
        let outline = selection_outline(&shape);
        assert_eq!(outline.bounds(), Rect::new(-5.0, 25.0, 85.0, 55.0));
    }

    #[test]
    fn test_eight_handles() {
        let shape = Shape::new(ShapeKind::Rectangle, Point::new(5.0, 5.0), 10.0, 10.0);
        let handles = get_handles(&shape);
        assert_eq!(handles.len(), 8);
        assert_eq!(handles[0].position, Point::new(0.0, 0.0));
        assert_eq!(handles[3].position, Point::new(20.0, 20.0));
        assert_eq!(handles[4].position, Point::new(10.0, 0.0));
    }
}
