//! Ellipse shape.
//!
//! Drawn and hit-tested as a circle: the radius comes from `|width| / 2`
//! only, and `height` merely shifts the center.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse shape described by its (signed) bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Anchor corner of the bounding box.
    pub position: Point,
    /// Signed width; its magnitude is the diameter.
    pub width: f64,
    /// Signed height.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self::reconstruct(Uuid::new_v4(), position, width, height, ShapeStyle::default())
    }

    /// Reconstruct an ellipse with a specific ID.
    pub(crate) fn reconstruct(
        id: ShapeId,
        position: Point,
        width: f64,
        height: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            position,
            width,
            height,
            style,
        }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Radius of the drawn circle.
    pub fn radius(&self) -> f64 {
        self.width.abs() / 2.0
    }

    /// Get as a kurbo Circle.
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.center(), self.radius())
    }
}

impl ShapeTrait for Ellipse {
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
        let center = self.center();
        let r = self.radius();
        Rect::new(center.x - r, center.y - r, center.x + r, center.y + r)
    }

    fn hit_test(&self, point: Point) -> bool {
        point.distance(self.center()) <= self.radius()
    }

    fn to_path(&self) -> BezPath {
        self.as_circle().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
