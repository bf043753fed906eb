//! Shape definitions for the canvas.

mod ellipse;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("unsupported color length: {0}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0}")]
    BadDigit(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn green() -> Self {
        Self::new(0, 255, 0, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Result<Self, ColorParseError> {
        let hex = color
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(color.to_string()))?;
        let digit = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(color.to_string()))
        };
        if !hex.is_ascii() {
            return Err(ColorParseError::BadDigit(color.to_string()));
        }
        match hex.len() {
            3 => Ok(Self::new(
                digit(&hex[0..1])? * 17,
                digit(&hex[1..2])? * 17,
                digit(&hex[2..3])? * 17,
                255,
            )),
            6 => Ok(Self::new(
                digit(&hex[0..2])?,
                digit(&hex[2..4])?,
                digit(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                digit(&hex[0..2])?,
                digit(&hex[2..4])?,
                digit(&hex[4..6])?,
                digit(&hex[6..8])?,
            )),
            _ => Err(ColorParseError::BadLength(color.to_string())),
        }
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not fully opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color.
    pub fill_color: SerializableColor,
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in document units. Always at least 1.
    pub stroke_width: u32,
}

impl ShapeStyle {
    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Color {
        self.fill_color.into()
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: SerializableColor::green(),
            stroke_color: SerializableColor::black(),
            stroke_width: 2,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Normalize a signed extent starting at `origin` to `(min, max)`.
pub(crate) fn span(origin: f64, extent: f64) -> (f64, f64) {
    let end = origin + extent;
    (origin.min(end), origin.max(end))
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Document-space anchor point.
    fn position(&self) -> Point;

    /// Signed width and height.
    fn extent(&self) -> (f64, f64);

    /// Normalized bounding box in document coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in document coordinates) lies inside this shape.
    fn hit_test(&self, point: Point) -> bool;

    /// Outline path used for fill and stroke. Empty for shapes drawn as glyphs.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Discriminant of a [`Shape`], also used to pick the drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Text,
}

impl ShapeKind {
    /// Short label used for layer names.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Ellipse => "circle",
            ShapeKind::Text => "text",
        }
    }
}

/// Partial set of fields merged into a shape by an update.
///
/// `None` leaves the field untouched. A zero stroke width and a text payload
/// on a non-text shape are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: Option<u32>,
    pub text: Option<String>,
}

impl ShapeUpdate {
    /// An update that moves the anchor to `position`.
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    /// An update that replaces the text payload.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// An update that changes the fill color.
    pub fn fill(color: SerializableColor) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    /// An update that changes the stroke width.
    pub fn stroke_width(width: u32) -> Self {
        Self {
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Check whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
}

impl Shape {
    /// Create a shape of the given kind anchored at `position` with a fresh id.
    pub fn new(kind: ShapeKind, position: Point, width: f64, height: f64) -> Self {
        Self::with_id(Uuid::new_v4(), kind, position, width, height)
    }

    /// Create a shape of the given kind with an explicit id.
    pub fn with_id(
        id: ShapeId,
        kind: ShapeKind,
        position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        let style = ShapeStyle::default();
        match kind {
            ShapeKind::Rectangle => {
                Shape::Rectangle(Rectangle::reconstruct(id, position, width, height, style))
            }
            ShapeKind::Ellipse => {
                Shape::Ellipse(Ellipse::reconstruct(id, position, width, height, style))
            }
            ShapeKind::Text => Shape::Text(Text::reconstruct(
                id,
                position,
                width,
                height,
                None,
                style,
            )),
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Ellipse(s) => s.position(),
            Shape::Text(s) => s.position(),
        }
    }

    pub fn extent(&self) -> (f64, f64) {
        match self {
            Shape::Rectangle(s) => s.extent(),
            Shape::Ellipse(s) => s.extent(),
            Shape::Text(s) => s.extent(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Ellipse(s) => s.hit_test(point),
            Shape::Text(s) => s.hit_test(point),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Ellipse(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Text(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
        }
    }

    /// Get the text payload if this shape is a text shape.
    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Text(t) => t.content.as_deref(),
            _ => None,
        }
    }

    fn set_geometry(&mut self, position: Point, (width, height): (f64, f64)) {
        match self {
            Shape::Rectangle(s) => {
                s.position = position;
                s.width = width;
                s.height = height;
            }
            Shape::Ellipse(s) => {
                s.position = position;
                s.width = width;
                s.height = height;
            }
            Shape::Text(s) => {
                s.position = position;
                s.width = width;
                s.height = height;
            }
        }
    }

    /// Merge an update into this shape. Returns true if anything changed.
    pub fn apply(&mut self, update: &ShapeUpdate) -> bool {
        let before = self.clone();

        let position = self.position();
        let (width, height) = self.extent();
        self.set_geometry(
            Point::new(update.x.unwrap_or(position.x), update.y.unwrap_or(position.y)),
            (update.width.unwrap_or(width), update.height.unwrap_or(height)),
        );

        let style = self.style_mut();
        if let Some(fill) = update.fill {
            style.fill_color = fill;
        }
        if let Some(stroke) = update.stroke {
            style.stroke_color = stroke;
        }
        if let Some(stroke_width) = update.stroke_width.filter(|w| *w > 0) {
            style.stroke_width = stroke_width;
        }

        if let (Shape::Text(t), Some(text)) = (&mut *self, &update.text) {
            t.content = Some(text.clone());
        }

        *self != before
    }
}
