//! Tool system for the canvas.

use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A drawn shape is only committed when both extents exceed this size.
pub const MIN_SHAPE_EXTENT: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Text,
    Pan,
}

impl ToolKind {
    /// The shape kind this tool draws, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            ToolKind::Text => Some(ShapeKind::Text),
            ToolKind::Select | ToolKind::Pan => None,
        }
    }

    /// Display name for UI.
    pub fn display_name(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Circle",
            ToolKind::Text => "Text",
            ToolKind::Pan => "Hand",
        }
    }
}

/// State of a pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Drawing a new shape with a drawing tool.
    Drawing {
        /// Snapped document point where the gesture started.
        anchor: Point,
        /// Latest snapped document point.
        current: Point,
        /// Id the shape receives if the gesture is committed.
        preview_id: ShapeId,
    },
    /// Moving the selected shape.
    DraggingSelection {
        /// Snapped document point of the previous step.
        anchor: Point,
    },
    /// Panning the viewport.
    Panning {
        /// Previous device point.
        last: Point,
    },
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Style applied to new shapes.
    pub current_style: ShapeStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager that styles new shapes with `style`.
    pub fn with_style(style: ShapeStyle) -> Self {
        Self {
            current_style: style,
            ..Self::default()
        }
    }

    /// Set the current tool. Any gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Start drawing at a snapped document point.
    pub fn begin_drawing(&mut self, anchor: Point) {
        self.state = ToolState::Drawing {
            anchor,
            current: anchor,
            preview_id: Uuid::new_v4(),
        };
    }

    /// Start dragging the selection from a snapped document point.
    pub fn begin_drag(&mut self, anchor: Point) {
        self.state = ToolState::DraggingSelection { anchor };
    }

    /// Start panning from a device point.
    pub fn begin_pan(&mut self, device_point: Point) {
        self.state = ToolState::Panning { last: device_point };
    }

    /// Update the live end point of a drawing gesture.
    pub fn update_drawing(&mut self, point: Point) {
        if let ToolState::Drawing { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// End a drawing gesture at `point` and return the shape to commit, if
    /// the gesture was large enough.
    pub fn finish_drawing(&mut self, point: Point) -> Option<Shape> {
        let ToolState::Drawing {
            anchor, preview_id, ..
        } = self.state
        else {
            return None;
        };
        self.state = ToolState::Idle;

        let width = point.x - anchor.x;
        let height = point.y - anchor.y;
        if width.abs() > MIN_SHAPE_EXTENT && height.abs() > MIN_SHAPE_EXTENT {
            self.create_shape(preview_id, anchor, point)
        } else {
            log::debug!("discarding {width}x{height} gesture below minimum size");
            None
        }
    }

    /// Return to idle without producing anything.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Get the preview shape for the current drawing gesture.
    pub fn preview_shape(&self) -> Option<Shape> {
        if let ToolState::Drawing {
            anchor,
            current,
            preview_id,
        } = self.state
        {
            self.create_shape(preview_id, anchor, current)
        } else {
            None
        }
    }

    /// Create a shape spanning from `start` to `end` (extents stay signed).
    fn create_shape(&self, id: ShapeId, start: Point, end: Point) -> Option<Shape> {
        let kind = self.current_tool.shape_kind()?;
        let mut shape = Shape::with_id(id, kind, start, end.x - start.x, end.y - start.y);
        *shape.style_mut() = self.current_style.clone();
        if let Shape::Text(text) = &mut shape {
            text.content = Some(Text::PLACEHOLDER.to_string());
        }
        Some(shape)
    }
}
