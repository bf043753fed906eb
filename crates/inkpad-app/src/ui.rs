//! Actions the host UI sends to the application.

use inkpad_core::input::{KeyPress, PointerEvent};
use inkpad_core::shapes::{ShapeId, ShapeUpdate};
use inkpad_core::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Actions that can be triggered from the UI.
///
/// Serialized with an `"action"` tag so a session can be replayed from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    /// Change the current tool.
    SetTool { tool: ToolKind },
    /// Select a shape (from the layer list), or clear with `null`.
    SelectShape { id: Option<ShapeId> },
    /// Select the layer at `index` in the layer list (0 = topmost).
    SelectLayer { index: usize },
    /// Show or hide a layer.
    ToggleLayerVisibility { id: ShapeId },
    /// Lock or unlock a layer against pointer input.
    ToggleLayerLock { id: ShapeId },
    /// Merge fields into a shape.
    UpdateShape { id: ShapeId, update: ShapeUpdate },
    /// Merge fields into the selected shape.
    UpdateSelected { update: ShapeUpdate },
    /// Change the fill color of the selected shape and of new shapes.
    SetFillColor { color: String },
    /// Change the stroke color of the selected shape and of new shapes.
    SetStrokeColor { color: String },
    /// Change the stroke width of the selected shape and of new shapes.
    SetStrokeWidth { width: u32 },
    /// Delete a shape.
    DeleteShape { id: ShapeId },
    /// Delete the selected shape.
    DeleteSelected,
    /// Bring a shape one step forward.
    MoveShapeUp { id: ShapeId },
    /// Send a shape one step backward.
    MoveShapeDown { id: ShapeId },
    Undo,
    Redo,
    ToggleGrid,
    ToggleSnap,
    SetGridSize { size: f64 },
    /// Zoom by one wheel step.
    Wheel { delta_y: f64 },
    /// Resize the live viewport.
    SetViewportSize { width: f64, height: f64 },
    /// Pointer input in device coordinates.
    Pointer { event: PointerEvent },
    /// Keyboard input.
    Key(KeyPress),
    /// Open a text edit for the text shape under the pointer.
    BeginTextEdit { position: Point },
    /// Finish the open text edit; `null` cancels.
    CommitTextEdit { text: Option<String> },
    /// Export the canvas as a PNG file.
    ExportPng { path: PathBuf },
}
