//! Pointer event handling for tool interactions.
//!
//! All points arriving here are in device coordinates; they are converted
//! to document space (and snapped, where the gesture calls for it) before
//! touching the document.

use crate::canvas::Canvas;
use crate::input::PointerEvent;
use crate::shapes::{Shape, ShapeUpdate};
use crate::tools::{ToolKind, ToolState};
use kurbo::Point;

/// Collaborator that edits the payload of a text shape.
///
/// Returns the new text, or `None` if the user cancelled.
pub trait TextEditor {
    fn edit_text(&mut self, current: Option<&str>) -> Option<String>;
}

impl<F> TextEditor for F
where
    F: FnMut(Option<&str>) -> Option<String>,
{
    fn edit_text(&mut self, current: Option<&str>) -> Option<String> {
        self(current)
    }
}

impl Canvas {
    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Leave { position } => self.pointer_leave(position),
            PointerEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    /// Snapped document point for a device point.
    fn snapped_document_point(&self, device_point: Point) -> Point {
        self.grid.snap(self.to_document_point(device_point))
    }

    /// Pointer pressed.
    pub fn pointer_down(&mut self, device_point: Point) {
        if self.tool_manager.is_active() {
            // A press without a release in between; finish the old gesture first.
            self.pointer_up(device_point);
        }

        match self.tool_manager.current_tool {
            ToolKind::Pan => {
                self.tool_manager.begin_pan(device_point);
                log::debug!("pan started at {device_point:?}");
            }
            ToolKind::Select => {
                let point = self.to_document_point(device_point);
                match self.document.shape_at(point) {
                    Some(id) => {
                        self.select(Some(id));
                        let anchor = self.grid.snap(point);
                        self.tool_manager.begin_drag(anchor);
                        log::debug!("dragging {id} from {anchor:?}");
                    }
                    None => self.clear_selection(),
                }
            }
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Text => {
                let anchor = self.snapped_document_point(device_point);
                self.tool_manager.begin_drawing(anchor);
                log::debug!("drawing started at {anchor:?}");
            }
        }
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, device_point: Point) {
        match self.tool_manager.state {
            ToolState::Idle => {}
            ToolState::Drawing { .. } => {
                let point = self.snapped_document_point(device_point);
                self.tool_manager.update_drawing(point);
            }
            ToolState::DraggingSelection { anchor } => {
                let point = self.snapped_document_point(device_point);
                self.drag_selection(anchor, point);
                self.tool_manager.state = ToolState::DraggingSelection { anchor: point };
            }
            ToolState::Panning { last } => {
                self.camera.pan(device_point - last);
                self.tool_manager.state = ToolState::Panning { last: device_point };
            }
        }
    }

    /// Move the selected shape by `point - anchor`.
    fn drag_selection(&mut self, anchor: Point, point: Point) {
        let delta = point - anchor;
        if delta.hypot2() == 0.0 {
            return;
        }
        let Some(position) = self.selected_shape().map(Shape::position) else {
            return;
        };
        if let Some(id) = self.selection() {
            self.update_shape(id, &ShapeUpdate::position(position + delta));
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, device_point: Point) {
        match self.tool_manager.state {
            ToolState::Drawing { .. } => {
                let point = self.snapped_document_point(device_point);
                if let Some(shape) = self.tool_manager.finish_drawing(point) {
                    let id = shape.id();
                    if self.add_shape(shape) {
                        self.select(Some(id));
                        log::debug!("committed shape {id}");
                    }
                }
            }
            ToolState::DraggingSelection { .. } | ToolState::Panning { .. } => {
                self.tool_manager.cancel();
            }
            ToolState::Idle => {}
        }
    }

    /// Pointer left the canvas. Commits the gesture exactly like a release.
    pub fn pointer_leave(&mut self, device_point: Point) {
        self.pointer_up(device_point);
    }

    /// Double click: edit the text of the topmost text shape under the pointer.
    ///
    /// Returns true if the text was changed.
    pub fn double_click(&mut self, device_point: Point, editor: &mut dyn TextEditor) -> bool {
        let point = self.to_document_point(device_point);
        let Some(id) = self.document.shape_at(point) else {
            return false;
        };
        let Some(Shape::Text(text)) = self.document.get_shape(id) else {
            return false;
        };
        let current = text.content.clone();
        match editor.edit_text(current.as_deref()) {
            Some(new_text) => self.update_shape(id, &ShapeUpdate::text(new_text)),
            None => false,
        }
    }
}
