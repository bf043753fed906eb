//! Canvas document and state management.

use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::history::History;
use crate::shapes::{Shape, ShapeId, ShapeUpdate};
use crate::snap::GridSettings;
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Find the topmost shape containing `point` (in document coordinates).
pub fn hit_test(point: Point, shapes: &[Shape]) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .find(|shape| shape.hit_test(point))
        .map(Shape::id)
}

/// One row of the layer list, derived from the shape order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub shape_id: ShapeId,
    /// Display name such as `"rect 1"`.
    pub name: String,
    /// Hidden layers are neither drawn nor hit.
    pub visible: bool,
    /// Locked layers ignore the pointer.
    pub locked: bool,
}

/// The ordered shape collection plus its history.
///
/// Order is paint order: later shapes are drawn on top. Every mutation of a
/// present shape records exactly one history entry; operations on absent ids
/// and z-order moves at the ends of the stack record nothing.
///
/// Layer visibility and lock flags are view state keyed by id. They are not
/// part of history.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    shapes: Vec<Shape>,
    history: History,
    hidden: HashSet<ShapeId>,
    locked: HashSet<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document whose history keeps at most `limit` entries.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            history: History::new(limit),
            ..Self::default()
        }
    }

    /// Shapes in z-order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Position of a shape in z-order.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Check whether a shape with this id exists.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Append a shape on top. Shapes whose id is already present are rejected.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        let id = shape.id();
        if self.contains(id) {
            log::warn!("rejecting shape with duplicate id {id}");
            return false;
        }
        self.shapes.push(shape);
        log::debug!("added shape {id} ({} total)", self.shapes.len());
        self.history.record(&self.shapes);
        true
    }

    /// Merge `update` into the shape with this id.
    ///
    /// Every update of a present shape records one history entry, even when
    /// no field changes. Returns false only if the id is absent.
    pub fn update_shape(&mut self, id: ShapeId, update: &ShapeUpdate) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) else {
            return false;
        };
        if shape.apply(update) {
            log::debug!("updated shape {id}");
        } else {
            log::debug!("update left shape {id} unchanged");
        }
        self.history.record(&self.shapes);
        true
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        let removed = self.shapes.remove(index);
        log::debug!("removed shape {id}");
        self.history.record(&self.shapes);
        Some(removed)
    }

    /// Move a shape one layer forward (towards front).
    /// Returns true if the shape was moved, false if already at front or absent.
    pub fn move_up(&mut self, id: ShapeId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.shapes.len() => {
                self.shapes.swap(pos, pos + 1);
                self.history.record(&self.shapes);
                true
            }
            _ => false,
        }
    }

    /// Move a shape one layer backward (towards back).
    /// Returns true if the shape was moved, false if already at back or absent.
    pub fn move_down(&mut self, id: ShapeId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                self.shapes.swap(pos, pos - 1);
                self.history.record(&self.shapes);
                true
            }
            _ => false,
        }
    }

    /// Topmost visible, unlocked shape at a point (in document coordinates).
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        if self.hidden.is_empty() && self.locked.is_empty() {
            return hit_test(point, &self.shapes);
        }
        self.shapes
            .iter()
            .rev()
            .filter(|s| self.is_visible(s.id()) && !self.is_locked(s.id()))
            .find(|s| s.hit_test(point))
            .map(Shape::id)
    }

    /// Check whether a shape's layer is drawn.
    pub fn is_visible(&self, id: ShapeId) -> bool {
        !self.hidden.contains(&id)
    }

    /// Check whether a shape's layer ignores the pointer.
    pub fn is_locked(&self, id: ShapeId) -> bool {
        self.locked.contains(&id)
    }

    /// Show or hide a layer. Returns false if the shape is absent.
    pub fn toggle_visibility(&mut self, id: ShapeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if !self.hidden.remove(&id) {
            self.hidden.insert(id);
        }
        log::debug!("layer {id} visible: {}", self.is_visible(id));
        true
    }

    /// Lock or unlock a layer. Returns false if the shape is absent.
    pub fn toggle_lock(&mut self, id: ShapeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if !self.locked.remove(&id) {
            self.locked.insert(id);
        }
        log::debug!("layer {id} locked: {}", self.is_locked(id));
        true
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(shapes) => {
                self.shapes = shapes;
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(shapes) => {
                self.shapes = shapes;
                true
            }
            None => false,
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Read access to the history log.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Layer list entries, topmost first.
    pub fn layers(&self) -> Vec<LayerEntry> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, shape)| LayerEntry {
                shape_id: shape.id(),
                name: format!("{} {}", shape.kind().label(), i + 1),
                visible: self.is_visible(shape.id()),
                locked: self.is_locked(shape.id()),
            })
            .collect()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// The canvas interaction engine: one per open document.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The shapes and their history.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Grid display and snapping policy.
    pub grid: GridSettings,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Viewport size in device pixels.
    pub viewport_size: Size,
    /// Currently selected shape.
    selection: Option<ShapeId>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(&CanvasConfig::default())
    }

    /// Create a canvas from configuration.
    ///
    /// Values outside the engine's limits are corrected first.
    pub fn with_config(config: &CanvasConfig) -> Self {
        let config = config.sanitized();
        Self {
            document: CanvasDocument::with_history_limit(config.history_limit),
            camera: Camera::new(),
            grid: config.grid,
            tool_manager: ToolManager::with_style(config.new_shape_style.clone()),
            viewport_size: config.viewport_size,
            selection: None,
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Shapes in z-order.
    pub fn shapes(&self) -> &[Shape] {
        self.document.shapes()
    }

    /// The currently selected shape id.
    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    /// The currently selected shape.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.document.get_shape(id))
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection == Some(id)
    }

    /// Select a shape, or clear the selection with `None`.
    /// Ids not present in the document, or hidden, are ignored.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        match id {
            Some(id) if !self.document.contains(id) || !self.document.is_visible(id) => false,
            _ => {
                self.selection = id;
                true
            }
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Drop the selection if it no longer refers to a shape.
    fn revalidate_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.document.contains(id) {
                log::debug!("clearing stale selection {id}");
                self.selection = None;
            }
        }
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    /// Add a shape on top of the z-order.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        self.document.add_shape(shape)
    }

    /// Merge fields into a shape.
    pub fn update_shape(&mut self, id: ShapeId, update: &ShapeUpdate) -> bool {
        self.document.update_shape(id, update)
    }

    /// Delete a shape, clearing the selection if it pointed at it.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        let removed = self.document.remove_shape(id).is_some();
        if self.selection == Some(id) {
            self.selection = None;
        }
        removed
    }

    /// Delete the selected shape.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.delete_shape(id),
            None => false,
        }
    }

    /// Move a shape one step towards the front.
    pub fn move_shape_up(&mut self, id: ShapeId) -> bool {
        self.document.move_up(id)
    }

    /// Move a shape one step towards the back.
    pub fn move_shape_down(&mut self, id: ShapeId) -> bool {
        self.document.move_down(id)
    }

    /// Undo the last change.
    pub fn undo(&mut self) -> bool {
        let changed = self.document.undo();
        self.revalidate_selection();
        changed
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        let changed = self.document.redo();
        self.revalidate_selection();
        changed
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// Toggle grid visibility.
    pub fn toggle_grid(&mut self) {
        self.grid.toggle_grid();
    }

    /// Toggle grid snapping.
    pub fn toggle_snap(&mut self) {
        self.grid.toggle_snap();
    }

    /// Set the grid cell size.
    pub fn set_grid_size(&mut self, size: f64) {
        self.grid.set_cell_size(size);
    }

    /// Convert a device point to document coordinates.
    pub fn to_document_point(&self, device_point: Point) -> Point {
        self.camera.to_document(device_point)
    }

    /// Zoom one wheel step around the viewport center.
    pub fn wheel(&mut self, delta_y: f64) {
        self.camera.wheel(delta_y, self.viewport_size);
    }

    /// Layer list entries, topmost first.
    pub fn layers(&self) -> Vec<LayerEntry> {
        self.document.layers()
    }

    /// Show or hide a layer. Hiding the selected shape clears the selection.
    pub fn toggle_layer_visibility(&mut self, id: ShapeId) -> bool {
        if !self.document.toggle_visibility(id) {
            return false;
        }
        if self.selection == Some(id) && !self.document.is_visible(id) {
            self.clear_selection();
        }
        true
    }

    /// Lock or unlock a layer.
    pub fn toggle_layer_lock(&mut self, id: ShapeId) -> bool {
        self.document.toggle_lock(id)
    }
}
