//! InkPad Core Library
//!
//! Platform-agnostic canvas interaction engine: shapes, the view camera,
//! grid snapping, hit-testing, the tool state machine and snapshot history.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod event_handler;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument, LayerEntry, hit_test};
pub use config::CanvasConfig;
pub use event_handler::TextEditor;
pub use history::History;
pub use input::{KeyPress, Modifiers, PointerEvent};
pub use selection::{Handle, HandleKind, SelectionOutline, get_handles, selection_outline};
pub use shapes::{
    ColorParseError, SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle, ShapeUpdate,
};
pub use snap::{GRID_SIZE, GridSettings, snap_point, snap_to_grid};
pub use tools::{ToolKind, ToolManager, ToolState};
