//! Application state and action dispatch.

use crate::shortcuts::{ShortcutCommand, ShortcutRegistry};
use crate::ui::UiAction;
use inkpad_core::canvas::Canvas;
use inkpad_core::config::CanvasConfig;
use inkpad_core::event_handler::TextEditor;
use inkpad_core::input::KeyPress;
use inkpad_core::shapes::{ColorParseError, SerializableColor, Shape, ShapeId, ShapeUpdate};
use inkpad_render::{PngRenderResult, RenderContext, RendererError, SkiaRenderer};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("render error: {0}")]
    Render(#[from] RendererError),
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
    #[error("export failed")]
    Export,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Off-screen export width in pixels.
    pub export_width: u32,
    /// Off-screen export height in pixels.
    pub export_height: u32,
    pub background_color: SerializableColor,
    pub grid_color: SerializableColor,
    pub selection_color: SerializableColor,
    /// Engine settings.
    pub canvas: CanvasConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "InkPad".to_string(),
            export_width: 1200,
            export_height: 800,
            background_color: SerializableColor::new(250, 250, 250, 255),
            grid_color: SerializableColor::new(200, 200, 200, 255),
            selection_color: SerializableColor::new(0, 0, 255, 255),
            canvas: CanvasConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// An open text edit waiting for the host's answer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextEditSession {
    shape_id: ShapeId,
}

/// The application shell: one canvas plus its renderer.
pub struct App {
    config: AppConfig,
    canvas: Canvas,
    renderer: SkiaRenderer,
    text_edit: Option<TextEditSession>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl App {
    /// Create the application from configuration.
    pub fn new(config: AppConfig) -> Self {
        log::info!("Starting {}", config.title);
        Self {
            canvas: Canvas::with_config(&config.canvas),
            config,
            renderer: SkiaRenderer::new(),
            text_edit: None,
        }
    }

    /// The engine.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable access to the engine.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// The active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Check whether a modal text edit is open.
    pub fn is_editing_text(&self) -> bool {
        self.text_edit.is_some()
    }

    /// Apply a UI action.
    pub fn apply(&mut self, action: UiAction) -> Result<(), AppError> {
        log::debug!("action: {action:?}");
        match action {
            UiAction::SetTool { tool } => self.canvas.set_tool(tool),
            UiAction::SelectShape { id } => {
                if !self.canvas.select(id) {
                    log::debug!("ignoring selection of unknown shape");
                }
            }
            UiAction::SelectLayer { index } => {
                let id = self.canvas.layers().get(index).map(|layer| layer.shape_id);
                self.canvas.select(id);
            }
            UiAction::ToggleLayerVisibility { id } => {
                self.canvas.toggle_layer_visibility(id);
            }
            UiAction::ToggleLayerLock { id } => {
                self.canvas.toggle_layer_lock(id);
            }
            UiAction::UpdateShape { id, update } => {
                self.canvas.update_shape(id, &update);
            }
            UiAction::UpdateSelected { update } => self.update_selected(&update),
            UiAction::SetFillColor { color } => {
                let color = SerializableColor::from_hex(&color)?;
                self.canvas.tool_manager.current_style.fill_color = color;
                self.update_selected(&ShapeUpdate::fill(color));
            }
            UiAction::SetStrokeColor { color } => {
                let color = SerializableColor::from_hex(&color)?;
                self.canvas.tool_manager.current_style.stroke_color = color;
                self.update_selected(&ShapeUpdate {
                    stroke: Some(color),
                    ..ShapeUpdate::default()
                });
            }
            UiAction::SetStrokeWidth { width } => {
                if width > 0 {
                    self.canvas.tool_manager.current_style.stroke_width = width;
                    self.update_selected(&ShapeUpdate::stroke_width(width));
                }
            }
            UiAction::DeleteShape { id } => {
                self.canvas.delete_shape(id);
            }
            UiAction::DeleteSelected => {
                self.canvas.delete_selected();
            }
            UiAction::MoveShapeUp { id } => {
                self.canvas.move_shape_up(id);
            }
            UiAction::MoveShapeDown { id } => {
                self.canvas.move_shape_down(id);
            }
            UiAction::Undo => self.undo(),
            UiAction::Redo => self.redo(),
            UiAction::ToggleGrid => self.canvas.toggle_grid(),
            UiAction::ToggleSnap => self.canvas.toggle_snap(),
            UiAction::SetGridSize { size } => self.canvas.set_grid_size(size),
            UiAction::Wheel { delta_y } => self.canvas.wheel(delta_y),
            UiAction::SetViewportSize { width, height } => {
                self.canvas.set_viewport_size(width, height)
            }
            UiAction::Pointer { event } => self.canvas.handle_pointer_event(event),
            UiAction::Key(press) => {
                self.handle_key(&press);
            }
            UiAction::BeginTextEdit { position } => {
                self.begin_text_edit(position);
            }
            UiAction::CommitTextEdit { text } => {
                self.commit_text_edit(text);
            }
            UiAction::ExportPng { path } => self.export_png(&path)?,
        }
        Ok(())
    }

    fn update_selected(&mut self, update: &ShapeUpdate) {
        if let Some(id) = self.canvas.selection() {
            self.canvas.update_shape(id, update);
        }
    }

    fn undo(&mut self) {
        if self.canvas.undo() {
            log::info!("Undo performed");
        } else {
            log::info!("Nothing to undo");
        }
    }

    fn redo(&mut self) {
        if self.canvas.redo() {
            log::info!("Redo performed");
        } else {
            log::info!("Nothing to redo");
        }
    }

    /// Run the shortcut bound to a key press. Returns true if one fired.
    ///
    /// Shortcuts are suppressed while a text edit is open.
    pub fn handle_key(&mut self, press: &KeyPress) -> bool {
        if self.is_editing_text() {
            return false;
        }
        let Some(command) = ShortcutRegistry::lookup(press) else {
            return false;
        };
        match command {
            ShortcutCommand::SetTool(tool) => self.canvas.set_tool(tool),
            ShortcutCommand::DeleteSelected => {
                self.canvas.delete_selected();
            }
            ShortcutCommand::Undo => self.undo(),
            ShortcutCommand::Redo => self.redo(),
            ShortcutCommand::ToggleGrid => self.canvas.toggle_grid(),
            ShortcutCommand::ToggleSnap => self.canvas.toggle_snap(),
            ShortcutCommand::Deselect => self.canvas.clear_selection(),
        }
        true
    }

    /// Edit text synchronously with a host-provided editor.
    pub fn double_click(&mut self, position: Point, editor: &mut dyn TextEditor) -> bool {
        self.canvas.double_click(position, editor)
    }

    /// Open a text edit for the text shape under `position`.
    /// Returns false if there is no text shape there.
    pub fn begin_text_edit(&mut self, position: Point) -> bool {
        let point = self.canvas.to_document_point(position);
        let document = &self.canvas.document;
        let hit = document
            .shape_at(point)
            .filter(|id| matches!(document.get_shape(*id), Some(Shape::Text(_))));
        match hit {
            Some(shape_id) => {
                self.text_edit = Some(TextEditSession { shape_id });
                true
            }
            None => false,
        }
    }

    /// Close the open text edit, applying `text` unless it is `None`.
    ///
    /// The edit targets the shape found when it was opened, whatever the
    /// camera or stacking order has done since. Returns true if the shape
    /// was updated.
    pub fn commit_text_edit(&mut self, text: Option<String>) -> bool {
        let Some(session) = self.text_edit.take() else {
            return false;
        };
        let Some(text) = text else {
            log::debug!("text edit cancelled");
            return false;
        };
        if !self.canvas.document.contains(session.shape_id) {
            log::warn!("text edit target {} no longer exists", session.shape_id);
            return false;
        }
        self.canvas.update_shape(session.shape_id, &ShapeUpdate::text(text))
    }

    /// Render the canvas off-screen at the configured export size.
    ///
    /// Failures are logged and reported as `None`; the canvas stays usable.
    pub fn export_snapshot(&mut self) -> Option<PngRenderResult> {
        let size = Size::new(
            f64::from(self.config.export_width),
            f64::from(self.config.export_height),
        );
        let ctx = RenderContext::new(&self.canvas, size)
            .with_background(self.config.background_color.into())
            .with_grid_color(self.config.grid_color.into())
            .with_selection_color(self.config.selection_color.into());
        match self.renderer.render(&ctx) {
            Ok(result) => {
                log::info!("Exported snapshot {}x{}", result.width, result.height);
                Some(result)
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                None
            }
        }
    }

    /// Export a snapshot and write it to `path` as PNG.
    pub fn export_png(&mut self, path: &Path) -> Result<(), AppError> {
        let result = self.export_snapshot().ok_or(AppError::Export)?;
        let bytes = result.to_png()?;
        std::fs::write(path, bytes)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::input::PointerEvent;
    use inkpad_core::shapes::{ShapeKind, Text};
    use inkpad_core::tools::ToolKind;

    fn pointer(app: &mut App, event: PointerEvent) {
        app.apply(UiAction::Pointer { event }).unwrap();
    }

    fn draw_rect(app: &mut App, from: Point, to: Point) {
        app.apply(UiAction::SetTool {
            tool: ToolKind::Rectangle,
        })
        .unwrap();
        pointer(app, PointerEvent::Down { position: from });
        pointer(app, PointerEvent::Move { position: to });
        pointer(app, PointerEvent::Up { position: to });
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!((config.export_width, config.export_height), (1200, 800));
        let parsed: AppConfig = serde_json::from_str(r#"{"export_width": 640}"#).unwrap();
        assert_eq!(parsed.export_width, 640);
        assert_eq!(parsed.export_height, 800);
    }

    #[test]
    fn test_draw_via_actions() {
        let mut app = App::default();
        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(100.0, 80.0));
        assert_eq!(app.canvas().shapes().len(), 1);
        assert!(app.canvas().selection().is_some());
    }

    #[test]
    fn test_shortcuts() {
        let mut app = App::default();
        assert!(app.handle_key(&KeyPress::plain("r")));
        assert_eq!(app.canvas().tool(), ToolKind::Rectangle);

        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        assert!(app.handle_key(&KeyPress::plain("Escape")));
        assert_eq!(app.canvas().selection(), None);

        assert!(app.handle_key(&KeyPress::ctrl("z")));
        assert!(app.canvas().shapes().is_empty());
        assert!(app.handle_key(&KeyPress::ctrl("y")));
        assert_eq!(app.canvas().shapes().len(), 1);

        assert!(app.handle_key(&KeyPress::plain("g")));
        assert!(!app.canvas().grid.enabled);
        assert!(app.handle_key(&KeyPress::plain("s")));
        assert!(app.canvas().grid.snap_enabled);
        assert!(!app.handle_key(&KeyPress::plain("q")));
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut app = App::default();
        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        assert!(app.handle_key(&KeyPress::plain("Delete")));
        assert!(app.canvas().shapes().is_empty());
        assert_eq!(app.canvas().selection(), None);
    }

    #[test]
    fn test_style_actions_apply_to_selection_and_new_shapes() {
        let mut app = App::default();
        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        app.apply(UiAction::SetFillColor {
            color: "#ff0000".to_string(),
        })
        .unwrap();
        app.apply(UiAction::SetStrokeWidth { width: 5 }).unwrap();

        let style = app.canvas().shapes()[0].style().clone();
        assert_eq!(style.fill_color, SerializableColor::new(255, 0, 0, 255));
        assert_eq!(style.stroke_width, 5);

        draw_rect(&mut app, Point::new(100.0, 100.0), Point::new(150.0, 150.0));
        assert_eq!(app.canvas().shapes()[1].style(), &style);
    }

    #[test]
    fn test_bad_color_is_error() {
        let mut app = App::default();
        let err = app.apply(UiAction::SetFillColor {
            color: "red".to_string(),
        });
        assert!(matches!(err, Err(AppError::Color(_))));
    }

    #[test]
    fn test_zero_stroke_width_ignored() {
        let mut app = App::default();
        app.apply(UiAction::SetStrokeWidth { width: 0 }).unwrap();
        assert_eq!(app.canvas().tool_manager.current_style.stroke_width, 2);
    }

    #[test]
    fn test_select_layer() {
        let mut app = App::default();
        let a = Shape::new(ShapeKind::Rectangle, Point::ZERO, 10.0, 10.0);
        let b = Shape::new(ShapeKind::Ellipse, Point::ZERO, 10.0, 10.0);
        let ib = b.id();
        app.canvas_mut().add_shape(a);
        app.canvas_mut().add_shape(b);

        app.apply(UiAction::SelectLayer { index: 0 }).unwrap();
        assert_eq!(app.canvas().selection(), Some(ib));
        app.apply(UiAction::SelectLayer { index: 5 }).unwrap();
        assert_eq!(app.canvas().selection(), None);
    }

    #[test]
    fn test_locked_layer_cannot_be_dragged() {
        let mut app = App::default();
        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let id = app.canvas().shapes()[0].id();
        app.apply(UiAction::ToggleLayerLock { id }).unwrap();
        app.apply(UiAction::SetTool {
            tool: ToolKind::Select,
        })
        .unwrap();

        let (from, to) = (Point::new(50.0, 50.0), Point::new(80.0, 80.0));
        pointer(&mut app, PointerEvent::Down { position: from });
        pointer(&mut app, PointerEvent::Move { position: to });
        pointer(&mut app, PointerEvent::Up { position: to });
        assert_eq!(app.canvas().shapes()[0].position(), Point::ZERO);
        assert_eq!(app.canvas().selection(), None);

        app.apply(UiAction::SelectLayer { index: 0 }).unwrap();
        assert_eq!(app.canvas().selection(), Some(id));
        assert!(app.canvas().layers()[0].locked);
    }

    #[test]
    fn test_text_edit_blocks_shortcuts() {
        let mut app = App::default();
        let text = Shape::Text(Text::new(Point::new(0.0, 40.0), 100.0, None));
        let id = text.id();
        app.canvas_mut().add_shape(text);

        assert!(app.begin_text_edit(Point::new(50.0, 30.0)));
        assert!(app.is_editing_text());
        assert!(!app.handle_key(&KeyPress::plain("r")));
        assert_eq!(app.canvas().tool(), ToolKind::Select);

        assert!(app.commit_text_edit(Some("note".to_string())));
        assert!(!app.is_editing_text());
        assert_eq!(app.canvas().document.get_shape(id).unwrap().text(), Some("note"));
        assert!(app.handle_key(&KeyPress::plain("r")));
    }

    #[test]
    fn test_text_edit_cancel_and_miss() {
        let mut app = App::default();
        app.canvas_mut().add_shape(Shape::new(
            ShapeKind::Rectangle,
            Point::ZERO,
            50.0,
            50.0,
        ));
        assert!(!app.begin_text_edit(Point::new(10.0, 10.0)));
        assert!(!app.commit_text_edit(Some("x".to_string())));

        app.canvas_mut()
            .add_shape(Shape::Text(Text::new(Point::new(100.0, 40.0), 80.0, None)));
        assert!(app.begin_text_edit(Point::new(120.0, 30.0)));
        assert!(!app.commit_text_edit(None));
        assert_eq!(app.canvas().document.history().len(), 3);
    }

    #[test]
    fn test_export_snapshot_size() {
        let mut app = App::default();
        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(100.0, 80.0));
        let result = app.export_snapshot().unwrap();
        assert_eq!((result.width, result.height), (1200, 800));
    }

    #[test]
    fn test_export_failure_is_status() {
        let mut app = App::new(AppConfig {
            export_width: 0,
            ..AppConfig::default()
        });
        assert!(app.export_snapshot().is_none());
        draw_rect(&mut app, Point::new(0.0, 0.0), Point::new(100.0, 80.0));
        assert_eq!(app.canvas().shapes().len(), 1);
    }

    #[test]
    fn test_export_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut app = App::new(AppConfig {
            export_width: 64,
            export_height: 48,
            ..AppConfig::default()
        });
        app.apply(UiAction::ExportPng { path: path.clone() }).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_text_edit_survives_zoom() {
        let mut app = App::default();
        let text = Shape::Text(Text::new(Point::new(0.0, 40.0), 100.0, Some("old".to_string())));
        let id = text.id();
        app.canvas_mut().add_shape(text);

        assert!(app.begin_text_edit(Point::new(50.0, 30.0)));
        app.apply(UiAction::Wheel { delta_y: -1.0 }).unwrap();
        assert!(app.commit_text_edit(Some("new".to_string())));
        assert_eq!(app.canvas().document.get_shape(id).unwrap().text(), Some("new"));
    }

    #[test]
    fn test_text_edit_targets_original_shape() {
        let mut app = App::default();
        let a = Shape::Text(Text::new(Point::new(0.0, 40.0), 100.0, Some("a".to_string())));
        let b = Shape::Text(Text::new(Point::new(0.0, 40.0), 100.0, Some("b".to_string())));
        let (ia, ib) = (a.id(), b.id());
        app.canvas_mut().add_shape(a);

        assert!(app.begin_text_edit(Point::new(50.0, 30.0)));
        app.canvas_mut().add_shape(b);
        assert!(app.commit_text_edit(Some("new".to_string())));

        let document = &app.canvas().document;
        assert_eq!(document.get_shape(ia).unwrap().text(), Some("new"));
        assert_eq!(document.get_shape(ib).unwrap().text(), Some("b"));
    }

    #[test]
    fn test_text_edit_target_deleted() {
        let mut app = App::default();
        let text = Shape::Text(Text::new(Point::new(0.0, 40.0), 100.0, None));
        let id = text.id();
        app.canvas_mut().add_shape(text);

        assert!(app.begin_text_edit(Point::new(50.0, 30.0)));
        app.apply(UiAction::DeleteShape { id }).unwrap();
        assert!(!app.commit_text_edit(Some("lost".to_string())));
        assert!(!app.is_editing_text());
        assert!(app.canvas().shapes().is_empty());
    }

    #[test]
    fn test_config_file_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpad.json");
        let json = r#"{
            "export_width": 64,
            "export_height": 48,
            "canvas": {"grid": {"enabled": true, "cell_size": -20.0, "snap_enabled": false}}
        }"#;
        std::fs::write(&path, json).unwrap();

        let mut app = App::new(AppConfig::load(&path).unwrap());
        assert!((app.canvas().grid.cell_size - 5.0).abs() < f64::EPSILON);
        assert!(app.export_snapshot().is_some());
    }
}
