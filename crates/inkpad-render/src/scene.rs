//! Device-independent draw command list.
//!
//! A [`Scene`] is built from a [`RenderContext`] in a fixed order: clear,
//! grid, shapes in z-order, the drawing preview, then the selection
//! decoration. Commands are in document coordinates; `Scene::transform`
//! maps them to the target surface.

use crate::renderer::RenderContext;
use inkpad_core::selection::{HANDLE_SIZE, get_handles, selection_outline};
use inkpad_core::shapes::{Shape, ShapeId, Text};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use peniko::Color;

/// Dash and gap length of the selection outline, in device pixels.
const SELECTION_DASH: f64 = 5.0;

/// Which part of the frame a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Grid,
    Shape(ShapeId),
    Preview,
    Selection,
}

/// A single drawing operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(Color),
    /// Fill a path (non-zero winding).
    Fill { path: BezPath, color: Color },
    /// Stroke a path. `dashes` is empty for a solid line.
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
        dashes: Vec<f64>,
    },
    /// Draw a single line of text with its baseline starting at `origin`.
    Text {
        origin: Point,
        text: String,
        font_size: f64,
        color: Color,
    },
}

/// A draw command tagged with its layer.
#[derive(Debug, Clone)]
pub struct SceneItem {
    pub layer: Layer,
    pub command: DrawCommand,
}

/// Ordered list of draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Document to device transform.
    pub transform: Affine,
    items: Vec<SceneItem>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the scene for a frame.
    pub fn build(ctx: &RenderContext) -> Self {
        let mut scene = Self::new();
        scene.rebuild(ctx);
        scene
    }

    /// Clear the scene and build it again from `ctx`.
    pub fn rebuild(&mut self, ctx: &RenderContext) {
        self.reset();
        let canvas = ctx.canvas;
        let zoom = canvas.camera.scale;
        self.transform = canvas.camera.transform();

        self.push(Layer::Background, DrawCommand::Clear(ctx.background_color));

        if canvas.grid.enabled {
            let viewport = Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height);
            self.push_grid(viewport, canvas.grid.cell_size, zoom, ctx.grid_color);
        }

        for shape in canvas.shapes() {
            if canvas.document.is_visible(shape.id()) {
                self.push_shape(Layer::Shape(shape.id()), shape);
            }
        }

        if let Some(preview) = canvas.tool_manager.preview_shape() {
            self.push_shape(Layer::Preview, &preview);
        }

        if let Some(shape) = canvas.selected_shape() {
            self.push_selection(shape, zoom, ctx.selection_color);
        }
    }

    /// Remove all commands.
    pub fn reset(&mut self) {
        self.items.clear();
        self.transform = Affine::IDENTITY;
    }

    /// Commands in draw order.
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the scene has no commands.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.items.push(SceneItem { layer, command });
    }

    /// Grid lines covering the visible viewport, batched into one path.
    fn push_grid(&mut self, viewport: Rect, grid_size: f64, zoom: f64, color: Color) {
        if !(grid_size.is_finite() && grid_size > 0.0) {
            log::warn!("skipping grid with cell size {grid_size}");
            return;
        }
        let (start_x, start_y, end_x, end_y) = grid_bounds(viewport, self.transform, grid_size);
        let mut path = BezPath::new();

        let mut x = start_x;
        while x <= end_x {
            path.move_to(Point::new(x, start_y));
            path.line_to(Point::new(x, end_y));
            x += grid_size;
        }

        let mut y = start_y;
        while y <= end_y {
            path.move_to(Point::new(start_x, y));
            path.line_to(Point::new(end_x, y));
            y += grid_size;
        }

        self.push(
            Layer::Grid,
            DrawCommand::Stroke {
                path,
                color,
                width: 1.0 / zoom,
                dashes: Vec::new(),
            },
        );
    }

    fn push_shape(&mut self, layer: Layer, shape: &Shape) {
        let style = shape.style();
        match shape {
            Shape::Text(text) => {
                // Absent payload draws nothing.
                if let Some(content) = &text.content {
                    self.push(
                        layer,
                        DrawCommand::Text {
                            origin: text.position,
                            text: content.clone(),
                            font_size: Text::DEFAULT_FONT_SIZE,
                            color: style.fill(),
                        },
                    );
                }
            }
            Shape::Rectangle(_) | Shape::Ellipse(_) => {
                let path = shape.to_path();
                self.push(
                    layer,
                    DrawCommand::Fill {
                        path: path.clone(),
                        color: style.fill(),
                    },
                );
                self.push(
                    layer,
                    DrawCommand::Stroke {
                        path,
                        color: style.stroke(),
                        width: f64::from(style.stroke_width),
                        dashes: Vec::new(),
                    },
                );
            }
        }
    }

    /// Dashed outline plus handle markers, sized in device pixels.
    fn push_selection(&mut self, shape: &Shape, zoom: f64, color: Color) {
        let stroke_width = 1.0 / zoom;
        let dash = SELECTION_DASH / zoom;
        self.push(
            Layer::Selection,
            DrawCommand::Stroke {
                path: selection_outline(shape).to_path(),
                color,
                width: stroke_width,
                dashes: vec![dash, dash],
            },
        );

        let half = HANDLE_SIZE / zoom / 2.0;
        for handle in get_handles(shape) {
            let pos = handle.position;
            let path =
                Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half).to_path(0.1);
            self.push(
                Layer::Selection,
                DrawCommand::Fill {
                    path: path.clone(),
                    color: Color::WHITE,
                },
            );
            self.push(
                Layer::Selection,
                DrawCommand::Stroke {
                    path,
                    color,
                    width: stroke_width,
                    dashes: Vec::new(),
                },
            );
        }
    }
}

/// Grid-aligned document bounds `(start_x, start_y, end_x, end_y)` covering
/// `viewport` (in device pixels) under `transform`.
pub fn grid_bounds(viewport: Rect, transform: Affine, grid_size: f64) -> (f64, f64, f64, f64) {
    let inv = transform.inverse();
    let world_tl = inv * Point::new(viewport.x0, viewport.y0);
    let world_br = inv * Point::new(viewport.x1, viewport.y1);

    let start_x = (world_tl.x / grid_size).floor() * grid_size;
    let start_y = (world_tl.y / grid_size).floor() * grid_size;
    let end_x = (world_br.x / grid_size).ceil() * grid_size;
    let end_y = (world_br.y / grid_size).ceil() * grid_size;

    (start_x, start_y, end_x, end_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::canvas::Canvas;
    use inkpad_core::shapes::ShapeKind;
    use inkpad_core::tools::ToolKind;
    use kurbo::{Size, Vec2};

    fn layers(scene: &Scene) -> Vec<Layer> {
        scene.items().iter().map(|item| item.layer).collect()
    }

    #[test]
    fn test_empty_canvas_scene() {
        let canvas = Canvas::new();
        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(800.0, 600.0)));
        assert_eq!(layers(&scene), vec![Layer::Background, Layer::Grid]);
    }

    #[test]
    fn test_grid_disabled() {
        let mut canvas = Canvas::new();
        canvas.toggle_grid();
        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(800.0, 600.0)));
        assert_eq!(layers(&scene), vec![Layer::Background]);
    }

    #[test]
    fn test_hidden_layer_not_drawn() {
        let mut canvas = Canvas::new();
        canvas.toggle_grid();
        let a = Shape::new(ShapeKind::Rectangle, Point::new(10.0, 10.0), 50.0, 50.0);
        let b = Shape::new(ShapeKind::Ellipse, Point::new(30.0, 30.0), 50.0, 50.0);
        let (ia, ib) = (a.id(), b.id());
        canvas.add_shape(a);
        canvas.add_shape(b);
        canvas.toggle_layer_visibility(ia);

        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(800.0, 600.0)));
        assert_eq!(
            layers(&scene),
            vec![Layer::Background, Layer::Shape(ib), Layer::Shape(ib)]
        );
    }

    #[test]
    fn test_invalid_cell_size_skips_grid() {
        let mut canvas = Canvas::new();
        canvas.grid.cell_size = -20.0;
        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(100.0, 100.0)));
        assert_eq!(layers(&scene), vec![Layer::Background]);

        canvas.grid.cell_size = 0.0;
        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(100.0, 100.0)));
        assert_eq!(layers(&scene), vec![Layer::Background]);
    }

    #[test]
    fn test_draw_order() {
        let mut canvas = Canvas::new();
        let a = Shape::new(ShapeKind::Rectangle, Point::new(10.0, 10.0), 50.0, 50.0);
        let b = Shape::new(ShapeKind::Ellipse, Point::new(30.0, 30.0), 50.0, 50.0);
        let (ia, ib) = (a.id(), b.id());
        canvas.add_shape(a);
        canvas.add_shape(b);
        canvas.select(Some(ia));

        // Preview of an in-progress rectangle
        canvas.set_tool(ToolKind::Rectangle);
        canvas.pointer_down(Point::new(200.0, 200.0));
        canvas.pointer_move(Point::new(260.0, 240.0));

        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(800.0, 600.0)));
        let order = layers(&scene);

        let mut expected = vec![
            Layer::Background,
            Layer::Grid,
            Layer::Shape(ia),
            Layer::Shape(ia),
            Layer::Shape(ib),
            Layer::Shape(ib),
            Layer::Preview,
            Layer::Preview,
        ];
        // Outline plus fill and border per handle
        expected.extend(std::iter::repeat_n(Layer::Selection, 1 + 8 * 2));
        assert_eq!(order, expected);
    }

    #[test]
    fn test_shape_fill_then_stroke() {
        let mut canvas = Canvas::new();
        canvas.add_shape(Shape::new(ShapeKind::Rectangle, Point::ZERO, 10.0, 10.0));
        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(100.0, 100.0)));

        assert!(matches!(scene.items()[2].command, DrawCommand::Fill { .. }));
        match &scene.items()[3].command {
            DrawCommand::Stroke { width, dashes, .. } => {
                assert!((width - 2.0).abs() < f64::EPSILON);
                assert!(dashes.is_empty());
            }
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_text_without_payload_draws_nothing() {
        let mut canvas = Canvas::new();
        canvas.add_shape(Shape::Text(Text::new(Point::new(0.0, 20.0), 50.0, None)));
        canvas.add_shape(Shape::Text(Text::new(
            Point::new(0.0, 60.0),
            50.0,
            Some("hi".to_string()),
        )));
        canvas.toggle_grid();

        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(100.0, 100.0)));
        assert_eq!(scene.len(), 2);
        match &scene.items()[1].command {
            DrawCommand::Text {
                origin,
                text,
                font_size,
                ..
            } => {
                assert_eq!(*origin, Point::new(0.0, 60.0));
                assert_eq!(text, "hi");
                assert!((font_size - 20.0).abs() < f64::EPSILON);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_selection_outline_is_dashed() {
        let mut canvas = Canvas::new();
        let shape = Shape::new(ShapeKind::Rectangle, Point::ZERO, 10.0, 10.0);
        let id = shape.id();
        canvas.add_shape(shape);
        canvas.select(Some(id));
        canvas.toggle_grid();

        let scene = Scene::build(&RenderContext::new(&canvas, Size::new(100.0, 100.0)));
        match &scene.items()[3].command {
            DrawCommand::Stroke { dashes, .. } => assert_eq!(dashes, &vec![5.0, 5.0]),
            other => panic!("expected dashed stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut canvas = Canvas::new();
        canvas.add_shape(Shape::new(ShapeKind::Ellipse, Point::ZERO, 30.0, 30.0));
        let ctx = RenderContext::new(&canvas, Size::new(200.0, 200.0));

        let mut scene = Scene::build(&ctx);
        let first = layers(&scene);
        scene.rebuild(&ctx);
        assert_eq!(layers(&scene), first);
    }

    #[test]
    fn test_grid_bounds_follow_camera() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            grid_bounds(viewport, Affine::IDENTITY, 20.0),
            (0.0, 0.0, 100.0, 100.0)
        );

        let mut canvas = Canvas::new();
        canvas.camera.pan(Vec2::new(30.0, 10.0));
        canvas.camera.scale = 2.0;
        // Visible document area is (-15, -5) .. (35, 45)
        assert_eq!(
            grid_bounds(viewport, canvas.camera.transform(), 20.0),
            (-20.0, -20.0, 40.0, 60.0)
        );
    }
}
