//! CPU raster backend built on tiny-skia.

use crate::font;
use crate::renderer::{PngRenderResult, RenderContext, RenderResult, Renderer, RendererError};
use crate::scene::{DrawCommand, Scene};
use kurbo::{Affine, BezPath, PathEl, Point};
use peniko::Color;
use rusttype::{Scale, point as rt_point};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

/// Off-screen renderer that rasterizes scenes into RGBA pixels.
#[derive(Debug, Default)]
pub struct SkiaRenderer {
    scene: Scene,
}

impl SkiaRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and rasterize a frame at the context's viewport size.
    pub fn render(&mut self, ctx: &RenderContext) -> RenderResult<PngRenderResult> {
        self.build_scene(ctx);
        let width = ctx.viewport_size.width.round();
        let height = ctx.viewport_size.height.round();
        let limit = f64::from(u32::MAX);
        if !((1.0..=limit).contains(&width) && (1.0..=limit).contains(&height)) {
            return Err(RendererError::Surface(format!(
                "invalid surface size {}x{}",
                ctx.viewport_size.width, ctx.viewport_size.height
            )));
        }
        self.rasterize(width as u32, height as u32)
    }
}

impl Renderer for SkiaRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.rebuild(ctx);
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn rasterize(&mut self, width: u32, height: u32) -> RenderResult<PngRenderResult> {
        rasterize_scene(&self.scene, width, height)
    }
}

/// Draw `scene` into a new `width`×`height` surface.
pub fn rasterize_scene(scene: &Scene, width: u32, height: u32) -> RenderResult<PngRenderResult> {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(RendererError::Surface(format!(
            "cannot allocate {width}x{height} surface"
        )));
    };
    let transform = to_skia_transform(scene.transform);

    for item in scene.items() {
        match &item.command {
            DrawCommand::Clear(color) => pixmap.fill(to_skia_color(*color)),
            DrawCommand::Fill { path, color } => {
                if let Some(path) = to_skia_path(path) {
                    pixmap.fill_path(&path, &paint(*color), FillRule::Winding, transform, None);
                }
            }
            DrawCommand::Stroke {
                path,
                color,
                width,
                dashes,
            } => {
                let Some(path) = to_skia_path(path) else {
                    continue;
                };
                let mut stroke = Stroke {
                    width: *width as f32,
                    ..Default::default()
                };
                if !dashes.is_empty() {
                    stroke.dash = StrokeDash::new(dashes.iter().map(|d| *d as f32).collect(), 0.0);
                }
                pixmap.stroke_path(&path, &paint(*color), &stroke, transform, None);
            }
            DrawCommand::Text {
                origin,
                text,
                font_size,
                color,
            } => {
                let Some(font) = font::default_font() else {
                    continue;
                };
                let scale = scene.transform.as_coeffs()[0];
                draw_text(
                    &mut pixmap,
                    font,
                    scene.transform * *origin,
                    text,
                    (*font_size * scale) as f32,
                    *color,
                );
            }
        }
    }

    let mut rgba_data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba_data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    log::debug!("rasterized {} commands into {width}x{height}", scene.len());
    Ok(PngRenderResult {
        rgba_data,
        width,
        height,
    })
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Blend glyph coverage over the premultiplied surface.
/// `origin` is the baseline start in device pixels.
fn draw_text(
    pixmap: &mut Pixmap,
    font: &rusttype::Font<'static>,
    origin: Point,
    text: &str,
    size: f32,
    color: Color,
) {
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let rgba = color.to_rgba8();
    let src = [rgba.r, rgba.g, rgba.b];
    let src_alpha = f32::from(rgba.a) / 255.0;
    let data = pixmap.data_mut();

    let start = rt_point(origin.x as f32, origin.y as f32);
    for glyph in font.layout(text, Scale::uniform(size), start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || px >= width || py < 0 || py >= height {
                return;
            }
            let alpha = coverage * src_alpha;
            if alpha <= 0.0 {
                return;
            }
            let idx = ((py * width + px) * 4) as usize;
            let pixel = &mut data[idx..idx + 4];
            for (dst, s) in pixel.iter_mut().take(3).zip(src) {
                *dst = (f32::from(s) * alpha + f32::from(*dst) * (1.0 - alpha)).round() as u8;
            }
            pixel[3] = (255.0 * alpha + f32::from(pixel[3]) * (1.0 - alpha)).round() as u8;
        });
    }
}
