//! InkPad Render Library
//!
//! Renderer abstraction, the frame scene builder and a CPU raster backend
//! used for both live frames and off-screen export.

mod font;
mod renderer;
pub mod scene;
mod skia_impl;

pub use renderer::{PngRenderResult, RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{DrawCommand, Layer, Scene, SceneItem, grid_bounds};
pub use skia_impl::{SkiaRenderer, rasterize_scene};

use inkpad_core::canvas::Canvas;
use kurbo::Size;

/// Render the canvas through the normal frame pipeline into an off-screen
/// surface of the given size, independent of the live viewport.
pub fn export_snapshot(canvas: &Canvas, width: u32, height: u32) -> RenderResult<PngRenderResult> {
    let ctx = RenderContext::new(canvas, Size::new(f64::from(width), f64::from(height)));
    let mut renderer = SkiaRenderer::new();
    let result = renderer.render(&ctx)?;
    log::info!("exported {width}x{height} snapshot ({} shapes)", canvas.shapes().len());
    Ok(result)
}
