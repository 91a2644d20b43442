//! Renderer trait abstraction.

use peniko::Color;
use pixelink_core::canvas::Canvas;
use pixelink_core::layout::Layout;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Window geometry.
    pub layout: Layout,
    /// Color behind everything, including the sidebar.
    pub background_color: Color,
    /// Fill of the brush "+"/"-" buttons.
    pub button_color: Color,
    /// Color of button glyphs and the brush label.
    pub text_color: Color,
    /// Font size for glyphs and labels, in pixels.
    pub font_size: f32,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, layout: Layout) -> Self {
        Self {
            canvas,
            layout,
            background_color: canvas.background().into(),
            button_color: Color::from_rgba8(128, 128, 128, 255),
            text_color: Color::BLACK,
            font_size: 22.0,
        }
    }

    /// Text shown under the brush buttons.
    pub fn brush_label(&self) -> String {
        let size = self.canvas.brush_size().get();
        format!("Brush: {}x{}", size, size)
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    ///
    /// Called once per frame; redraws everything.
    fn build_scene(&mut self, ctx: &RenderContext);
}
