//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Point, Rect, Vec2};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, Layout as TextLayout, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use pixelink_core::color::PALETTE;
use vello::Scene;

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Vello-based renderer for the pixel grid and sidebar.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (system fonts, cached).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Set once a label failed to produce glyphs, to avoid log spam.
    warned_missing_font: bool,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            warned_missing_font: false,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &rect);
    }

    /// Draw every grid cell at its pixel position.
    fn render_cells(&mut self, ctx: &RenderContext) {
        for (col, row, color) in ctx.canvas.grid().cells() {
            let rect = ctx.layout.cell_rect(col, row);
            self.fill_rect(rect, color.into());
        }
    }

    /// Draw the palette swatch column.
    fn render_palette(&mut self, ctx: &RenderContext) {
        for (index, &color) in PALETTE.iter().enumerate() {
            let rect = ctx.layout.swatch_rect(index);
            self.fill_rect(rect, color.into());
        }
    }

    /// Draw the "+"/"-" buttons and the brush size label.
    fn render_brush_controls(&mut self, ctx: &RenderContext) {
        let brush = Brush::Solid(ctx.text_color);
        for (rect, glyph) in [(ctx.layout.plus_button(), "+"), (ctx.layout.minus_button(), "-")] {
            self.fill_rect(rect, ctx.button_color);
            let text = self.layout_text(glyph, ctx.font_size, &brush);
            let size = Vec2::new(text.width() as f64, text.height() as f64);
            let origin = rect.center() - size / 2.0;
            self.draw_text(&text, origin, &brush);
        }

        let label = ctx.brush_label();
        let text = self.layout_text(&label, ctx.font_size, &brush);
        self.draw_text(&text, ctx.layout.label_origin(), &brush);
    }

    /// Lay out a single line of text with the default sans-serif font.
    fn layout_text(&mut self, text: &str, font_size: f32, brush: &Brush) -> TextLayout<Brush> {
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Generic(parley::GenericFamily::SansSerif),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());
        layout
    }

    /// Draw a laid-out text block with its top-left corner at `origin`.
    fn draw_text(&mut self, layout: &TextLayout<Brush>, origin: Point, brush: &Brush) {
        let transform = Affine::translate(origin.to_vec2());
        let mut glyph_count = 0;

        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        glyph_count += 1;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(brush)
                        .hint(true)
                        .transform(transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        if glyph_count == 0 && !self.warned_missing_font {
            log::warn!("No system font produced glyphs; sidebar labels will be blank");
            self.warned_missing_font = true;
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let window = Rect::new(0.0, 0.0, ctx.layout.width as f64, ctx.layout.height as f64);
        self.fill_rect(window, ctx.background_color);

        self.render_cells(ctx);
        self.render_palette(ctx);
        self.render_brush_controls(ctx);
    }
}
