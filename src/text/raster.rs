use std::path::PathBuf;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{FactReelError, FactReelResult};
use crate::text::engine::{FontMeasure, TextBrushRgba8, TextLayoutEngine};
use crate::text::wrap::{PlacedLine, TextMeasure, layout_block, wrap_words};

/// Font file used when no other font is supplied.
pub const DEFAULT_FONT_PATH: &str = "assets/MonoLisa-Regular.ttf";

/// Parameters for the centered fact image.
#[derive(Clone, Debug)]
pub struct FactImageOpts {
    pub canvas: Canvas,
    pub font_path: PathBuf,
    pub font_size_px: f32,
    /// Horizontal margin on each side.
    pub padding_x: u32,
    /// Vertical gap between consecutive lines.
    pub line_gap: u32,
    pub background: Rgba8Premul,
    pub color: Rgba8Premul,
}

impl Default for FactImageOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size_px: 60.0,
            padding_x: 100,
            line_gap: 20,
            background: Rgba8Premul::BLACK,
            color: Rgba8Premul::WHITE,
        }
    }
}

impl FactImageOpts {
    /// Widest a wrapped line may be: canvas width minus both margins.
    pub fn max_line_width(&self) -> f32 {
        self.canvas
            .width
            .saturating_sub(self.padding_x.saturating_mul(2)) as f32
    }
}

/// Parameters for the title drawn near the top of the reel.
#[derive(Clone, Debug)]
pub struct TitleOpts {
    pub text: String,
    pub font_size_px: f32,
    /// Top edge of the title box.
    pub top: u32,
    /// Height of the title box; the text is centered inside it.
    pub box_height: u32,
    pub color: Rgba8Premul,
}

impl Default for TitleOpts {
    fn default() -> Self {
        Self {
            text: "Random Fact".to_owned(),
            font_size_px: 70.0,
            top: 100,
            box_height: 100,
            color: Rgba8Premul::WHITE,
        }
    }
}

/// Render `fact` wrapped and centered on a solid canvas, loading the font from `opts.font_path`.
#[tracing::instrument(skip(fact, opts), fields(font = %opts.font_path.display()))]
pub fn render_fact_image(fact: &str, opts: &FactImageOpts) -> FactReelResult<image::RgbImage> {
    let mut engine = TextLayoutEngine::from_font_path(&opts.font_path)?;
    render_fact_image_with(&mut engine, fact, opts)
}

/// Like [`render_fact_image`] but with an already loaded engine.
pub fn render_fact_image_with(
    engine: &mut TextLayoutEngine,
    fact: &str,
    opts: &FactImageOpts,
) -> FactReelResult<image::RgbImage> {
    opts.canvas.validate()?;

    let placed = {
        let mut measure = FontMeasure::new(engine, opts.font_size_px);
        let lines = wrap_words(fact, opts.max_line_width(), &mut measure)?;
        layout_block(&lines, opts.canvas, opts.line_gap, &mut measure)?
    };
    tracing::debug!(lines = placed.len(), "wrapped fact");

    let rgba = draw_lines(
        engine,
        opts.canvas,
        &placed,
        opts.font_size_px,
        opts.color,
        Some(opts.background),
    )?;

    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    image::RgbImage::from_raw(opts.canvas.width, opts.canvas.height, rgb)
        .ok_or_else(|| FactReelError::evaluation("rendered fact buffer has unexpected size"))
}

/// Render the title onto a transparent full-canvas layer (premultiplied RGBA8).
pub fn render_title_layer(
    engine: &mut TextLayoutEngine,
    canvas: Canvas,
    title: &TitleOpts,
) -> FactReelResult<Vec<u8>> {
    canvas.validate()?;

    let extent = FontMeasure::new(engine, title.font_size_px).measure(&title.text)?;
    let line = PlacedLine {
        text: title.text.clone(),
        x: (i64::from(canvas.width) - extent.width_px()).div_euclid(2),
        y: i64::from(title.top)
            + (i64::from(title.box_height) - extent.height_px()).div_euclid(2),
        extent,
    };

    draw_lines(
        engine,
        canvas,
        std::slice::from_ref(&line),
        title.font_size_px,
        title.color,
        None,
    )
}

fn draw_lines(
    engine: &mut TextLayoutEngine,
    canvas: Canvas,
    lines: &[PlacedLine],
    size_px: f32,
    color: Rgba8Premul,
    clear: Option<Rgba8Premul>,
) -> FactReelResult<Vec<u8>> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| FactReelError::evaluation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| FactReelError::evaluation("canvas height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    if let Some(bg) = clear {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
    }

    let brush = TextBrushRgba8::from(color);
    for line in lines {
        if line.text.is_empty() {
            continue;
        }
        let layout = engine.layout_line(&line.text, size_px, brush)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            line.x as f64,
            line.y as f64,
        )));
        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}
