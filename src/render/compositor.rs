use std::sync::Arc;

use crate::assets::bitmap::Bitmap;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{MemeError, MemeResult};
use crate::model::style::{CaptionText, StyleConfig};
use crate::render::layout::{BandLayout, layout_captions};
use crate::render::output::RenderedMeme;
use crate::text::font::FontChoice;
use crate::text::shaper::{CaptionShaper, ShapedLine, TextMeasure};

/// Backdrop color when no image is loaded, and behind the "generating" overlay.
pub const PLACEHOLDER_BG: Rgba8 = Rgba8::opaque(0x1e, 0x29, 0x3b);
/// Color of the placeholder diagonal cross.
pub const PLACEHOLDER_CROSS: Rgba8 = Rgba8::opaque(0x33, 0x41, 0x55);
/// Color of placeholder and overlay messages.
pub const PLACEHOLDER_TEXT: Rgba8 = Rgba8::opaque(0xf1, 0xf5, 0xf9);
/// Width of the placeholder cross strokes.
pub const PLACEHOLDER_CROSS_WIDTH: f64 = 4.0;
/// Font size of placeholder and overlay messages.
pub const PLACEHOLDER_FONT_PX: f32 = 30.0;
/// Message shown when there is no background image.
pub const PLACEHOLDER_MESSAGE: &str = "Upload an Image to Start";
/// Message shown while an image is being generated.
pub const GENERATING_MESSAGE: &str = "Generating image…";
/// Color images are flattened onto so transparent regions export opaque.
pub const FLATTEN_BG: Rgba8 = Rgba8::WHITE;

/// What is painted underneath the captions.
#[derive(Clone, Copy, Debug)]
pub enum Backdrop<'a> {
    /// A background image; the canvas takes its size.
    Image(&'a Bitmap),
    /// Nothing loaded: dark fill, diagonal cross and an upload hint on the default canvas.
    Placeholder,
    /// An image request is in flight: dark fill and a progress message on `canvas`.
    Generating(Canvas),
}

impl Backdrop<'_> {
    /// Backdrop for an optional background image.
    pub fn from_background(background: Option<&Bitmap>) -> Backdrop<'_> {
        match background {
            Some(b) => Backdrop::Image(b),
            None => Backdrop::Placeholder,
        }
    }

    /// Canvas size the backdrop dictates.
    pub fn canvas(&self) -> Canvas {
        match self {
            Backdrop::Image(b) => b.canvas(),
            Backdrop::Placeholder => Canvas::DEFAULT,
            Backdrop::Generating(c) => *c,
        }
    }
}

#[derive(Clone)]
struct ImagePaint {
    source: Bitmap,
    paint: vello_cpu::Image,
}

struct ShapedBand {
    layout: BandLayout,
    lines: Vec<ShapedLine>,
}

struct ShapedMessage {
    line: ShapedLine,
    origin: Point,
}

/// CPU meme compositor powered by `vello_cpu`.
///
/// Every call repaints the whole canvas from its inputs. Only immutable inputs are cached between
/// calls: the resolved font and the converted background image.
pub struct MemeCompositor {
    font_choice: FontChoice,
    shaper: Option<CaptionShaper>,
    image_cache: Option<ImagePaint>,
}

impl std::fmt::Debug for MemeCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeCompositor")
            .field("font_choice", &self.font_choice)
            .field("shaper", &self.shaper)
            .finish_non_exhaustive()
    }
}

impl Default for MemeCompositor {
    fn default() -> Self {
        Self::new(FontChoice::System)
    }
}

impl MemeCompositor {
    /// Create a compositor. The font is resolved lazily on the first render that needs text.
    pub fn new(font_choice: FontChoice) -> Self {
        Self {
            font_choice,
            shaper: None,
            image_cache: None,
        }
    }

    /// Shaper for the configured font, resolving it on first use.
    pub fn shaper(&mut self) -> MemeResult<&mut CaptionShaper> {
        if self.shaper.is_none() {
            let face = self
                .font_choice
                .resolve()
                .map_err(|e| MemeError::render(format!("caption font unavailable: {e}")))?;
            let shaper = CaptionShaper::new(&face)?;
            tracing::debug!(family = shaper.family_name(), source = face.label(), "caption font ready");
            self.shaper = Some(shaper);
        }
        self.shaper
            .as_mut()
            .ok_or_else(|| MemeError::render("caption shaper missing"))
    }

    fn image_paint_for(&mut self, bitmap: &Bitmap) -> MemeResult<vello_cpu::Image> {
        if let Some(cached) = &self.image_cache
            && cached.source.shares_pixels_with(bitmap)
        {
            return Ok(cached.paint.clone());
        }

        let pixmap =
            image_premul_bytes_to_pixmap(bitmap.rgba8_premul(), bitmap.width(), bitmap.height())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache = Some(ImagePaint {
            source: bitmap.clone(),
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

/// Rasterizes a meme from its inputs.
///
/// [`MemeCompositor`] is the production implementation; the editor only depends on this trait.
pub trait MemeRenderer {
    /// Render `captions` over an explicit backdrop.
    fn render_backdrop(
        &mut self,
        backdrop: Backdrop<'_>,
        captions: &CaptionText,
        style: &StyleConfig,
    ) -> MemeResult<RenderedMeme>;

    /// Render `captions` over `background` (or the placeholder when absent).
    fn render(
        &mut self,
        background: Option<&Bitmap>,
        captions: &CaptionText,
        style: &StyleConfig,
    ) -> MemeResult<RenderedMeme> {
        self.render_backdrop(Backdrop::from_background(background), captions, style)
    }

    /// Render `captions` over the "generating" overlay sized like `background` would be.
    fn render_generating(
        &mut self,
        background: Option<&Bitmap>,
        captions: &CaptionText,
        style: &StyleConfig,
    ) -> MemeResult<RenderedMeme> {
        let canvas = Backdrop::from_background(background).canvas();
        self.render_backdrop(Backdrop::Generating(canvas), captions, style)
    }
}

impl MemeRenderer for MemeCompositor {
    #[tracing::instrument(skip_all, fields(canvas = ?backdrop.canvas()))]
    fn render_backdrop(
        &mut self,
        backdrop: Backdrop<'_>,
        captions: &CaptionText,
        style: &StyleConfig,
    ) -> MemeResult<RenderedMeme> {
        let canvas = backdrop.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MemeError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MemeError::render("canvas height exceeds u16"))?;

        let message = match backdrop {
            Backdrop::Image(_) => None,
            Backdrop::Placeholder => Some(PLACEHOLDER_MESSAGE),
            Backdrop::Generating(_) => Some(GENERATING_MESSAGE),
        };

        let mut bands = Vec::new();
        let mut shaped_message = None;
        let mut font = None;
        let needs_captions = captions.any_drawn();
        if needs_captions || message.is_some() {
            match self.shaper() {
                Ok(shaper) => {
                    for layout in layout_captions(&mut *shaper, canvas, captions, style) {
                        let lines = layout
                            .lines
                            .iter()
                            .map(|l| shaper.shape_line(&l.text, layout.font_size))
                            .collect();
                        bands.push(ShapedBand { layout, lines });
                    }
                    if let Some(text) = message {
                        shaped_message = Some(shape_centered_message(shaper, canvas, text));
                    }
                    font = Some(shaper.font().clone());
                }
                Err(err) if !needs_captions => {
                    tracing::warn!(error = %err, "no font for placeholder message; drawing without it");
                }
                Err(err) => return Err(err),
            }
        }

        let image = match backdrop {
            Backdrop::Image(bitmap) => Some(self.image_paint_for(bitmap)?),
            Backdrop::Placeholder | Backdrop::Generating(_) => None,
        };

        let style = style.clamped();
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match (&backdrop, image) {
            (Backdrop::Image(_), Some(image)) => {
                fill_canvas(&mut ctx, canvas, FLATTEN_BG);
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(image);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(canvas.width),
                    f64::from(canvas.height),
                ));
            }
            (Backdrop::Placeholder, _) => {
                fill_canvas(&mut ctx, canvas, PLACEHOLDER_BG);
                draw_cross(&mut ctx, canvas);
            }
            _ => fill_canvas(&mut ctx, canvas, PLACEHOLDER_BG),
        }

        if let Some(font) = &font {
            if let Some(msg) = &shaped_message {
                draw_glyph_line(
                    &mut ctx,
                    font,
                    PLACEHOLDER_FONT_PX,
                    &msg.line,
                    msg.origin,
                    None,
                    PLACEHOLDER_TEXT,
                );
            }

            let fill = style.text_color.fill();
            let outline = style.text_color.stroke();
            for band in &bands {
                for (placed, shaped) in band.layout.lines.iter().zip(&band.lines) {
                    draw_glyph_line(
                        &mut ctx,
                        font,
                        band.layout.font_size,
                        shaped,
                        Point::new(placed.left, placed.baseline),
                        Some((outline, band.layout.stroke_width)),
                        fill,
                    );
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        flatten_onto_in_place(&mut data, FLATTEN_BG);

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            bands = bands.len(),
            "composited meme"
        );
        Ok(RenderedMeme {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }
}

fn shape_centered_message(shaper: &mut CaptionShaper, canvas: Canvas, text: &str) -> ShapedMessage {
    let line = shaper.shape_line(text, PLACEHOLDER_FONT_PX);
    let m = shaper.vertical_metrics(PLACEHOLDER_FONT_PX);
    let baseline =
        f64::from(canvas.height) / 2.0 + (f64::from(m.ascent) - f64::from(m.descent)) / 2.0;
    let left = canvas.center_x() - f64::from(line.width) / 2.0;
    ShapedMessage {
        line,
        origin: Point::new(left, baseline),
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn fill_canvas(ctx: &mut vello_cpu::RenderContext, canvas: Canvas, color: Rgba8) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(canvas.width),
        f64::from(canvas.height),
    ));
}

fn draw_cross(ctx: &mut vello_cpu::RenderContext, canvas: Canvas) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mut cross = vello_cpu::kurbo::BezPath::new();
    cross.move_to((0.0, 0.0));
    cross.line_to((w, h));
    cross.move_to((w, 0.0));
    cross.line_to((0.0, h));

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(PLACEHOLDER_CROSS));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(PLACEHOLDER_CROSS_WIDTH));
    ctx.stroke_path(&cross);
}

/// Draw one shaped line with its left end of the baseline at `origin`: outline first, then fill.
fn draw_glyph_line(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    size_px: f32,
    line: &ShapedLine,
    origin: Point,
    outline: Option<(Rgba8, f64)>,
    fill: Rgba8,
) {
    if line.glyphs.is_empty() {
        return;
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

    if let Some((color, width)) = outline
        && width > 0.0
    {
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width).with_join(vello_cpu::kurbo::Join::Round),
        );
        ctx.set_paint(color_to_cpu(color));
        ctx.glyph_run(font)
            .font_size(size_px)
            .stroke_glyphs(cpu_glyphs(line));
    }

    ctx.set_paint(color_to_cpu(fill));
    ctx.glyph_run(font)
        .font_size(size_px)
        .fill_glyphs(cpu_glyphs(line));
}

fn cpu_glyphs(line: &ShapedLine) -> impl Iterator<Item = vello_cpu::Glyph> + '_ {
    line.glyphs.iter().map(|g| vello_cpu::Glyph {
        id: g.id,
        x: g.x,
        y: g.y,
    })
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> MemeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MemeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MemeError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(MemeError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Premultiplied "over" of every pixel onto an opaque color, leaving all alpha at 255.
fn flatten_onto_in_place(rgba8_premul: &mut [u8], bg: Rgba8) {
    for px in rgba8_premul.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        let inv = 255 - u16::from(a);
        let over = |c: u8, b: u8| -> u8 {
            (u16::from(c) + (u16::from(b) * inv + 127) / 255).min(255) as u8
        };
        px[0] = over(px[0], bg.r);
        px[1] = over(px[1], bg.g);
        px[2] = over(px[2], bg.b);
        px[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
