use crate::foundation::error::{MemeError, MemeResult};
use crate::text::font::FontFace;

/// Font-level vertical metrics at a given size, both measured away from the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalMetrics {
    /// Distance from the top of the line box down to the baseline.
    pub ascent: f32,
    /// Distance from the baseline down to the bottom of the line box.
    pub descent: f32,
}

/// Text measurement seam used by caption placement.
///
/// The compositor implements it with real font shaping; layout tests use fixed-advance fakes.
pub trait TextMeasure {
    /// Advance width of `text` laid out on a single line at `size_px`.
    fn advance(&mut self, text: &str, size_px: f32) -> f32;

    /// Vertical line metrics of the caption font at `size_px`.
    fn vertical_metrics(&mut self, size_px: f32) -> VerticalMetrics;
}

/// One line shaped into positioned glyphs.
///
/// Glyph `x` is relative to the left edge of the line, glyph `y` relative to the baseline.
#[derive(Clone, Debug)]
pub struct ShapedLine {
    /// Glyphs ready for `vello_cpu` glyph runs.
    pub glyphs: Vec<vello_cpu::Glyph>,
    /// Advance width of the whole line.
    pub width: f32,
}

/// Stateful helper that shapes single caption lines with Parley using one registered font.
pub struct CaptionShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for CaptionShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionShaper")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl CaptionShaper {
    /// Register `face` with fresh Parley contexts.
    pub fn new(face: &FontFace) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            MemeError::render(format!(
                "no font families registered from '{}'",
                face.label()
            ))
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::render("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
            face.index(),
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Family name Parley detected in the registered font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font handle for `vello_cpu` glyph runs.
    pub fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BLACK,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Shape `text` as one unbroken line.
    pub fn shape_line(&mut self, text: &str, size_px: f32) -> ShapedLine {
        let layout = self.layout_line(text, size_px);
        let mut glyphs = Vec::new();
        for line in layout.lines() {
            let baseline = line.metrics().baseline;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
        }
        ShapedLine {
            glyphs,
            width: layout.width(),
        }
    }
}

impl TextMeasure for CaptionShaper {
    fn advance(&mut self, text: &str, size_px: f32) -> f32 {
        self.layout_line(text, size_px).width()
    }

    fn vertical_metrics(&mut self, size_px: f32) -> VerticalMetrics {
        let layout = self.layout_line("M", size_px);
        layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                VerticalMetrics {
                    ascent: m.ascent.abs(),
                    descent: m.descent.abs(),
                }
            })
            .unwrap_or(VerticalMetrics {
                ascent: size_px * 0.8,
                descent: size_px * 0.2,
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
