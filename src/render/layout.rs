//! Caption placement: font sizing, wrapping and per-line anchor positions.
//!
//! Everything here is pure geometry over a [`TextMeasure`]; nothing touches pixels.

use crate::foundation::core::Canvas;
use crate::model::style::{CaptionBand, CaptionText, StyleConfig};
use crate::text::shaper::{TextMeasure, VerticalMetrics};
use crate::text::wrap::wrap_lines;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Fraction of the canvas width available to a caption line (5% margin each side).
pub const MAX_TEXT_WIDTH_FRACTION: f64 = 0.9;
/// Outline width is the font size divided by this.
pub const STROKE_DIVISOR: f64 = 8.0;

/// Font size every band scales from: one tenth of the canvas width.
pub fn base_font_size(canvas: Canvas) -> u32 {
    canvas.width / 10
}

/// Final font size of a band for a (clamped) scale given in tenths.
pub fn band_font_size(canvas: Canvas, scale: u8) -> u32 {
    base_font_size(canvas) * u32::from(scale) / 10
}

/// Widest a caption line may be before it wraps.
pub fn max_text_width(canvas: Canvas) -> f64 {
    f64::from(canvas.width) * MAX_TEXT_WIDTH_FRACTION
}

/// One wrapped caption line with its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Uppercased line text.
    pub text: String,
    /// Measured advance width.
    pub width: f64,
    /// X of the line's left edge (the line is centered on the canvas midpoint).
    pub left: f64,
    /// Y of the top edge of the line box.
    pub top: f64,
    /// Y of the glyph baseline.
    pub baseline: f64,
    /// Y of the bottom edge of the line box.
    pub bottom: f64,
}

/// Layout of one caption band.
#[derive(Clone, Debug, PartialEq)]
pub struct BandLayout {
    /// Which band this is.
    pub band: CaptionBand,
    /// Font size in pixels.
    pub font_size: f32,
    /// Distance between consecutive line tops.
    pub line_height: f64,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Lines in reading order.
    pub lines: Vec<PlacedLine>,
}

/// Lay out one band, or `None` when it has nothing to draw.
pub fn layout_band(
    measure: &mut dyn TextMeasure,
    canvas: Canvas,
    band: CaptionBand,
    text: &str,
    style: &StyleConfig,
) -> Option<BandLayout> {
    if text.trim().is_empty() {
        return None;
    }
    let style = style.clamped();

    let size = band_font_size(canvas, style.font_scale(band));
    if size == 0 {
        tracing::debug!(?band, width = canvas.width, "canvas too narrow for captions");
        return None;
    }
    let font_size = size as f32;
    let line_height = f64::from(size) * LINE_HEIGHT_FACTOR;
    let max_width = max_text_width(canvas) as f32;

    let upper = text.to_uppercase();
    let wrapped = wrap_lines(&upper, max_width, |s| measure.advance(s, font_size));
    let metrics = measure.vertical_metrics(font_size);

    let height = f64::from(canvas.height);
    let offset = height * f64::from(style.offset_percent(band)) / 100.0;
    let n = wrapped.len();

    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let top = match band {
                CaptionBand::Top => offset + i as f64 * line_height,
                CaptionBand::Bottom => {
                    let bottom = height - offset - (n - 1 - i) as f64 * line_height;
                    bottom - line_box_height(metrics)
                }
            };
            let width = f64::from(measure.advance(&text, font_size));
            PlacedLine {
                left: canvas.center_x() - width / 2.0,
                top,
                baseline: top + f64::from(metrics.ascent),
                bottom: top + line_box_height(metrics),
                width,
                text,
            }
        })
        .collect();

    Some(BandLayout {
        band,
        font_size,
        line_height,
        stroke_width: f64::from(size) / STROKE_DIVISOR,
        lines,
    })
}

/// Lay out both bands; bands with empty text are skipped.
pub fn layout_captions(
    measure: &mut dyn TextMeasure,
    canvas: Canvas,
    captions: &CaptionText,
    style: &StyleConfig,
) -> Vec<BandLayout> {
    [CaptionBand::Top, CaptionBand::Bottom]
        .into_iter()
        .filter_map(|band| layout_band(measure, canvas, band, captions.get(band), style))
        .collect()
}

fn line_box_height(m: VerticalMetrics) -> f64 {
    f64::from(m.ascent) + f64::from(m.descent)
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
