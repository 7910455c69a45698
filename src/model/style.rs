use std::ops::RangeInclusive;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{MemeError, MemeResult};

/// Valid range of the per-band font scale (tenths of the base font size).
pub const FONT_SCALE_RANGE: RangeInclusive<u8> = 5..=20;
/// Valid range of the per-band vertical offset, in percent of canvas height.
pub const OFFSET_PERCENT_RANGE: RangeInclusive<u8> = 0..=50;

/// Caption fill color choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    /// `#FFFFFF` with a black outline.
    #[default]
    White,
    /// `#FFD700` with a black outline.
    Yellow,
    /// `#000000` with a white outline.
    Black,
}

impl TextColor {
    /// Fill color of caption glyphs.
    pub fn fill(self) -> Rgba8 {
        match self {
            TextColor::White => Rgba8::WHITE,
            TextColor::Yellow => Rgba8::opaque(0xff, 0xd7, 0x00),
            TextColor::Black => Rgba8::BLACK,
        }
    }

    /// Outline color, always contrasting with [`TextColor::fill`].
    pub fn stroke(self) -> Rgba8 {
        match self {
            TextColor::Black => Rgba8::WHITE,
            TextColor::White | TextColor::Yellow => Rgba8::BLACK,
        }
    }
}

impl std::str::FromStr for TextColor {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(TextColor::White),
            "yellow" => Ok(TextColor::Yellow),
            "black" => Ok(TextColor::Black),
            other => Err(MemeError::validation(format!(
                "unknown text color '{other}' (expected white, yellow or black)"
            ))),
        }
    }
}

/// Caption styling knobs shared by both bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Top band font scale in tenths of the base size (5–20).
    pub top_font_scale: u8,
    /// Bottom band font scale in tenths of the base size (5–20).
    pub bottom_font_scale: u8,
    /// Fill color; the outline color follows from it.
    pub text_color: TextColor,
    /// Distance of the top band's first line from the top edge, percent of height (0–50).
    pub top_offset_percent: u8,
    /// Distance of the bottom band's last line from the bottom edge, percent of height (0–50).
    pub bottom_offset_percent: u8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            top_font_scale: 10,
            bottom_font_scale: 10,
            text_color: TextColor::White,
            top_offset_percent: 5,
            bottom_offset_percent: 5,
        }
    }
}

impl StyleConfig {
    /// Copy with every numeric knob clamped into its declared range.
    pub fn clamped(self) -> Self {
        Self {
            top_font_scale: clamp_to(self.top_font_scale, &FONT_SCALE_RANGE),
            bottom_font_scale: clamp_to(self.bottom_font_scale, &FONT_SCALE_RANGE),
            text_color: self.text_color,
            top_offset_percent: clamp_to(self.top_offset_percent, &OFFSET_PERCENT_RANGE),
            bottom_offset_percent: clamp_to(self.bottom_offset_percent, &OFFSET_PERCENT_RANGE),
        }
    }

    /// Font scale of one band.
    pub fn font_scale(&self, band: CaptionBand) -> u8 {
        match band {
            CaptionBand::Top => self.top_font_scale,
            CaptionBand::Bottom => self.bottom_font_scale,
        }
    }

    /// Offset percent of one band.
    pub fn offset_percent(&self, band: CaptionBand) -> u8 {
        match band {
            CaptionBand::Top => self.top_offset_percent,
            CaptionBand::Bottom => self.bottom_offset_percent,
        }
    }

    /// Merge a partial update and clamp the result.
    pub fn merged(self, patch: &StylePatch) -> Self {
        Self {
            top_font_scale: patch.top_font_scale.unwrap_or(self.top_font_scale),
            bottom_font_scale: patch.bottom_font_scale.unwrap_or(self.bottom_font_scale),
            text_color: patch.text_color.unwrap_or(self.text_color),
            top_offset_percent: patch.top_offset_percent.unwrap_or(self.top_offset_percent),
            bottom_offset_percent: patch
                .bottom_offset_percent
                .unwrap_or(self.bottom_offset_percent),
        }
        .clamped()
    }
}

fn clamp_to(v: u8, range: &RangeInclusive<u8>) -> u8 {
    v.clamp(*range.start(), *range.end())
}

/// Partial [`StyleConfig`] update; `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    /// New top font scale.
    pub top_font_scale: Option<u8>,
    /// New bottom font scale.
    pub bottom_font_scale: Option<u8>,
    /// New fill color.
    pub text_color: Option<TextColor>,
    /// New top offset percent.
    pub top_offset_percent: Option<u8>,
    /// New bottom offset percent.
    pub bottom_offset_percent: Option<u8>,
}

/// One of the two caption regions of a meme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionBand {
    /// Anchored to the top edge, flows downward.
    Top,
    /// Anchored to the bottom edge, flows upward.
    Bottom,
}

/// Top and bottom caption text. Empty text means the band is not drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CaptionText {
    /// Top caption.
    pub top: String,
    /// Bottom caption.
    pub bottom: String,
}

impl CaptionText {
    /// Build from a `(top, bottom)` pair.
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// Text of one band.
    pub fn get(&self, band: CaptionBand) -> &str {
        match band {
            CaptionBand::Top => &self.top,
            CaptionBand::Bottom => &self.bottom,
        }
    }

    /// Replace the text of one band.
    pub fn set(&mut self, band: CaptionBand, text: impl Into<String>) {
        match band {
            CaptionBand::Top => self.top = text.into(),
            CaptionBand::Bottom => self.bottom = text.into(),
        }
    }

    /// Return `true` when the band has something to draw.
    pub fn is_drawn(&self, band: CaptionBand) -> bool {
        !self.get(band).trim().is_empty()
    }

    /// Return `true` when at least one band has something to draw.
    pub fn any_drawn(&self) -> bool {
        self.is_drawn(CaptionBand::Top) || self.is_drawn(CaptionBand::Bottom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/style.rs"]
mod tests;
