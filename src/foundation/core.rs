use crate::foundation::error::{MemeError, MemeResult};

pub use kurbo::Point;

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas used when no background image is loaded.
    pub const DEFAULT: Canvas = Canvas {
        width: 800,
        height: 600,
    };

    /// Create a validated canvas with both sides `>= 1`.
    pub fn new(width: u32, height: u32) -> MemeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MemeError::validation(format!(
                "canvas must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Horizontal midpoint, the anchor every caption line is centered on.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::opaque(0xff, 0xff, 0xff);
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::opaque(0x00, 0x00, 0x00);

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to the premultiplied form used by pixel buffers.
    pub fn to_premul(self) -> [u8; 4] {
        let premul = |c: u8| -> u8 { ((u16::from(c) * u16::from(self.a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
