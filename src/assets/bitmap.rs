use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{MemeError, MemeResult};

/// Immutable decoded raster image in premultiplied RGBA8 form.
///
/// Cloning is cheap: pixel storage is shared. A bitmap is never mutated after construction; the
/// editor replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied RGBA8 bytes (row-major, tightly packed).
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> MemeResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if rgba8_premul.len() != canvas.rgba8_len() {
            return Err(MemeError::validation(format!(
                "bitmap byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Build a bitmap filled with one opaque color. Mostly useful for tests and previews.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> MemeResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let mut data = Vec::with_capacity(canvas.rgba8_len());
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }

    /// Premultiplied RGBA of one pixel, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8_premul.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Return `true` when both bitmaps share the same pixel storage.
    pub fn shares_pixels_with(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }
}
