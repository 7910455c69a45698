use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{MemeError, MemeResult};

/// File name prefix of exported memes.
pub const EXPORT_PREFIX: &str = "memebot-nepal";

/// A fully composited meme as opaque RGBA8 pixels.
///
/// Every pixel has alpha 255, so premultiplied and straight RGBA coincide and the bytes can be
/// written to PNG unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMeme {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl RenderedMeme {
    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA of one pixel, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> MemeResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| MemeError::render("rendered meme byte length mismatch"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Write as a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> MemeResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }

        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Export file name derived from a unix timestamp in milliseconds.
pub fn export_file_name(unix_millis: u128) -> String {
    format!("{EXPORT_PREFIX}-{unix_millis}.png")
}

/// Export path inside `dir` stamped with the current time.
pub fn timestamped_export_path(dir: &Path) -> MemeResult<PathBuf> {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_millis();
    Ok(dir.join(export_file_name(millis)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
