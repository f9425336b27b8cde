//! Rendered frames and their export.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::error::{IndicatorError, Result};

/// An RGBA raster produced by the [`SoftwareRenderer`](super::SoftwareRenderer).
#[derive(Clone, PartialEq)]
pub struct Frame {
    pixmap: Pixmap,
}

impl Frame {
    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA value of a pixel, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Coverage of every pixel, row-major
    pub fn alpha_mask(&self) -> Vec<u8> {
        self.pixmap.pixels().iter().map(|p| p.alpha()).collect()
    }

    /// Number of pixels with any coverage
    pub fn covered_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    /// Convert to a straight-alpha image
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(self.width(), self.height(), data).ok_or(IndicatorError::InvalidSize {
            width: self.width(),
            height: self.height(),
        })
    }

    /// Encode as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        self.to_rgba_image()?
            .write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Write the frame to `path` as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_rgba_image()?
            .save_with_format(path, ImageFormat::Png)?;
        log::debug!("Saved {}x{} frame to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
