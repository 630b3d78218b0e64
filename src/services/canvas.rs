//! The visible output surface of the grayscale pipeline.

use pixel_filter::{PixelBuffer, CHANNELS};
use std::io::Cursor;

use crate::error::RenderError;

/// An RGBA drawing surface, transparent until something is put on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    buffer: PixelBuffer,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let buffer =
            PixelBuffer::transparent(width, height).map_err(RenderError::CanvasAllocation)?;
        Ok(Self { buffer })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Copy `image` onto the canvas with its top-left corner at `(dx, dy)`.
    ///
    /// Pixels are replaced, not blended. Whatever falls outside the canvas
    /// is clipped.
    pub fn put_image_data(&mut self, image: &PixelBuffer, dx: i64, dy: i64) {
        let x0 = dx.max(0);
        let x1 = dx
            .saturating_add(image.width() as i64)
            .min(self.width() as i64);
        if x0 >= x1 {
            return;
        }
        let span = (x1 - x0) as usize * CHANNELS;
        let src_col = (x0 - dx) as usize * CHANNELS;

        let dst_stride = self.width() as usize * CHANNELS;
        let src_stride = image.width() as usize * CHANNELS;
        let dst_height = self.height() as i64;
        let src = image.data();
        let dst = self.buffer.data_mut();

        for row in 0..image.height() as i64 {
            let y = dy.saturating_add(row);
            if y < 0 {
                continue;
            }
            if y >= dst_height {
                break;
            }
            let src_start = row as usize * src_stride + src_col;
            let dst_start = y as usize * dst_stride + x0 as usize * CHANNELS;
            dst[dst_start..dst_start + span].copy_from_slice(&src[src_start..src_start + span]);
        }
    }

    /// Put `image` at the origin.
    pub fn present(&mut self, image: &PixelBuffer) {
        self.put_image_data(image, 0, 0);
    }

    /// Encode the canvas as an 8-bit RGBA PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::Fast);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::PngEncode(e.to_string()))?;
            writer
                .write_image_data(self.buffer.data())
                .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        }
        Ok(buf.into_inner())
    }
}
