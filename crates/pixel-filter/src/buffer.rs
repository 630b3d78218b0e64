//! RGBA pixel buffer and rectangular regions.
//!
//! [`PixelBuffer`] owns interleaved 8-bit RGBA data together with its
//! dimensions and guarantees the two agree. [`PixelBuffer::region`]
//! copies a rectangle out of a buffer the way a 2D canvas read-back
//! does: pixels that fall outside the source image come back as
//! transparent black.

use crate::error::PixelError;
use crate::filter;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A rectangle in pixel coordinates.
///
/// The origin may be negative or lie past the image edge; only the
/// overlap with the source image carries pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `width x height` image.
    #[inline]
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns true if the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink the size to at most `max_width x max_height`, keeping the
    /// origin.
    ///
    /// A region drawn at the origin of a `max_width x max_height` surface
    /// shows nothing past those bounds, so the cropped rectangle reads
    /// back the same visible pixels with a bounded allocation.
    ///
    /// ```
    /// use pixel_filter::Rect;
    ///
    /// let huge = Rect::new(-1, 0, 30_000, 30_000);
    /// assert_eq!(huge.cropped_to(2, 2), Rect::new(-1, 0, 2, 2));
    /// ```
    #[inline]
    pub fn cropped_to(self, max_width: u32, max_height: u32) -> Self {
        Self::new(
            self.x,
            self.y,
            self.width.min(max_width),
            self.height.min(max_height),
        )
    }
}

/// Interleaved RGBA8 pixel data with known dimensions.
///
/// # Example
///
/// ```
/// use pixel_filter::PixelBuffer;
///
/// let buffer = PixelBuffer::new(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// assert_eq!(buffer.pixel(0, 1), Some([5, 6, 7, 8]));
///
/// assert!(PixelBuffer::new(1, 2, vec![0; 7]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing RGBA data.
    ///
    /// Fails with [`PixelError::LengthMismatch`] unless
    /// `data.len() == width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PixelError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A fully transparent black buffer.
    pub fn transparent(width: u32, height: u32) -> Result<Self, PixelError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn len_pixels(&self) -> usize {
        self.data.len() / CHANNELS
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw bytes. The length cannot change through
    /// a slice, so the buffer invariant holds.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The `[R, G, B, A]` quartet at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.data[start..start + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy `rect` out of this buffer into a new one.
    ///
    /// Pixels of `rect` that lie outside the image read as `[0, 0, 0, 0]`.
    /// A rectangle with zero width or height is rejected with
    /// [`PixelError::EmptyRegion`]. The result is `rect.width * rect.height`
    /// pixels however little of it overlaps the image; see
    /// [`Rect::cropped_to`] to bound it.
    pub fn region(&self, rect: Rect) -> Result<PixelBuffer, PixelError> {
        if rect.is_empty() {
            return Err(PixelError::EmptyRegion {
                width: rect.width,
                height: rect.height,
            });
        }

        let mut out = PixelBuffer::transparent(rect.width, rect.height)?;

        // Horizontal overlap is the same for every row.
        let src_x0 = rect.x.max(0);
        let src_x1 = rect
            .x
            .saturating_add(rect.width as i64)
            .min(self.width as i64);
        if src_x0 >= src_x1 {
            return Ok(out);
        }
        let span = (src_x1 - src_x0) as usize * CHANNELS;
        let dst_col = (src_x0 - rect.x) as usize * CHANNELS;

        let src_stride = self.width as usize * CHANNELS;
        let dst_stride = rect.width as usize * CHANNELS;

        for row in 0..rect.height as i64 {
            let sy = rect.y.saturating_add(row);
            if sy < 0 {
                continue;
            }
            if sy >= self.height as i64 {
                break;
            }
            let src_start = sy as usize * src_stride + src_x0 as usize * CHANNELS;
            let dst_start = row as usize * dst_stride + dst_col;
            out.data[dst_start..dst_start + span]
                .copy_from_slice(&self.data[src_start..src_start + span]);
        }

        Ok(out)
    }

    /// Desaturate in place. See [`filter::grayscale`].
    pub fn grayscale(&mut self) {
        filter::grayscale(&mut self.data);
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, PixelError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(PixelError::DimensionsOverflow { width, height })
}
