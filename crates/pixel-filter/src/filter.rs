//! Channel-averaging grayscale filter.

use crate::buffer::CHANNELS;

/// Truncating mean of three 8-bit channels.
///
/// ```
/// use pixel_filter::average_rgb;
/// assert_eq!(average_rgb(0, 0, 255), 85);
/// assert_eq!(average_rgb(1, 1, 0), 0);
/// assert_eq!(average_rgb(255, 255, 255), 255);
/// ```
#[inline]
pub fn average_rgb(r: u8, g: u8, b: u8) -> u8 {
    // Sum is at most 765, the quotient at most 255.
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Desaturate interleaved RGBA bytes in place.
///
/// Each complete `R, G, B, A` quartet has its color channels replaced by
/// [`average_rgb`]; alpha is never touched. A trailing partial quartet
/// (only possible for slices that did not come from a
/// [`PixelBuffer`](crate::PixelBuffer)) is left as is.
pub fn grayscale(data: &mut [u8]) {
    for px in data.chunks_exact_mut(CHANNELS) {
        let avg = average_rgb(px[0], px[1], px[2]);
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
    }
}
