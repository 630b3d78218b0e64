//! pixel-filter: RGBA pixel buffers and in-place color filters
//!
//! This crate holds the pure part of the grayscale demo: a validated
//! RGBA pixel buffer, canvas-style region read-back, and the channel
//! averaging filter. It has no I/O and no dependencies; decoding and
//! presenting images is left to the caller.
//!
//! # Quick Start
//!
//! ```
//! use pixel_filter::{PixelBuffer, Rect};
//!
//! let data = vec![0, 0, 255, 255, 90, 90, 90, 0];
//! let mut buffer = PixelBuffer::new(2, 1, data).unwrap();
//! buffer.grayscale();
//!
//! assert_eq!(buffer.data(), &[85, 85, 85, 255, 90, 90, 90, 0]);
//!
//! let left = buffer.region(Rect::new(0, 0, 1, 1)).unwrap();
//! assert_eq!(left.pixel(0, 0), Some([85, 85, 85, 255]));
//! ```
//!
//! # Buffer Layout
//!
//! Pixels are stored row-major, four bytes per pixel in `R, G, B, A`
//! order, with no row padding. A buffer of `width x height` pixels is
//! always exactly `width * height * 4` bytes long; [`PixelBuffer::new`]
//! rejects anything else.
//!
//! # Averaging
//!
//! The grayscale filter uses the unweighted channel mean, truncated
//! toward zero:
//!
//! ```text
//! avg = floor((R + G + B) / 3)
//! R' = G' = B' = avg
//! A' = A
//! ```
//!
//! This is not a luminance-preserving conversion (no Rec. 601/709
//! weights). Pixels that are already neutral (`R == G == B`) are left
//! exactly as they are.

pub mod buffer;
pub mod error;
pub mod filter;


pub use buffer::{PixelBuffer, Rect, CHANNELS};
pub use error::PixelError;
pub use filter::{average_rgb, grayscale};
