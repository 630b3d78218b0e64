//! Error type for pixel buffer operations.

use std::fmt;

/// Error returned when a pixel buffer or region cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelError {
    /// Byte length does not match `width * height * 4`
    LengthMismatch {
        /// Bytes required for the given dimensions
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },
    /// Width or height is so large that the byte length overflows `usize`
    DimensionsOverflow {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
    /// Requested region has zero width or zero height
    EmptyRegion {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelError::LengthMismatch { expected, actual } => write!(
                f,
                "pixel data length mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            PixelError::DimensionsOverflow { width, height } => {
                write!(f, "dimensions {}x{} are too large", width, height)
            }
            PixelError::EmptyRegion { width, height } => {
                write!(f, "region {}x{} contains no pixels", width, height)
            }
        }
    }
}

impl std::error::Error for PixelError {}
