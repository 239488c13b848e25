//! Error types for raster and codec operations

use thiserror::Error;

/// Errors raised by [`crate::RasterBuffer`] operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Region {width}x{height} needs {expected} pixels, got {actual}")]
    RegionSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised at the image codec boundary
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
