//! Error types for halfsize-core
//!
//! Covers the shape checks performed on pixel buffers and channel planes.
//! Higher-level crates wrap this type with `#[from]` so callers see one
//! error per layer.

use thiserror::Error;

/// halfsize-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel depth other than 24 or 32 bits
    #[error("invalid pixel depth: {0} bpp")]
    InvalidDepth(u32),

    /// Packed buffer length does not match `width * height * bytes_per_pixel`
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A channel plane has the wrong number of entries
    #[error("{channel} plane has {actual} entries, expected {expected}")]
    PlaneSizeMismatch {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for halfsize-core operations
pub type Result<T> = std::result::Result<T, Error>;
