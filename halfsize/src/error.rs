//! Error types for the image pipeline

use halfsize_io::IoError;
use halfsize_transform::TransformError;
use thiserror::Error;

/// Errors returned by [`Image`](crate::Image) operations
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading or writing the TGA file failed
    #[error("{0}")]
    Io(#[from] IoError),

    /// Resampling failed
    #[error("resize failed: {0}")]
    Transform(#[from] TransformError),

    /// Repacking the resampled planes failed
    #[error("core error: {0}")]
    Core(#[from] halfsize_core::Error),

    /// `save` was called before any successful `resize`
    #[error("image has not been resized")]
    NotResized,
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
