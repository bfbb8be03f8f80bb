//! Error types for halfsize-transform

use thiserror::Error;

/// Errors that can occur while resampling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] halfsize_core::Error),

    /// Scale factor is not a positive finite number
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// The scale factor shrinks the image to nothing
    #[error("scale factor {factor} reduces {width}x{height} to an empty image")]
    EmptyTarget { width: u32, height: u32, factor: f32 },

    /// The target grid cannot be stored in a TGA header
    #[error("target {width}x{height} exceeds the maximum dimension {max}")]
    TargetTooLarge { width: f32, height: f32, max: u32 },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
