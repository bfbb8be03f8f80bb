//! I/O error types
//!
//! Every TGA read or write failure surfaces as one [`IoError`] variant, so
//! callers can tell an unopenable path from a malformed or unsupported file.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for TGA I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// The path could not be opened for reading or writing
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header describes a structurally invalid image
    #[error("bad format: {0}")]
    BadFormat(String),

    /// The file is a valid TGA but uses a feature this crate does not handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The stream ended before a section was fully read
    #[error("truncated {section}: expected {expected} bytes, got {actual}")]
    TruncatedData {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Any other read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the core library (e.g. buffer size mismatch)
    #[error("core error: {0}")]
    Core(#[from] halfsize_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
