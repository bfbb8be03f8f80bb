//! halfsize-transform - Resampling for halfsize
//!
//! Resizes [`PlanarChannels`](halfsize_core::PlanarChannels) by a scale
//! factor, one plane at a time:
//!
//! - Nearest-neighbor sampling
//! - Bilinear interpolation (edge neighbors clamped)

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{MAX_TARGET_DIMENSION, ScaleMethod, scale, scale_to_size, target_size};
