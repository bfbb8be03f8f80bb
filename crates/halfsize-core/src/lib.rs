//! halfsize-core - Basic data structures for the halfsize resampler
//!
//! - [`PixelBuffer`] - packed, interleaved pixel bytes with their shape
//! - [`PixelDepth`] - 24-bit or 32-bit true color
//! - [`PlanarChannels`] - one byte plane per color component
//! - [`deinterleave`] / [`interleave`] - conversions between the two layouts

pub mod buffer;
pub mod channel;
pub mod error;

pub use buffer::{PixelBuffer, PixelDepth};
pub use channel::{Channel, ChannelOrder, PlanarChannels, deinterleave, interleave};
pub use error::{Error, Result};
