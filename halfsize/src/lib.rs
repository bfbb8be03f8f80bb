//! halfsize - Downsample uncompressed TGA images
//!
//! Loads a true-color TGA, splits it into channel planes, resamples every
//! plane and writes the result back with the original header fields.
//!
//! # Example
//!
//! ```no_run
//! use halfsize::{Image, ResizeOptions, ScaleMethod};
//!
//! let mut image = Image::load("photo.tga").unwrap();
//! image
//!     .resize(&ResizeOptions::default().with_method(ScaleMethod::Bilinear))
//!     .unwrap();
//! image.save("photo_half.tga").unwrap();
//! ```

// Re-export core types (pixel buffers and channel planes)
pub use halfsize_core::{
    Channel, ChannelOrder, PixelBuffer, PixelDepth, PlanarChannels, deinterleave, interleave,
};

// Re-export domain crates as modules to avoid name conflicts
pub use halfsize_io as io;
pub use halfsize_transform as transform;

mod error;
pub mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use halfsize_transform::ScaleMethod;
pub use pipeline::{Image, ResizeOptions};
