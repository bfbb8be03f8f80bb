//! Load, resize and save orchestration
//!
//! An [`Image`] only exists after a successful load, so every operation on
//! it starts from a decoded header and pixel buffer.  Resizing always works
//! from the untouched original:
//!
//! ```text
//! packed BGR(A) -> deinterleave -> scale each plane -> interleave -> packed
//! ```

use crate::error::{PipelineError, PipelineResult};
use halfsize_core::{ChannelOrder, PixelBuffer, PixelDepth, deinterleave, interleave};
use halfsize_io::{TgaHeader, TgaImage};
use halfsize_transform::ScaleMethod;
use std::path::Path;

/// Parameters for [`Image::resize`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    /// Divisor applied to both dimensions (`> 1` shrinks)
    pub scale_factor: f32,
    /// Resampling method
    pub method: ScaleMethod,
    /// Order of the color bytes within each packed pixel
    pub channel_order: ChannelOrder,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            method: ScaleMethod::NearestNeighbor,
            channel_order: ChannelOrder::Bgra,
        }
    }
}

impl ResizeOptions {
    /// Set the scale factor
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the resampling method
    pub fn with_method(mut self, method: ScaleMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the packed channel order
    pub fn with_channel_order(mut self, channel_order: ChannelOrder) -> Self {
        self.channel_order = channel_order;
        self
    }
}

/// A loaded TGA image and, after [`resize`](Image::resize), its resampled copy
#[derive(Debug, Clone)]
pub struct Image {
    header: TgaHeader,
    original: PixelBuffer,
    resized: Option<PixelBuffer>,
}

impl Image {
    /// Load a TGA file
    ///
    /// # Errors
    ///
    /// Any [`IoError`](halfsize_io::IoError) from opening or decoding the
    /// file, wrapped in [`PipelineError::Io`].
    pub fn load<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path = path.as_ref();
        let image = halfsize_io::read_tga_file(path).inspect_err(|e| {
            log::debug!("failed to load {}: {e}", path.display());
        })?;
        let image = Self::from_tga(image);
        log::info!(
            "loaded {} ({}x{}, {} bpp)",
            path.display(),
            image.width(),
            image.height(),
            image.depth().bits()
        );
        Ok(image)
    }

    /// Decode a TGA file held in memory
    pub fn from_bytes(data: &[u8]) -> PipelineResult<Self> {
        Ok(Self::from_tga(halfsize_io::read_tga_mem(data)?))
    }

    /// Wrap an already decoded TGA image
    pub fn from_tga(image: TgaImage) -> Self {
        Self {
            header: image.header,
            original: image.pixels,
            resized: None,
        }
    }

    /// Resample the original pixels and keep the result for [`save`](Self::save)
    ///
    /// Each call starts from the original buffer and replaces any earlier
    /// result.  On error the earlier result is left in place.
    pub fn resize(&mut self, options: &ResizeOptions) -> PipelineResult<()> {
        let planes = deinterleave(&self.original, options.channel_order);
        let scaled = halfsize_transform::scale(&planes, options.scale_factor, options.method)?;
        let packed = interleave(&scaled, options.channel_order)?;
        log::info!(
            "resized {}x{} -> {}x{} (factor {}, {})",
            self.width(),
            self.height(),
            packed.width(),
            packed.height(),
            options.scale_factor,
            options.method
        );
        self.resized = Some(packed);
        Ok(())
    }

    /// Write the resized image as a TGA file
    ///
    /// The header is the loaded one with its dimensions replaced.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NotResized`] if [`resize`](Self::resize) has not
    /// succeeded yet.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PipelineResult<()> {
        let path = path.as_ref();
        let resized = self.resized.as_ref().ok_or(PipelineError::NotResized)?;
        halfsize_io::write_tga_file(path, &self.header, resized).inspect_err(|e| {
            log::debug!("failed to save {}: {e}", path.display());
        })?;
        log::info!(
            "saved {} ({}x{})",
            path.display(),
            resized.width(),
            resized.height()
        );
        Ok(())
    }

    /// Encode the resized image as TGA bytes
    pub fn to_bytes(&self) -> PipelineResult<Vec<u8>> {
        let resized = self.resized.as_ref().ok_or(PipelineError::NotResized)?;
        Ok(halfsize_io::write_tga_mem(&self.header, resized)?)
    }

    /// Width of the original image
    pub fn width(&self) -> u32 {
        self.original.width()
    }

    /// Height of the original image
    pub fn height(&self) -> u32 {
        self.original.height()
    }

    /// Pixel depth of the original image
    pub fn depth(&self) -> PixelDepth {
        self.original.depth()
    }

    /// Width of the resized image, if any
    pub fn resized_width(&self) -> Option<u32> {
        self.resized.as_ref().map(PixelBuffer::width)
    }

    /// Height of the resized image, if any
    pub fn resized_height(&self) -> Option<u32> {
        self.resized.as_ref().map(PixelBuffer::height)
    }

    /// Header as loaded
    pub fn header(&self) -> &TgaHeader {
        &self.header
    }

    /// Original pixels
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// Resized pixels, if any
    pub fn resized(&self) -> Option<&PixelBuffer> {
        self.resized.as_ref()
    }
}
