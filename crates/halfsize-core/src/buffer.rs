//! Packed pixel buffers
//!
//! A [`PixelBuffer`] owns the raw, interleaved pixel bytes of one image
//! together with its dimensions and depth.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, row 0 first, left to right
//! - Each pixel occupies `bytes_per_pixel` consecutive bytes
//! - There is no row padding
//!
//! # Ownership model
//!
//! A buffer has exactly one owner. Transformations take `&PixelBuffer` and
//! return a new buffer by value; nothing hands out shared mutable access.

use crate::error::{Error, Result};

/// Pixel depth (bits per pixel)
///
/// Only the two true-color depths are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 24-bit color, three channels, no alpha
    Bit24 = 24,
    /// 32-bit color with alpha
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 24 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            24 => Ok(PixelDepth::Bit24),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Number of bytes per packed pixel (3 or 4).
    pub fn bytes_per_pixel(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Whether pixels of this depth carry an alpha byte.
    pub fn has_alpha(self) -> bool {
        self == PixelDepth::Bit32
    }
}

/// Packed, interleaved pixel data of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    depth: PixelDepth,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let len = Self::required_len(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            data: vec![0; len],
        })
    }

    /// Wrap existing packed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSizeMismatch`] if `data.len()` is not exactly
    /// `width * height * bytes_per_pixel`.
    pub fn from_data(width: u32, height: u32, depth: PixelDepth, data: Vec<u8>) -> Result<Self> {
        let expected = Self::required_len(width, height, depth)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    /// Byte length needed for a packed image of the given shape.
    pub fn required_len(width: u32, height: u32, depth: PixelDepth) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(width as usize * height as usize * depth.bytes_per_pixel())
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel depth.
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw packed bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.depth.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        Some(&self.data[start..start + bpp])
    }
}
