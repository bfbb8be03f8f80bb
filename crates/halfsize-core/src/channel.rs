//! Channel planes and the packed/planar conversions
//!
//! [`deinterleave`] splits a packed [`PixelBuffer`] into one byte plane per
//! color component; [`interleave`] packs planes back into a buffer.
//! Both are pure and know nothing about resampling.
//!
//! # Plane layout
//!
//! Every plane holds `width * height` bytes in row-major order, so index
//! `i` refers to the same pixel in each plane. The alpha plane is empty
//! for 24-bit images.

use crate::buffer::{PixelBuffer, PixelDepth};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Color component selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Blue channel
    Blue,
    /// Green channel
    Green,
    /// Red channel
    Red,
    /// Alpha channel (32-bit only)
    Alpha,
}

impl Channel {
    /// Lowercase channel name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Blue => "blue",
            Channel::Green => "green",
            Channel::Red => "red",
            Channel::Alpha => "alpha",
        }
    }
}

/// Byte order of the color components inside one packed pixel.
///
/// Alpha, when present, is always the fourth byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelOrder {
    /// Blue, green, red[, alpha]. The order TGA files use.
    #[default]
    Bgra,
    /// Red, green, blue[, alpha]
    Rgba,
}

impl ChannelOrder {
    /// Components in the order they appear in a packed pixel.
    pub fn color_layout(self) -> [Channel; 3] {
        match self {
            ChannelOrder::Bgra => [Channel::Blue, Channel::Green, Channel::Red],
            ChannelOrder::Rgba => [Channel::Red, Channel::Green, Channel::Blue],
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bgra => f.write_str("bgra"),
            Self::Rgba => f.write_str("rgba"),
        }
    }
}

impl FromStr for ChannelOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bgra" | "bgr" => Ok(ChannelOrder::Bgra),
            "rgba" | "rgb" => Ok(ChannelOrder::Rgba),
            _ => Err(format!(
                "Invalid channel order: {s}. Valid orders are: bgra, rgba"
            )),
        }
    }
}

/// Four independent byte planes describing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarChannels {
    width: u32,
    height: u32,
    depth: PixelDepth,
    blue: Vec<u8>,
    green: Vec<u8>,
    red: Vec<u8>,
    alpha: Vec<u8>,
}

impl PlanarChannels {
    /// Create zero-filled planes for an image of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let npix = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            depth,
            blue: vec![0; npix],
            green: vec![0; npix],
            red: vec![0; npix],
            alpha: if depth.has_alpha() {
                vec![0; npix]
            } else {
                Vec::new()
            },
        })
    }

    /// Assemble planes from existing vectors.
    ///
    /// `alpha` must be empty for 24-bit images and `width * height` long
    /// for 32-bit images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::PlaneSizeMismatch`] for the first plane of the wrong length.
    pub fn from_planes(
        width: u32,
        height: u32,
        depth: PixelDepth,
        blue: Vec<u8>,
        green: Vec<u8>,
        red: Vec<u8>,
        alpha: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let npix = width as usize * height as usize;
        let alpha_len = if depth.has_alpha() { npix } else { 0 };
        for (channel, plane, expected) in [
            (Channel::Blue, &blue, npix),
            (Channel::Green, &green, npix),
            (Channel::Red, &red, npix),
            (Channel::Alpha, &alpha, alpha_len),
        ] {
            if plane.len() != expected {
                return Err(Error::PlaneSizeMismatch {
                    channel: channel.name(),
                    expected,
                    actual: plane.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            depth,
            blue,
            green,
            red,
            alpha,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel depth of the image the planes describe.
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Entries per plane (`width * height`).
    pub fn plane_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Channels that carry data: blue, green, red, plus alpha at 32 bpp.
    pub fn channels(&self) -> &'static [Channel] {
        if self.depth.has_alpha() {
            &[Channel::Blue, Channel::Green, Channel::Red, Channel::Alpha]
        } else {
            &[Channel::Blue, Channel::Green, Channel::Red]
        }
    }

    /// Borrow one plane. The alpha plane is empty at 24 bpp.
    pub fn plane(&self, channel: Channel) -> &[u8] {
        match channel {
            Channel::Blue => &self.blue,
            Channel::Green => &self.green,
            Channel::Red => &self.red,
            Channel::Alpha => &self.alpha,
        }
    }

    /// Mutably borrow one plane.
    pub fn plane_mut(&mut self, channel: Channel) -> &mut [u8] {
        self.plane_vec(channel)
    }

    fn plane_vec(&mut self, channel: Channel) -> &mut Vec<u8> {
        match channel {
            Channel::Blue => &mut self.blue,
            Channel::Green => &mut self.green,
            Channel::Red => &mut self.red,
            Channel::Alpha => &mut self.alpha,
        }
    }
}

/// Split a packed buffer into per-channel planes.
///
/// Walks the buffer one pixel group at a time, preserving pixel order.
/// Each resulting plane has exactly `width * height` entries.
pub fn deinterleave(buffer: &PixelBuffer, order: ChannelOrder) -> PlanarChannels {
    let depth = buffer.depth();
    let bpp = depth.bytes_per_pixel();
    let npix = buffer.pixel_count();
    let layout = order.color_layout();

    let mut planes = PlanarChannels {
        width: buffer.width(),
        height: buffer.height(),
        depth,
        blue: Vec::with_capacity(npix),
        green: Vec::with_capacity(npix),
        red: Vec::with_capacity(npix),
        alpha: Vec::with_capacity(if depth.has_alpha() { npix } else { 0 }),
    };

    for px in buffer.data().chunks_exact(bpp) {
        for (offset, &channel) in layout.iter().enumerate() {
            planes.plane_vec(channel).push(px[offset]);
        }
        if depth.has_alpha() {
            planes.alpha.push(px[3]);
        }
    }

    planes
}

/// Pack per-channel planes back into an interleaved buffer.
///
/// Output length is `plane_len * bytes_per_pixel`.
pub fn interleave(planes: &PlanarChannels, order: ChannelOrder) -> Result<PixelBuffer> {
    let depth = planes.depth();
    let npix = planes.plane_len();
    let layout = order.color_layout();
    let colors = layout.map(|channel| planes.plane(channel));

    let mut data = Vec::with_capacity(npix * depth.bytes_per_pixel());
    for i in 0..npix {
        for plane in &colors {
            data.push(plane[i]);
        }
        if depth.has_alpha() {
            data.push(planes.alpha[i]);
        }
    }

    PixelBuffer::from_data(planes.width(), planes.height(), depth, data)
}
