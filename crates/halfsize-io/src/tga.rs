//! TGA image format support
//!
//! Reads and writes uncompressed true-color (image type 2) TrueVision TGA
//! files at 24 or 32 bits per pixel.  Color-mapped and run-length encoded
//! variants are rejected.
//!
//! # Format layout
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       1     id length
//! 1       1     colour map type (must be 0)
//! 2       1     image type (must be 2)
//! 3       2     colour map origin
//! 5       2     colour map length
//! 7       1     colour map depth
//! 8       2     x origin
//! 10      2     y origin
//! 12      2     width (signed, >= 1)
//! 14      2     height (signed, >= 1)
//! 16      1     pixel depth (24 or 32)
//! 17      1     image descriptor
//! 18      n     image id (n = id length)
//! 18+n    ...   width * height * (depth / 8) bytes of packed B, G, R[, A]
//! ```
//!
//! All multi-byte fields are little-endian.  There is no footer.

use crate::{IoError, IoResult};
use halfsize_core::{PixelBuffer, PixelDepth};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Size of the fixed TGA header in bytes
pub const TGA_HEADER_SIZE: usize = 18;

/// Image type code for uncompressed true-color images
const IMAGE_TYPE_TRUE_COLOR: u8 = 2;

/// The TGA file header.
///
/// Field order and widths match the on-disk layout exactly.  The image id
/// bytes that follow the fixed header are kept in `image_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub colour_map_type: u8,
    pub image_type: u8,
    pub colour_map_origin: u16,
    pub colour_map_length: u16,
    pub colour_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: i16,
    pub height: i16,
    pub pixel_depth: u8,
    pub image_descriptor: u8,
    pub image_id: Vec<u8>,
}

impl TgaHeader {
    /// Header for a fresh uncompressed true-color image.
    ///
    /// The alpha-bits nibble of the descriptor is set to 8 for 32-bit
    /// images, 0 otherwise.
    pub fn true_color(width: u32, height: u32, depth: PixelDepth) -> IoResult<Self> {
        Ok(Self {
            id_length: 0,
            colour_map_type: 0,
            image_type: IMAGE_TYPE_TRUE_COLOR,
            colour_map_origin: 0,
            colour_map_length: 0,
            colour_map_depth: 0,
            x_origin: 0,
            y_origin: 0,
            width: dimension_to_i16(width, "width")?,
            height: dimension_to_i16(height, "height")?,
            pixel_depth: depth.bits() as u8,
            image_descriptor: if depth.has_alpha() { 8 } else { 0 },
            image_id: Vec::new(),
        })
    }

    /// Decode the 18 fixed fields without validating them.
    pub fn from_bytes(bytes: &[u8; TGA_HEADER_SIZE]) -> Self {
        Self {
            id_length: bytes[0],
            colour_map_type: bytes[1],
            image_type: bytes[2],
            colour_map_origin: u16::from_le_bytes([bytes[3], bytes[4]]),
            colour_map_length: u16::from_le_bytes([bytes[5], bytes[6]]),
            colour_map_depth: bytes[7],
            x_origin: u16::from_le_bytes([bytes[8], bytes[9]]),
            y_origin: u16::from_le_bytes([bytes[10], bytes[11]]),
            width: i16::from_le_bytes([bytes[12], bytes[13]]),
            height: i16::from_le_bytes([bytes[14], bytes[15]]),
            pixel_depth: bytes[16],
            image_descriptor: bytes[17],
            image_id: Vec::new(),
        }
    }

    /// Encode the 18 fixed fields in declaration order.
    pub fn to_bytes(&self) -> [u8; TGA_HEADER_SIZE] {
        let mut out = [0u8; TGA_HEADER_SIZE];
        out[0] = self.id_length;
        out[1] = self.colour_map_type;
        out[2] = self.image_type;
        out[3..5].copy_from_slice(&self.colour_map_origin.to_le_bytes());
        out[5..7].copy_from_slice(&self.colour_map_length.to_le_bytes());
        out[7] = self.colour_map_depth;
        out[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        out[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.pixel_depth;
        out[17] = self.image_descriptor;
        out
    }

    /// Check that the header describes an image this crate can decode.
    ///
    /// Checks run in a fixed order and the first failure wins: colour map
    /// present, image type, dimensions, then pixel depth.
    pub fn validate(&self) -> IoResult<()> {
        if self.colour_map_type != 0 {
            return Err(IoError::UnsupportedFormat(format!(
                "colour-mapped TGA (colour map type {})",
                self.colour_map_type
            )));
        }
        if self.image_type != IMAGE_TYPE_TRUE_COLOR {
            return Err(IoError::UnsupportedFormat(format!(
                "TGA image type {} (only uncompressed true-color is supported)",
                self.image_type
            )));
        }
        if self.width < 1 || self.height < 1 {
            return Err(IoError::BadFormat(format!(
                "invalid TGA dimensions: {}x{}",
                self.width, self.height
            )));
        }
        if self.pixel_depth > 32 {
            return Err(IoError::UnsupportedFormat(format!(
                "TGA pixel depth {} exceeds 32 bits",
                self.pixel_depth
            )));
        }
        self.depth().map(|_| ())
    }

    /// Pixel depth as a typed value.
    pub fn depth(&self) -> IoResult<PixelDepth> {
        PixelDepth::from_bits(self.pixel_depth as u32).map_err(|_| {
            IoError::UnsupportedFormat(format!("TGA pixel depth {}", self.pixel_depth))
        })
    }

    /// Width in pixels. Only meaningful after [`validate`](Self::validate).
    pub fn width(&self) -> u32 {
        self.width.max(0) as u32
    }

    /// Height in pixels. Only meaningful after [`validate`](Self::validate).
    pub fn height(&self) -> u32 {
        self.height.max(0) as u32
    }

    /// Length of the pixel payload described by this header.
    pub fn pixel_data_len(&self) -> IoResult<usize> {
        Ok(PixelBuffer::required_len(self.width(), self.height(), self.depth()?)?)
    }

    /// Copy of this header with the dimensions replaced.
    ///
    /// Every other field, including the image id, is kept unchanged.
    pub fn with_dimensions(&self, width: u32, height: u32) -> IoResult<Self> {
        Ok(Self {
            width: dimension_to_i16(width, "width")?,
            height: dimension_to_i16(height, "height")?,
            ..self.clone()
        })
    }
}

/// A decoded TGA file: its header plus the packed pixel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaImage {
    pub header: TgaHeader,
    pub pixels: PixelBuffer,
}

fn dimension_to_i16(value: u32, name: &str) -> IoResult<i16> {
    i16::try_from(value)
        .ok()
        .filter(|&v| v >= 1)
        .ok_or_else(|| IoError::BadFormat(format!("TGA {name} {value} out of range 1..=32767")))
}

/// Read exactly `len` bytes, reporting how many arrived if the stream ends early.
fn read_section<R: Read>(reader: &mut R, len: usize, section: &'static str) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(IoError::TruncatedData {
            section,
            expected: len,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

/// Read and validate a TGA header, including the image id field.
pub fn read_header<R: Read>(mut reader: R) -> IoResult<TgaHeader> {
    let raw = read_section(&mut reader, TGA_HEADER_SIZE, "header")?;
    let mut fixed = [0u8; TGA_HEADER_SIZE];
    fixed.copy_from_slice(&raw);

    let mut header = TgaHeader::from_bytes(&fixed);
    log::debug!(
        "TGA header: type={} cmap={} {}x{} depth={} id_len={} descriptor={:#04x}",
        header.image_type,
        header.colour_map_type,
        header.width,
        header.height,
        header.pixel_depth,
        header.id_length,
        header.image_descriptor
    );
    header.validate()?;

    if header.id_length > 0 {
        header.image_id = read_section(&mut reader, header.id_length as usize, "image id")?;
    }
    Ok(header)
}

/// Read the packed pixel payload that follows a header.
///
/// Exactly `width * height * bytes_per_pixel` bytes are consumed.
pub fn read_pixels<R: Read>(mut reader: R, header: &TgaHeader) -> IoResult<PixelBuffer> {
    let depth = header.depth()?;
    let len = header.pixel_data_len()?;
    let data = read_section(&mut reader, len, "pixel data")?;
    log::trace!("read {len} bytes of pixel data");
    Ok(PixelBuffer::from_data(header.width(), header.height(), depth, data)?)
}

/// Read a complete TGA image
pub fn read_tga<R: Read>(mut reader: R) -> IoResult<TgaImage> {
    let header = read_header(&mut reader)?;
    let pixels = read_pixels(&mut reader, &header)?;
    Ok(TgaImage { header, pixels })
}

/// Header to write in front of `pixels`: `header` with its dimensions
/// replaced. Fails if the depth or image id do not fit.
fn output_header(header: &TgaHeader, pixels: &PixelBuffer) -> IoResult<TgaHeader> {
    if header.pixel_depth as u32 != pixels.depth().bits() {
        return Err(IoError::BadFormat(format!(
            "pixel buffer depth {} does not match header depth {}",
            pixels.depth().bits(),
            header.pixel_depth
        )));
    }
    if header.image_id.len() != header.id_length as usize {
        return Err(IoError::BadFormat(format!(
            "image id is {} bytes but id length field is {}",
            header.image_id.len(),
            header.id_length
        )));
    }
    header.with_dimensions(pixels.width(), pixels.height())
}

fn write_checked<W: Write>(
    mut writer: W,
    out_header: &TgaHeader,
    pixels: &PixelBuffer,
) -> IoResult<()> {
    writer.write_all(&out_header.to_bytes())?;
    writer.write_all(&out_header.image_id)?;
    writer.write_all(pixels.data())?;
    log::trace!(
        "wrote TGA {}x{} ({} bytes of pixel data)",
        pixels.width(),
        pixels.height(),
        pixels.data().len()
    );
    Ok(())
}

/// Write a TGA image
///
/// The header is copied from `header` with its width and height replaced by
/// those of `pixels`; the pixel depth must match.
pub fn write_tga<W: Write>(writer: W, header: &TgaHeader, pixels: &PixelBuffer) -> IoResult<()> {
    let out_header = output_header(header, pixels)?;
    write_checked(writer, &out_header, pixels)
}

/// Read a TGA image from a file path
///
/// The file handle is released before returning, on success and on error.
pub fn read_tga_file<P: AsRef<Path>>(path: P) -> IoResult<TgaImage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_tga(BufReader::new(file))
}

/// Write a TGA image to a file path, creating or truncating it
///
/// The header is checked first; if that fails the path is left untouched.
pub fn write_tga_file<P: AsRef<Path>>(
    path: P,
    header: &TgaHeader,
    pixels: &PixelBuffer,
) -> IoResult<()> {
    let path = path.as_ref();
    let out_header = output_header(header, pixels)?;
    let file = File::create(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_checked(&mut writer, &out_header, pixels)?;
    writer.flush()?;
    Ok(())
}

/// Read a TGA image from memory
pub fn read_tga_mem(data: &[u8]) -> IoResult<TgaImage> {
    read_tga(data)
}

/// Read only the TGA header from memory, without the pixel payload
pub fn read_tga_header_mem(data: &[u8]) -> IoResult<TgaHeader> {
    read_header(data)
}

/// Write a TGA image to memory
pub fn write_tga_mem(header: &TgaHeader, pixels: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut buffer =
        Vec::with_capacity(TGA_HEADER_SIZE + header.image_id.len() + pixels.data().len());
    write_tga(&mut buffer, header, pixels)?;
    Ok(buffer)
}
