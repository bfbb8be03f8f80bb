//! halfsize-io - Image I/O for halfsize
//!
//! Reads and writes uncompressed true-color TGA images.  Readers and writers
//! are generic over `std::io::Read` / `std::io::Write`; the `_file` and
//! `_mem` variants cover paths and byte slices.

mod error;
pub mod tga;

pub use error::{IoError, IoResult};
pub use tga::{
    TGA_HEADER_SIZE, TgaHeader, TgaImage, read_header, read_pixels, read_tga, read_tga_file,
    read_tga_header_mem, read_tga_mem, write_tga, write_tga_file, write_tga_mem,
};
