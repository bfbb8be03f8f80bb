//! halfsize-test - Regression test framework for halfsize
//!
//! Provides [`RegParams`], which accumulates checks instead of panicking on
//! the first mismatch, plus deterministic synthetic images so tests need no
//! binary fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use halfsize_test::{RegParams, gradient_buffer};
//!
//! let mut rp = RegParams::new("scale");
//! let buf = gradient_buffer(8, 6, PixelDepth::Bit24)?;
//! rp.compare_values(8.0, buf.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use halfsize_core::{PixelBuffer, PixelDepth};
use halfsize_io::TgaHeader;
use std::path::{Path, PathBuf};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // halfsize-test is at crates/halfsize-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path of a named file inside the regout directory
pub fn regout_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}", regout_dir(), name))
}

/// A deterministic pattern where every channel varies with position.
///
/// Neighboring pixels differ, so sampling mistakes show up as mismatches.
pub fn gradient_buffer(width: u32, height: u32, depth: PixelDepth) -> TestResult<PixelBuffer> {
    let bpp = depth.bytes_per_pixel();
    let mut data = Vec::with_capacity(width as usize * height as usize * bpp);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 17 + y * 3) as u8);
            data.push((x * 5 + y * 29) as u8);
            data.push(((x ^ y) * 11) as u8);
            if depth.has_alpha() {
                data.push((x + y * width) as u8);
            }
        }
    }
    PixelBuffer::from_data(width, height, depth, data).map_err(|e| TestError::Build(e.to_string()))
}

/// A buffer where every pixel has the same bytes.
///
/// `pixel` must be 3 bytes long for 24-bit and 4 bytes long for 32-bit.
pub fn uniform_buffer(
    width: u32,
    height: u32,
    depth: PixelDepth,
    pixel: &[u8],
) -> TestResult<PixelBuffer> {
    if pixel.len() != depth.bytes_per_pixel() {
        return Err(TestError::Build(format!(
            "pixel has {} bytes, depth {} needs {}",
            pixel.len(),
            depth.bits(),
            depth.bytes_per_pixel()
        )));
    }
    let data = pixel.repeat(width as usize * height as usize);
    PixelBuffer::from_data(width, height, depth, data).map_err(|e| TestError::Build(e.to_string()))
}

/// Encode `pixels` as a complete TGA file in memory.
pub fn tga_bytes(pixels: &PixelBuffer) -> TestResult<Vec<u8>> {
    let header = TgaHeader::true_color(pixels.width(), pixels.height(), pixels.depth())
        .map_err(|e| TestError::Build(e.to_string()))?;
    halfsize_io::write_tga_mem(&header, pixels).map_err(|e| TestError::Build(e.to_string()))
}

/// Write `pixels` as a TGA file at `path`.
pub fn write_test_tga<P: AsRef<Path>>(path: P, pixels: &PixelBuffer) -> TestResult<()> {
    let path = path.as_ref();
    let data = tga_bytes(pixels)?;
    std::fs::write(path, data).map_err(|e| TestError::ImageWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
