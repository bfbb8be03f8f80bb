//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use halfsize_core::PixelBuffer;
use halfsize_io::TgaHeader;
use std::fs;
use std::path::PathBuf;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check every written file by reading it back (default)
    #[default]
    Compare,
    /// Display mode - write outputs without checking them
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, a running check index, and every failure seen so
/// far.  Checks never panic; call [`cleanup`](Self::cleanup) at the end and
/// assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "tgaio")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from `REGTEST_MODE`; the output directory is created
    /// if missing.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if they differ by at most `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two byte arrays for exact equality
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let first_diff = data1
                .iter()
                .zip(data2)
                .position(|(a, b)| a != b)
                .unwrap_or(data1.len().min(data2.len()));
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}, first difference at byte {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len(),
                first_diff
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two pixel buffers for exact equality
    ///
    /// Dimensions and depth must match, then every pixel is compared.
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.index += 1;

        if buf1.width() != buf2.width()
            || buf1.height() != buf2.height()
            || buf1.depth() != buf2.depth()
        {
            let msg = format!(
                "Failure in {}_reg: buffer comparison for index {} - shape mismatch \
                 ({}x{} d={} vs {}x{} d={})",
                self.test_name,
                self.index,
                buf1.width(),
                buf1.height(),
                buf1.depth().bits(),
                buf2.width(),
                buf2.height(),
                buf2.depth().bits()
            );
            return self.fail(msg);
        }

        for y in 0..buf1.height() {
            for x in 0..buf1.width() {
                if buf1.pixel(x, y) != buf2.pixel(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: buffer comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    return self.fail(msg);
                }
            }
        }

        true
    }

    /// Write a TGA to the regout directory and check it reads back intact
    ///
    /// The file is named `<test>.<index>.tga`.  In compare mode the file is
    /// decoded again and its pixels and non-dimension header fields are
    /// compared with the inputs.
    pub fn write_tga_and_check(
        &mut self,
        header: &TgaHeader,
        pixels: &PixelBuffer,
    ) -> TestResult<PathBuf> {
        self.index += 1;

        let local_path = PathBuf::from(format!(
            "{}/{}.{:02}.tga",
            regout_dir(),
            self.test_name,
            self.index
        ));

        halfsize_io::write_tga_file(&local_path, header, pixels).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        if !self.display() {
            let image =
                halfsize_io::read_tga_file(&local_path).map_err(|e| TestError::ImageLoad {
                    path: local_path.display().to_string(),
                    message: e.to_string(),
                })?;
            let expected = header
                .with_dimensions(pixels.width(), pixels.height())
                .map_err(|e| TestError::Build(e.to_string()))?;
            if image.header != expected || &image.pixels != pixels {
                let msg = format!(
                    "Failure in {}_reg, index {}: {} did not read back intact",
                    self.test_name,
                    self.index,
                    local_path.display()
                );
                self.fail(msg);
            }
        }

        Ok(local_path)
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
