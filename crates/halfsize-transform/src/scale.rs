//! Image scaling operations
//!
//! Resamples [`PlanarChannels`] onto a smaller (or larger) grid:
//! - Sampling (nearest neighbor): copies the top-left source sample
//! - Bilinear: blends the four neighboring source samples
//!
//! The target grid is `floor(width / factor) x floor(height / factor)`.
//! Target pixel `(i, j)` maps to source position
//! `(i * height / th, j * width / tw)`.

use crate::{TransformError, TransformResult};
use halfsize_core::PlanarChannels;
use std::fmt;
use std::str::FromStr;

/// Largest target dimension; TGA stores width and height as `i16`.
pub const MAX_TARGET_DIMENSION: u32 = i16::MAX as u32;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling
    #[default]
    NearestNeighbor,
    /// Bilinear interpolation over the 2x2 source neighborhood
    Bilinear,
}

impl fmt::Display for ScaleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearestNeighbor => f.write_str("nearest"),
            Self::Bilinear => f.write_str("bilinear"),
        }
    }
}

impl FromStr for ScaleMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" | "nearest-neighbor" | "nn" | "sampling" => Ok(ScaleMethod::NearestNeighbor),
            "bilinear" | "linear" => Ok(ScaleMethod::Bilinear),
            _ => Err(format!(
                "Invalid scale method: {s}. Valid methods are: nearest, bilinear"
            )),
        }
    }
}

/// Compute the target grid for a scale factor.
///
/// `factor > 1` shrinks, `factor < 1` enlarges.  Each dimension is
/// `floor(dim / factor)`.
///
/// # Errors
///
/// - [`TransformError::InvalidScaleFactor`] if `factor` is not finite and positive
/// - [`TransformError::EmptyTarget`] if either target dimension floors to 0
/// - [`TransformError::TargetTooLarge`] if either target dimension exceeds
///   [`MAX_TARGET_DIMENSION`]
pub fn target_size(width: u32, height: u32, factor: f32) -> TransformResult<(u32, u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{factor} (must be finite and > 0)"
        )));
    }
    let tw = (width as f32 / factor).floor();
    let th = (height as f32 / factor).floor();
    if tw < 1.0 || th < 1.0 {
        return Err(TransformError::EmptyTarget {
            width,
            height,
            factor,
        });
    }
    let limit = MAX_TARGET_DIMENSION as f32;
    if tw > limit || th > limit {
        return Err(TransformError::TargetTooLarge {
            width: tw,
            height: th,
            max: MAX_TARGET_DIMENSION,
        });
    }
    Ok((tw as u32, th as u32))
}

/// Scale planes by a factor using the given method
pub fn scale(
    planes: &PlanarChannels,
    factor: f32,
    method: ScaleMethod,
) -> TransformResult<PlanarChannels> {
    let (tw, th) = target_size(planes.width(), planes.height(), factor)?;
    scale_to_size(planes, tw, th, method)
}

/// Scale planes to an explicit target size
pub fn scale_to_size(
    planes: &PlanarChannels,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<PlanarChannels> {
    if width == 0 || height == 0 {
        return Err(TransformError::EmptyTarget {
            width: planes.width(),
            height: planes.height(),
            factor: f32::INFINITY,
        });
    }
    if width > MAX_TARGET_DIMENSION || height > MAX_TARGET_DIMENSION {
        return Err(TransformError::TargetTooLarge {
            width: width as f32,
            height: height as f32,
            max: MAX_TARGET_DIMENSION,
        });
    }
    log::debug!(
        "scaling {}x{} -> {}x{} ({method}, {} bpp)",
        planes.width(),
        planes.height(),
        width,
        height,
        planes.depth().bits()
    );
    match method {
        ScaleMethod::NearestNeighbor => scale_by_sampling(planes, width, height),
        ScaleMethod::Bilinear => scale_bilinear(planes, width, height),
    }
}

/// Floor of `index * ratio`, clamped to the last valid source index.
#[inline]
fn source_index(index: u32, ratio: f32, len: u32) -> usize {
    ((index as f32 * ratio).floor() as usize).min(len as usize - 1)
}

/// Nearest-neighbor resampling to `tw x th`
fn scale_by_sampling(src: &PlanarChannels, tw: u32, th: u32) -> TransformResult<PlanarChannels> {
    let (w, h) = (src.width(), src.height());
    let x_ratio = w as f32 / tw as f32;
    let y_ratio = h as f32 / th as f32;

    let xs: Vec<usize> = (0..tw).map(|j| source_index(j, x_ratio, w)).collect();
    let ys: Vec<usize> = (0..th).map(|i| source_index(i, y_ratio, h)).collect();

    let mut dst = PlanarChannels::new(tw, th, src.depth())?;
    let (w, tw) = (w as usize, tw as usize);
    for &channel in src.channels() {
        let s = src.plane(channel);
        let d = dst.plane_mut(channel);
        for (i, &sy) in ys.iter().enumerate() {
            let src_row = &s[sy * w..(sy + 1) * w];
            let dst_row = &mut d[i * tw..(i + 1) * tw];
            for (out, &sx) in dst_row.iter_mut().zip(&xs) {
                *out = src_row[sx];
            }
        }
    }

    Ok(dst)
}

/// Neighbor indices and fractional offset along one axis.
#[derive(Clone, Copy)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f32,
}

fn taps(target: u32, ratio: f32, len: u32) -> Vec<Tap> {
    let last = len as usize - 1;
    (0..target)
        .map(|t| {
            let pos = t as f32 * ratio;
            let base = pos.floor();
            let lo = (base as usize).min(last);
            Tap {
                lo,
                hi: (lo + 1).min(last),
                frac: pos - base,
            }
        })
        .collect()
}

/// Bilinear resampling to `tw x th`
///
/// Blends the samples at `(x, y)`, `(x+1, y)`, `(x, y+1)` and `(x+1, y+1)`,
/// with `x+1` and `y+1` clamped to the last column and row.
fn scale_bilinear(src: &PlanarChannels, tw: u32, th: u32) -> TransformResult<PlanarChannels> {
    let (w, h) = (src.width(), src.height());
    let x_taps = taps(tw, w as f32 / tw as f32, w);
    let y_taps = taps(th, h as f32 / th as f32, h);

    let mut dst = PlanarChannels::new(tw, th, src.depth())?;
    let (w, tw) = (w as usize, tw as usize);
    for &channel in src.channels() {
        let s = src.plane(channel);
        let out = dst.plane_mut(channel);
        for (i, ty) in y_taps.iter().enumerate() {
            let top = &s[ty.lo * w..(ty.lo + 1) * w];
            let bottom = &s[ty.hi * w..(ty.hi + 1) * w];
            let yd = ty.frac;
            for (j, tx) in x_taps.iter().enumerate() {
                let xd = tx.frac;
                let a = top[tx.lo] as f32;
                let b = top[tx.hi] as f32;
                let c = bottom[tx.lo] as f32;
                let d = bottom[tx.hi] as f32;
                let val = a * (1.0 - xd) * (1.0 - yd)
                    + b * xd * (1.0 - yd)
                    + c * yd * (1.0 - xd)
                    + d * xd * yd;
                out[i * tw + j] = (val + 0.5).clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use halfsize_core::{Channel, PixelDepth};

    fn gray_planes(width: u32, height: u32, values: Vec<u8>) -> PlanarChannels {
        PlanarChannels::from_planes(
            width,
            height,
            PixelDepth::Bit24,
            values.clone(),
            values.clone(),
            values,
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_target_size_floors() {
        assert_eq!(target_size(101, 51, 2.0).unwrap(), (50, 25));
        assert_eq!(target_size(4, 4, 1.0).unwrap(), (4, 4));
        assert_eq!(target_size(3, 3, 0.5).unwrap(), (6, 6));
    }

    #[test]
    fn test_target_size_rejects_bad_factor() {
        for factor in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                target_size(10, 10, factor),
                Err(TransformError::InvalidScaleFactor(_))
            ));
        }
    }

    #[test]
    fn test_target_size_rejects_empty() {
        assert!(matches!(
            target_size(1, 8, 2.0),
            Err(TransformError::EmptyTarget {
                width: 1,
                height: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_target_size_rejects_too_large() {
        assert!(matches!(
            target_size(1, 1, 1.0e-30),
            Err(TransformError::TargetTooLarge { max: 32767, .. })
        ));
        assert!(matches!(
            target_size(200, 1, 0.005),
            Err(TransformError::TargetTooLarge { .. })
        ));
        assert!(target_size(100, 1, 0.01).is_ok());
    }

    #[test]
    fn test_scale_to_size_rejects_too_large() {
        let planes = gray_planes(1, 1, vec![5]);
        assert!(matches!(
            scale_to_size(&planes, 40_000, 1, ScaleMethod::NearestNeighbor),
            Err(TransformError::TargetTooLarge { .. })
        ));
    }

    #[test]
    fn test_sampling_picks_top_left() {
        let planes = gray_planes(4, 4, (0..16).collect());
        let out = scale(&planes, 2.0, ScaleMethod::NearestNeighbor).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.plane(Channel::Red), &[0, 2, 8, 10]);
    }

    #[test]
    fn test_sampling_identity() {
        let values: Vec<u8> = (0..30).map(|v| v * 7).collect();
        let planes = gray_planes(6, 5, values);
        let out = scale(&planes, 1.0, ScaleMethod::NearestNeighbor).unwrap();
        assert_eq!(out, planes);
    }

    #[test]
    fn test_bilinear_integer_ratio_matches_sampling() {
        let planes = gray_planes(4, 4, (0..16).map(|v| v * 10).collect());
        let nn = scale(&planes, 2.0, ScaleMethod::NearestNeighbor).unwrap();
        let bl = scale(&planes, 2.0, ScaleMethod::Bilinear).unwrap();
        assert_eq!(nn, bl);
    }

    #[test]
    fn test_bilinear_blends_neighbors() {
        let row = [0u8, 100, 200];
        let values: Vec<u8> = row.iter().cycle().take(9).copied().collect();
        let planes = gray_planes(3, 3, values);
        let out = scale(&planes, 1.5, ScaleMethod::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        // column 1 samples x = 1.5, halfway between 100 and 200
        assert_eq!(out.plane(Channel::Blue), &[0, 150, 0, 150]);
    }

    #[test]
    fn test_bilinear_clamps_at_edges() {
        let planes = gray_planes(2, 1, vec![10, 50]);
        let out = scale(&planes, 0.5, ScaleMethod::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(out.plane(Channel::Green), &[10, 30, 50, 50, 10, 30, 50, 50]);
    }

    #[test]
    fn test_alpha_plane_scaled() {
        let planes = PlanarChannels::from_planes(
            2,
            2,
            PixelDepth::Bit32,
            vec![1, 2, 3, 4],
            vec![5, 6, 7, 8],
            vec![9, 10, 11, 12],
            vec![13, 14, 15, 16],
        )
        .unwrap();
        let out = scale(&planes, 2.0, ScaleMethod::NearestNeighbor).unwrap();
        assert_eq!(out.plane(Channel::Alpha), &[13]);
        assert_eq!(out.plane(Channel::Blue), &[1]);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "Nearest".parse::<ScaleMethod>().unwrap(),
            ScaleMethod::NearestNeighbor
        );
        assert_eq!(
            "bilinear".parse::<ScaleMethod>().unwrap(),
            ScaleMethod::Bilinear
        );
        assert!("bicubic".parse::<ScaleMethod>().is_err());
    }
}
