//! Separable two-pass resize.

use image::RgbaImage;
use rayon::prelude::*;

use super::{Kernel, ResampleError};

const CHANNELS: usize = 4;

/// Taps contributing to one output sample: `weights[i]` applies to source
/// index `start + i`. Weights sum to one.
#[derive(Debug, Clone, PartialEq)]
struct Contribution {
    start: usize,
    weights: Vec<f32>,
}

/// Resize `source` to exactly `width × height` with `kernel`.
///
/// # Errors
///
/// Returns [`ResampleError::ZeroTarget`] for a zero target dimension and
/// [`ResampleError::EmptySource`] for a source without pixels.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use tiler::resample::{resize, Kernel};
///
/// let source = RgbaImage::new(300, 200);
/// let resized = resize(&source, 256, 256, Kernel::Bicubic).unwrap();
/// assert_eq!(resized.dimensions(), (256, 256));
/// ```
pub fn resize(
    source: &RgbaImage,
    width: u32,
    height: u32,
    kernel: Kernel,
) -> Result<RgbaImage, ResampleError> {
    if width == 0 || height == 0 {
        return Err(ResampleError::ZeroTarget { width, height });
    }
    let (src_w, src_h) = source.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(ResampleError::EmptySource);
    }

    let too_large = ResampleError::TooLarge { width, height };
    let dst_stride = (width as usize)
        .checked_mul(CHANNELS)
        .ok_or(too_large.clone())?;
    let dst_len = dst_stride
        .checked_mul(height as usize)
        .ok_or(too_large.clone())?;

    let columns = contributions(src_w, width, kernel);
    let rows = contributions(src_h, height, kernel);

    let horizontal = horizontal_pass(source, &columns, dst_stride);
    let mut pixels = vec![0u8; dst_len];
    vertical_pass(&horizontal, &rows, dst_stride, &mut pixels);

    RgbaImage::from_raw(width, height, pixels).ok_or(too_large)
}

/// Resample every source row to the target width, keeping full precision.
fn horizontal_pass(source: &RgbaImage, columns: &[Contribution], dst_stride: usize) -> Vec<f32> {
    let src_stride = source.width() as usize * CHANNELS;
    let src = source.as_raw();
    let mut out = vec![0f32; dst_stride * source.height() as usize];

    out.par_chunks_mut(dst_stride)
        .zip(src.par_chunks(src_stride))
        .for_each(|(dst_row, src_row)| {
            for (contribution, dst_px) in columns.iter().zip(dst_row.chunks_exact_mut(CHANNELS)) {
                let mut acc = [0f32; CHANNELS];
                for (i, &w) in contribution.weights.iter().enumerate() {
                    let offset = (contribution.start + i) * CHANNELS;
                    for (c, value) in acc.iter_mut().enumerate() {
                        *value += src_row[offset + c] as f32 * w;
                    }
                }
                dst_px.copy_from_slice(&acc);
            }
        });

    out
}

/// Combine intermediate rows into the final 8-bit raster.
fn vertical_pass(intermediate: &[f32], rows: &[Contribution], stride: usize, out: &mut [u8]) {
    out.par_chunks_mut(stride)
        .zip(rows.par_iter())
        .for_each(|(dst_row, contribution)| {
            for (col, dst) in dst_row.iter_mut().enumerate() {
                let mut acc = 0f32;
                for (i, &w) in contribution.weights.iter().enumerate() {
                    acc += intermediate[(contribution.start + i) * stride + col] * w;
                }
                *dst = to_u8(acc);
            }
        });
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Compute the taps for each of `dst_len` output samples along one axis.
///
/// Output sample `i` is centred at `(i + 0.5) * scale` in source space.
/// Taps falling outside the source fold onto the nearest edge pixel.
fn contributions(src_len: u32, dst_len: u32, kernel: Kernel) -> Vec<Contribution> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len as i64 - 1;

    if kernel == Kernel::NearestNeighbor {
        return (0..dst_len)
            .map(|i| {
                let center = (i as f64 + 0.5) * scale;
                Contribution {
                    start: (center.floor() as i64).clamp(0, last) as usize,
                    weights: vec![1.0],
                }
            })
            .collect();
    }

    let filter_scale = scale.max(1.0);
    let support = kernel.support() * filter_scale;

    (0..dst_len)
        .map(|i| {
            let center = (i as f64 + 0.5) * scale;
            let left = (center - support).floor() as i64;
            let right = (center + support).ceil() as i64;

            let start = left.clamp(0, last);
            let end = right.clamp(0, last);
            let mut weights = vec![0f64; (end - start + 1) as usize];
            for j in left..=right {
                let w = kernel.weight((j as f64 + 0.5 - center) / filter_scale);
                if w != 0.0 {
                    weights[(j.clamp(start, end) - start) as usize] += w;
                }
            }

            let sum: f64 = weights.iter().sum();
            if sum.abs() < f64::EPSILON {
                // Degenerate window; fall back to the nearest pixel.
                return Contribution {
                    start: (center.floor() as i64).clamp(0, last) as usize,
                    weights: vec![1.0],
                };
            }

            Contribution {
                start: start as usize,
                weights: weights.iter().map(|w| (w / sum) as f32).collect(),
            }
        })
        .collect()
}
