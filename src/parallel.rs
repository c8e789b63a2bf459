//! Row-band parallel resizing (feature `rayon`).
//!
//! The destination is cut into contiguous row bands, one per requested
//! thread, and each band runs on its own resampler instance. Bands share no
//! mutable state, so the output matches a single sequential call.

use rayon::prelude::*;

use crate::cpu;
use crate::image::ImageViewMut;
use crate::params::ResizeParameters;
use crate::resize::ResizerFactory;
use crate::trace::trace_span;
use crate::util::math::div_hi;
use crate::util::{RescaleError, RescaleResult};

/// Resizes `src` into `dst` on the rayon pool using [`cpu::thread_number`]
/// bands.
pub fn resize_parallel(
    params: &ResizeParameters,
    factory: &ResizerFactory,
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
) -> RescaleResult<()> {
    resize_bands(params, factory, src, src_stride, dst, dst_stride, cpu::thread_number())
}

/// Resizes with an explicit band count (clamped to `1..=dst_height`).
pub fn resize_bands(
    params: &ResizeParameters,
    factory: &ResizerFactory,
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    bands: usize,
) -> RescaleResult<()> {
    let height = params.dst_height();
    ImageViewMut::new(
        &mut *dst,
        params.dst_width(),
        height,
        params.pixel_size(),
        dst_stride,
    )?;
    // Validated above, so this cannot overflow.
    let needed = (height - 1) * dst_stride + params.dst_row_bytes();

    let band_rows = div_hi(height, bands.clamp(1, height));
    let chunk_bytes = band_rows
        .checked_mul(dst_stride)
        .ok_or(RescaleError::BufferTooSmall {
            needed: usize::MAX,
            got: dst.len(),
        })?;
    let _span = trace_span!("resize_parallel", rows = height, band_rows = band_rows).entered();

    dst[..needed]
        .par_chunks_mut(chunk_bytes)
        .enumerate()
        .try_for_each(|(band, chunk)| {
            let start = band * band_rows;
            let end = (start + band_rows).min(height);
            let mut resampler = factory.create(params)?;
            resampler.resize_rows(src, src_stride, chunk, dst_stride, start..end)
        })
}
