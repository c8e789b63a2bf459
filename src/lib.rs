//! Rescaler is a CPU image resampling engine for interleaved 8-bit, 16-bit
//! and float images with one to four channels.
//!
//! A [`ResizeParameters`] value describes one job; [`ResizerFactory`] turns it
//! into a [`Resampler`] for the widest vector tier the processor supports
//! (see [`cpu::capability`]). Every tier produces the same output as the
//! portable scalar code. Nearest, area, bilinear (three coordinate
//! conventions) and bicubic resampling are available; the optional `rayon`
//! feature adds a row-band parallel driver.

pub mod cpu;
pub mod image;
mod kernel;
pub mod lowlevel;
#[cfg(feature = "rayon")]
pub mod parallel;
pub mod params;
pub mod resize;
mod table;
mod trace;
pub mod util;

pub use cpu::{Capability, CpuInfo};
pub use image::{ImageView, ImageViewMut, OwnedImage};
pub use kernel::KernelKind;
pub use params::{AreaMode, ResizeMethod, ResizeParameters, SampleKind, DEFAULT_ALIGNMENT};
pub use resize::{Family, Resampler, ResizerFactory, Variant};
pub use util::{ErrorKind, RescaleError, RescaleResult};

/// Resizes a whole image with the process-wide factory.
///
/// Equivalent to `ResizerFactory::new().create(params)?.resize(...)`; keep a
/// [`Resampler`] around instead when resizing many images of one geometry.
pub fn resize(
    params: &ResizeParameters,
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
) -> RescaleResult<()> {
    ResizerFactory::new()
        .create(params)?
        .resize(src, src_stride, dst, dst_stride)
}
