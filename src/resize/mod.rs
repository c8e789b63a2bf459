//! Resampler families and the factory that selects them.
//!
//! A [`Resampler`] is created for one [`ResizeParameters`] value and may be
//! reused for any number of sequential calls. Coefficient tables and row
//! buffers are allocated on the first call and kept for the lifetime of the
//! instance. Instances are not shared between threads; run independent
//! instances over disjoint row ranges instead (see [`Resampler::resize_rows`]).

mod area;
mod bicubic;
mod bilinear;
mod factory;
mod nearest;

pub use factory::ResizerFactory;

use std::ops::Range;

use crate::image::{ImageView, ImageViewMut};
use crate::kernel::KernelKind;
use crate::params::ResizeParameters;
use crate::util::{RescaleError, RescaleResult};

/// Algorithm family of a resampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Nearest,
    Area,
    Bilinear,
    Bicubic,
}

impl Family {
    pub const fn name(self) -> &'static str {
        match self {
            Family::Nearest => "nearest",
            Family::Area => "area",
            Family::Bilinear => "bilinear",
            Family::Bicubic => "bicubic",
        }
    }
}

/// Implementation chosen by the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variant {
    pub family: Family,
    pub kernel: KernelKind,
}

/// A configured resize job.
///
/// Buffers hold interleaved native-endian samples. Strides are in bytes and
/// may include padding, which is never read or written.
pub trait Resampler: Send {
    /// Parameters this instance was created for.
    fn params(&self) -> &ResizeParameters;

    /// Family and kernel this instance runs.
    fn variant(&self) -> Variant;

    /// Renders destination rows `rows` into `dst`, whose first row is
    /// destination row `rows.start`.
    ///
    /// `src` always holds the whole source image. Output does not depend on
    /// how the destination is split into row ranges.
    fn resize_rows(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
        rows: Range<usize>,
    ) -> RescaleResult<()>;

    /// Renders the whole destination image.
    fn resize(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
    ) -> RescaleResult<()> {
        let rows = 0..self.params().dst_height();
        self.resize_rows(src, src_stride, dst, dst_stride, rows)
    }
}

/// Validated source image and destination band of one call.
pub(crate) struct Frame<'s, 'd> {
    pub src: ImageView<'s>,
    pub dst: ImageViewMut<'d>,
    pub rows: Range<usize>,
}

impl Frame<'_, '_> {
    /// Writable destination row `y` (an absolute row index).
    #[inline]
    pub fn dst_row(&mut self, y: usize) -> &mut [u8] {
        self.dst.row_at_mut(y - self.rows.start)
    }
}

/// Checks buffers and the row range against `params`.
///
/// Returns `None` for an empty row range.
pub(crate) fn frame<'s, 'd>(
    params: &ResizeParameters,
    src: &'s [u8],
    src_stride: usize,
    dst: &'d mut [u8],
    dst_stride: usize,
    rows: Range<usize>,
) -> RescaleResult<Option<Frame<'s, 'd>>> {
    let height = params.dst_height();
    if rows.start > rows.end || rows.end > height {
        return Err(RescaleError::RowRangeOutOfBounds {
            start: rows.start,
            end: rows.end,
            height,
        });
    }
    let pixel_size = params.pixel_size();
    let src = ImageView::new(
        src,
        params.src_width(),
        params.src_height(),
        pixel_size,
        src_stride,
    )?;
    if rows.is_empty() {
        return Ok(None);
    }
    let dst = ImageViewMut::new(dst, params.dst_width(), rows.len(), pixel_size, dst_stride)?;
    Ok(Some(Frame { src, dst, rows }))
}

/// Returns the lazily built per-instance state, building it on first use.
pub(crate) fn lazy_state<'a, T>(
    slot: &'a mut Option<T>,
    family: Family,
    build: impl FnOnce() -> RescaleResult<T>,
) -> RescaleResult<&'a mut T> {
    let state = match slot.take() {
        Some(state) => state,
        None => {
            let state = build()?;
            crate::trace::trace_event!("tables_built", family = family.name());
            state
        }
    };
    Ok(slot.insert(state))
}

/// Picks a const-generic channel specialization as a function pointer.
macro_rules! by_channels {
    ($channels:expr, $func:ident) => {
        match $channels {
            1 => $func::<1>,
            2 => $func::<2>,
            3 => $func::<3>,
            _ => $func::<4>,
        }
    };
}

pub(crate) use by_channels;

#[cfg(test)]
mod tests {
    use super::frame;
    use crate::params::{ResizeMethod, ResizeParameters, SampleKind};
    use crate::util::RescaleError;

    fn params() -> ResizeParameters {
        ResizeParameters::new(4, 3, 2, 2, 1, SampleKind::U8, ResizeMethod::Nearest).unwrap()
    }

    #[test]
    fn rejects_ranges_past_the_destination() {
        let src = [0u8; 12];
        let mut dst = [0u8; 4];
        let err = frame(&params(), &src, 4, &mut dst, 2, 1..3).err();
        assert_eq!(
            err,
            Some(RescaleError::RowRangeOutOfBounds {
                start: 1,
                end: 3,
                height: 2
            })
        );
    }

    #[test]
    fn empty_range_is_a_no_op() {
        let src = [0u8; 12];
        let mut dst = [0u8; 0];
        assert!(frame(&params(), &src, 4, &mut dst, 2, 1..1).unwrap().is_none());
    }

    #[test]
    fn band_rows_are_relative_to_range_start() {
        let src = [0u8; 12];
        let mut dst = [0u8; 2];
        let mut f = frame(&params(), &src, 4, &mut dst, 2, 1..2).unwrap().unwrap();
        f.dst_row(1).copy_from_slice(&[7, 9]);
        assert_eq!(dst, [7, 9]);
    }
}
