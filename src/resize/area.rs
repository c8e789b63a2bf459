//! Box (area) decimation for byte samples.
//!
//! Each destination row is built by streaming its source rows, weighted by
//! the vertical [`AreaTable`], into a `u32` accumulator one source row wide.
//! The horizontal table then folds the accumulator into destination pixels
//! in `u64` and the sum is normalized with a fixed-point reciprocal.
//!
//! In [`AreaMode::TwoByTwo`] the source is first reduced to 2x2 block sums on
//! a half-resolution grid (odd edges repeat their last sample) and the same
//! pass runs on that grid.

use std::marker::PhantomData;
use std::ops::Range;

use crate::image::ImageView;
use crate::kernel::RowKernel;
use crate::params::{AreaMode, ResizeParameters};
use crate::resize::{by_channels, frame, lazy_state, Family, Resampler, Variant};
use crate::table::{AreaTable, AREA_MAX_WEIGHT, AREA_ROUND, AREA_SHIFT};
use crate::trace::trace_span;
use crate::util::alloc::try_vec;
use crate::util::math::{align_hi, div_hi};
use crate::util::{RescaleError, RescaleResult};

/// Grid the area tables run on: the source itself or its 2x2 block grid.
#[derive(Clone, Copy, Debug)]
struct Grid {
    width: usize,
    height: usize,
    /// Samples folded into one grid value.
    block: u64,
}

impl Grid {
    fn of(params: &ResizeParameters) -> Self {
        match params.area_mode() {
            AreaMode::OneByOne => Grid {
                width: params.src_width(),
                height: params.src_height(),
                block: 1,
            },
            AreaMode::TwoByTwo => Grid {
                width: div_hi(params.src_width(), 2),
                height: div_hi(params.src_height(), 2),
                block: 4,
            },
        }
    }

    /// Total weight `N` of one destination pixel.
    fn total_weight(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.block
    }
}

/// Rejects sources whose weighted sums would leave exact integer range.
pub(crate) fn check_area_size(params: &ResizeParameters) -> RescaleResult<()> {
    let grid = Grid::of(params);
    let total = grid.total_weight();
    let column_peak = grid.height as u64 * grid.block * u8::MAX as u64;
    if total > AREA_MAX_WEIGHT || column_peak > i32::MAX as u64 {
        return Err(RescaleError::AreaTooLarge { pixels: total });
    }
    Ok(())
}

type Horizontal = fn(&AreaTable, &[u32], u64, &mut [u8]);

struct State {
    x: AreaTable,
    y: AreaTable,
    acc: Vec<u32>,
    blocks: Vec<u16>,
    recip: u64,
    horizontal: Horizontal,
}

impl State {
    fn build(params: &ResizeParameters) -> RescaleResult<Self> {
        let grid = Grid::of(params);
        let channels = params.channels();
        let len = align_hi(grid.width * channels, params.alignment());
        let blocks = match params.area_mode() {
            AreaMode::OneByOne => Vec::new(),
            AreaMode::TwoByTwo => try_vec(len, 0u16, "area block row")?,
        };
        let total = grid.total_weight();
        Ok(Self {
            x: AreaTable::build(grid.width, params.dst_width())?,
            y: AreaTable::build(grid.height, params.dst_height())?,
            acc: try_vec(len, 0u32, "area accumulator")?,
            blocks,
            recip: ((1u64 << AREA_SHIFT) + total - 1) / total,
            horizontal: by_channels!(channels, horizontal),
        })
    }
}

/// Area resampler, 1x1 or 2x2 sub-variant.
pub(crate) struct AreaResampler<K> {
    params: ResizeParameters,
    state: Option<State>,
    _kernel: PhantomData<K>,
}

impl<K: RowKernel> AreaResampler<K> {
    pub fn new(params: ResizeParameters) -> RescaleResult<Self> {
        check_area_size(&params)?;
        Ok(Self {
            params,
            state: None,
            _kernel: PhantomData,
        })
    }
}

impl<K: RowKernel> Resampler for AreaResampler<K> {
    fn params(&self) -> &ResizeParameters {
        &self.params
    }

    fn variant(&self) -> Variant {
        Variant {
            family: Family::Area,
            kernel: K::KIND,
        }
    }

    fn resize_rows(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
        rows: Range<usize>,
    ) -> RescaleResult<()> {
        let Some(mut frame) = frame(&self.params, src, src_stride, dst, dst_stride, rows)? else {
            return Ok(());
        };
        let _span = trace_span!(
            "resize",
            family = "area",
            rows_start = frame.rows.start,
            rows_end = frame.rows.end
        )
        .entered();

        let state = lazy_state(&mut self.state, Family::Area, || State::build(&self.params))?;
        let channels = self.params.channels();
        let mode = self.params.area_mode();
        let len = Grid::of(&self.params).width * channels;

        for y in frame.rows.clone() {
            let acc = &mut state.acc[..len];
            acc.fill(0);
            let blocks = &mut state.blocks;
            let src = frame.src;
            state.y.for_each_weight(y, |sy, w| match mode {
                AreaMode::OneByOne => K::area_accumulate_u8(src.row_at(sy), w, acc),
                AreaMode::TwoByTwo => {
                    let blocks = &mut blocks[..len];
                    block_sums(src, sy, channels, blocks);
                    K::area_accumulate_u16(blocks, w, acc);
                }
            });
            (state.horizontal)(&state.x, acc, state.recip, frame.dst_row(y));
        }
        Ok(())
    }
}

/// Sums the 2x2 blocks of grid row `gy` into `out`, repeating edge samples.
fn block_sums(src: ImageView<'_>, gy: usize, channels: usize, out: &mut [u16]) {
    let r0 = src.row_at(2 * gy);
    let r1 = src.row_at((2 * gy + 1).min(src.height() - 1));
    let last = src.width() - 1;
    for (gx, block) in out.chunks_exact_mut(channels).enumerate() {
        let a = 2 * gx * channels;
        let b = (2 * gx + 1).min(last) * channels;
        for (c, v) in block.iter_mut().enumerate() {
            *v = r0[a + c] as u16 + r0[b + c] as u16 + r1[a + c] as u16 + r1[b + c] as u16;
        }
    }
}

fn horizontal<const N: usize>(table: &AreaTable, acc: &[u32], recip: u64, dst: &mut [u8]) {
    for (d, out) in dst.chunks_exact_mut(N).enumerate() {
        let mut sums = [0u64; N];
        table.for_each_weight(d, |sx, w| {
            let column = &acc[sx * N..sx * N + N];
            for (sum, &v) in sums.iter_mut().zip(column) {
                *sum += v as u64 * w as u64;
            }
        });
        for (o, sum) in out.iter_mut().zip(sums) {
            *o = ((sum * recip + AREA_ROUND) >> AREA_SHIFT).min(255) as u8;
        }
    }
}
