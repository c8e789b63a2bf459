//! Four-tap Catmull-Rom resampling for byte samples.
//!
//! Horizontal passes keep values at the 2^7 weight scale in `i32` row
//! buffers. The dense strategy keeps four rolling buffers indexed by source
//! row modulo four and a watermark of the highest source row already
//! interpolated, so every source row is processed at most once per call. For
//! large downscales the sparse strategy recomputes the four rows of each
//! destination row instead.

use std::marker::PhantomData;
use std::ops::Range;

use crate::image::ImageView;
use crate::kernel::RowKernel;
use crate::params::ResizeParameters;
use crate::resize::{by_channels, frame, lazy_state, Family, Resampler, Variant};
use crate::table::{CubicTable, EdgeRanges};
use crate::trace::trace_span;
use crate::util::alloc::try_vec;
use crate::util::math::align_hi;
use crate::util::RescaleResult;

type Horizontal = fn(&CubicTable, &EdgeRanges, &[u8], &mut [i32]);

struct State {
    x: CubicTable,
    y: CubicTable,
    edges: EdgeRanges,
    rows: [Vec<i32>; 4],
    horizontal: Horizontal,
    sparse: bool,
}

impl State {
    fn build(params: &ResizeParameters) -> RescaleResult<Self> {
        let x = CubicTable::build(params.src_width(), params.dst_width())?;
        let y = CubicTable::build(params.src_height(), params.dst_height())?;
        let len = align_hi(params.dst_width() * params.channels(), params.alignment());
        Ok(Self {
            edges: x.edges(),
            x,
            y,
            rows: [
                try_vec(len, 0i32, "bicubic row buffer")?,
                try_vec(len, 0i32, "bicubic row buffer")?,
                try_vec(len, 0i32, "bicubic row buffer")?,
                try_vec(len, 0i32, "bicubic row buffer")?,
            ],
            horizontal: by_channels!(params.channels(), horizontal),
            sparse: 3 * params.dst_height() <= params.src_height(),
        })
    }

    fn interpolate(&mut self, src: ImageView<'_>, sy: usize, slot: usize, len: usize) {
        (self.horizontal)(&self.x, &self.edges, src.row_at(sy), &mut self.rows[slot][..len]);
    }
}

/// Bicubic resampler for byte samples.
pub(crate) struct BicubicU8<K> {
    params: ResizeParameters,
    state: Option<State>,
    _kernel: PhantomData<K>,
}

impl<K: RowKernel> BicubicU8<K> {
    pub fn new(params: ResizeParameters) -> Self {
        Self {
            params,
            state: None,
            _kernel: PhantomData,
        }
    }
}

impl<K: RowKernel> Resampler for BicubicU8<K> {
    fn params(&self) -> &ResizeParameters {
        &self.params
    }

    fn variant(&self) -> Variant {
        Variant {
            family: Family::Bicubic,
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
            family = "bicubic",
            rows_start = frame.rows.start,
            rows_end = frame.rows.end
        )
        .entered();

        let state = lazy_state(&mut self.state, Family::Bicubic, || {
            State::build(&self.params)
        })?;
        let len = self.params.dst_width() * self.params.channels();
        let src = frame.src;
        let mut watermark: Option<usize> = None;
        for y in frame.rows.clone() {
            let taps = state.y.taps(y);
            let slots = if state.sparse {
                for (slot, &sy) in taps.iter().enumerate() {
                    state.interpolate(src, sy, slot, len);
                }
                [0, 1, 2, 3]
            } else {
                for &sy in &taps {
                    if watermark.map_or(true, |w| sy > w) {
                        state.interpolate(src, sy, sy % 4, len);
                        watermark = Some(sy);
                    }
                }
                taps.map(|sy| sy % 4)
            };
            let [a, b, c, d] = slots.map(|slot| &state.rows[slot][..len]);
            K::bicubic_rows_u8([a, b, c, d], state.y.weights()[y], frame.dst_row(y));
        }
        Ok(())
    }
}

fn horizontal<const N: usize>(
    table: &CubicTable,
    edges: &EdgeRanges,
    src: &[u8],
    dst: &mut [i32],
) {
    let clamped = |d: usize, out: &mut [i32]| {
        let taps = table.taps(d).map(|t| t * N);
        let w = table.weights()[d];
        for (c, o) in out.iter_mut().enumerate() {
            *o = src[taps[0] + c] as i32 * w[0]
                + src[taps[1] + c] as i32 * w[1]
                + src[taps[2] + c] as i32 * w[2]
                + src[taps[3] + c] as i32 * w[3];
        }
    };
    for d in edges.nose.clone() {
        clamped(d, &mut dst[d * N..d * N + N]);
    }
    for d in edges.body.clone() {
        let base = (table.index()[d] - 1) * N;
        let px = &src[base..base + 4 * N];
        let w = table.weights()[d];
        for (c, o) in dst[d * N..d * N + N].iter_mut().enumerate() {
            *o = px[c] as i32 * w[0]
                + px[N + c] as i32 * w[1]
                + px[2 * N + c] as i32 * w[2]
                + px[3 * N + c] as i32 * w[3];
        }
    }
    for d in edges.tail.clone() {
        clamped(d, &mut dst[d * N..d * N + N]);
    }
}
