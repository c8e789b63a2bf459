//! Bilinear resampling: fixed-point for bytes, `f32` for 16-bit and float.
//!
//! Each destination row blends two horizontally interpolated source rows.
//! Those rows are cached across destination rows: when the upper source row
//! repeats nothing is recomputed, and when it advances by one the buffers are
//! swapped and only the new lower row is interpolated. The cache is reset at
//! the start of every call.

use std::marker::PhantomData;
use std::ops::Range;

use crate::kernel::RowKernel;
use crate::params::ResizeParameters;
use crate::resize::{by_channels, frame, lazy_state, Family, Frame, Resampler, Variant};
use crate::table::{LinearTableF32, LinearTableU8};
use crate::trace::trace_span;
use crate::util::alloc::try_vec;
use crate::util::math::align_hi;
use crate::util::RescaleResult;

/// Source rows currently held by the two row buffers.
#[derive(Clone, Copy)]
enum Cached {
    Nothing,
    Pair(usize),
}

/// What to do with the row buffers for upper source row `sy`.
enum Refresh {
    Keep,
    Advance,
    Both,
}

impl Cached {
    fn refresh(self, sy: usize) -> Refresh {
        match self {
            Cached::Pair(prev) if prev == sy => Refresh::Keep,
            Cached::Pair(prev) if prev + 1 == sy => Refresh::Advance,
            _ => Refresh::Both,
        }
    }
}

type HorizontalU8 = fn(&LinearTableU8, &[u8], &mut [i32]);

struct StateU8 {
    x: LinearTableU8,
    y: LinearTableU8,
    rows: [Vec<i32>; 2],
    horizontal: HorizontalU8,
}

impl StateU8 {
    fn build(params: &ResizeParameters) -> RescaleResult<Self> {
        let method = params.method();
        let len = align_hi(params.dst_width() * params.channels(), params.alignment());
        Ok(Self {
            x: LinearTableU8::build_u8(params.src_width(), params.dst_width(), method)?,
            y: LinearTableU8::build_u8(params.src_height(), params.dst_height(), method)?,
            rows: [
                try_vec(len, 0i32, "bilinear row buffer")?,
                try_vec(len, 0i32, "bilinear row buffer")?,
            ],
            horizontal: by_channels!(params.channels(), horizontal_u8),
        })
    }
}

/// Fixed-point bilinear resampler for byte samples.
pub(crate) struct BilinearU8<K> {
    params: ResizeParameters,
    state: Option<StateU8>,
    _kernel: PhantomData<K>,
}

impl<K: RowKernel> BilinearU8<K> {
    pub fn new(params: ResizeParameters) -> Self {
        Self {
            params,
            state: None,
            _kernel: PhantomData,
        }
    }
}

impl<K: RowKernel> Resampler for BilinearU8<K> {
    fn params(&self) -> &ResizeParameters {
        &self.params
    }

    fn variant(&self) -> Variant {
        Variant {
            family: Family::Bilinear,
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
            family = "bilinear",
            rows_start = frame.rows.start,
            rows_end = frame.rows.end
        )
        .entered();

        let state = lazy_state(&mut self.state, Family::Bilinear, || {
            StateU8::build(&self.params)
        })?;
        let len = self.params.dst_width() * self.params.channels();
        let src = frame.src;
        let mut cached = Cached::Nothing;
        for y in frame.rows.clone() {
            let sy = state.y.index()[y];
            let sy1 = state.y.next()[y];
            let [r0, r1] = &mut state.rows;
            match cached.refresh(sy) {
                Refresh::Keep => {}
                Refresh::Advance => {
                    std::mem::swap(r0, r1);
                    (state.horizontal)(&state.x, src.row_at(sy1), &mut r1[..len]);
                }
                Refresh::Both => {
                    (state.horizontal)(&state.x, src.row_at(sy), &mut r0[..len]);
                    (state.horizontal)(&state.x, src.row_at(sy1), &mut r1[..len]);
                }
            }
            cached = Cached::Pair(sy);
            K::bilinear_rows_u8(&r0[..len], &r1[..len], state.y.alpha()[y], frame.dst_row(y));
        }
        Ok(())
    }
}

fn horizontal_u8<const N: usize>(table: &LinearTableU8, src: &[u8], dst: &mut [i32]) {
    for (d, out) in dst.chunks_exact_mut(N).enumerate() {
        let i = table.index()[d] * N;
        let j = table.next()[d] * N;
        let [w0, w1] = table.weights_at(d);
        for (c, o) in out.iter_mut().enumerate() {
            *o = src[i + c] as i32 * w0 + src[j + c] as i32 * w1;
        }
    }
}

/// Sample types interpolated in `f32`.
pub(crate) trait FloatSample: Send + 'static {
    const SIZE: usize;

    /// Reads sample `i` of a native-endian row.
    fn load(row: &[u8], i: usize) -> f32;

    /// Writes `v` as sample `i` of a native-endian row.
    fn store(v: f32, row: &mut [u8], i: usize);
}

impl FloatSample for u16 {
    const SIZE: usize = 2;

    #[inline]
    fn load(row: &[u8], i: usize) -> f32 {
        u16::from_ne_bytes([row[2 * i], row[2 * i + 1]]) as f32
    }

    #[inline]
    fn store(v: f32, row: &mut [u8], i: usize) {
        // Round half up; `as` saturates to 0..=65535.
        let q = (v + 0.5) as u16;
        row[2 * i..2 * i + 2].copy_from_slice(&q.to_ne_bytes());
    }
}

impl FloatSample for f32 {
    const SIZE: usize = 4;

    #[inline]
    fn load(row: &[u8], i: usize) -> f32 {
        f32::from_ne_bytes([row[4 * i], row[4 * i + 1], row[4 * i + 2], row[4 * i + 3]])
    }

    #[inline]
    fn store(v: f32, row: &mut [u8], i: usize) {
        row[4 * i..4 * i + 4].copy_from_slice(&v.to_ne_bytes());
    }
}

type HorizontalF32 = fn(&LinearTableF32, &[u8], &mut [f32]);

struct StateF32 {
    x: LinearTableF32,
    y: LinearTableF32,
    rows: [Vec<f32>; 2],
    out: Vec<f32>,
    horizontal: HorizontalF32,
    sparse: bool,
}

impl StateF32 {
    fn build<S: FloatSample>(params: &ResizeParameters) -> RescaleResult<Self> {
        let method = params.method();
        let len = align_hi(params.dst_width() * params.channels(), params.alignment());
        Ok(Self {
            x: LinearTableF32::build_f32(params.src_width(), params.dst_width(), method)?,
            y: LinearTableF32::build_f32(params.src_height(), params.dst_height(), method)?,
            rows: [
                try_vec(len, 0f32, "bilinear row buffer")?,
                try_vec(len, 0f32, "bilinear row buffer")?,
            ],
            out: try_vec(len, 0f32, "bilinear output row")?,
            horizontal: match params.channels() {
                1 => horizontal_f32::<S, 1>,
                2 => horizontal_f32::<S, 2>,
                3 => horizontal_f32::<S, 3>,
                _ => horizontal_f32::<S, 4>,
            },
            sparse: 2 * params.dst_height() < params.src_height(),
        })
    }
}

/// Float-precision bilinear resampler for 16-bit and `f32` samples.
pub(crate) struct BilinearFloat<K, S> {
    params: ResizeParameters,
    state: Option<StateF32>,
    _marker: PhantomData<(K, S)>,
}

impl<K: RowKernel, S: FloatSample> BilinearFloat<K, S> {
    pub fn new(params: ResizeParameters) -> Self {
        debug_assert_eq!(params.sample().size(), S::SIZE);
        Self {
            params,
            state: None,
            _marker: PhantomData,
        }
    }
}

impl<K: RowKernel, S: FloatSample> Resampler for BilinearFloat<K, S> {
    fn params(&self) -> &ResizeParameters {
        &self.params
    }

    fn variant(&self) -> Variant {
        Variant {
            family: Family::Bilinear,
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
            family = "bilinear",
            rows_start = frame.rows.start,
            rows_end = frame.rows.end
        )
        .entered();

        let state = lazy_state(&mut self.state, Family::Bilinear, || {
            StateF32::build::<S>(&self.params)
        })?;
        let len = self.params.dst_width() * self.params.channels();
        if state.sparse {
            rows_sparse::<K, S>(state, &mut frame, len);
        } else {
            rows_cached::<K, S>(state, &mut frame, len);
        }
        Ok(())
    }
}

/// Large downscale: rows rarely repeat, so each output row is independent.
fn rows_sparse<K: RowKernel, S: FloatSample>(
    state: &mut StateF32,
    frame: &mut Frame<'_, '_>,
    len: usize,
) {
    let src = frame.src;
    for y in frame.rows.clone() {
        let fy = state.y.alpha()[y];
        let [r0, r1] = &mut state.rows;
        let (r0, r1) = (&mut r0[..len], &mut r1[..len]);
        (state.horizontal)(&state.x, src.row_at(state.y.index()[y]), r0);
        let out = &mut state.out[..len];
        if fy == 0.0 {
            out.copy_from_slice(r0);
        } else {
            (state.horizontal)(&state.x, src.row_at(state.y.next()[y]), r1);
            K::bilinear_rows_f32(r0, r1, fy, out);
        }
        store_row::<S>(out, frame.dst_row(y));
    }
}

fn rows_cached<K: RowKernel, S: FloatSample>(
    state: &mut StateF32,
    frame: &mut Frame<'_, '_>,
    len: usize,
) {
    let src = frame.src;
    let mut cached = Cached::Nothing;
    for y in frame.rows.clone() {
        let sy = state.y.index()[y];
        let sy1 = state.y.next()[y];
        let fy = state.y.alpha()[y];
        let [r0, r1] = &mut state.rows;
        match cached.refresh(sy) {
            Refresh::Keep => {}
            Refresh::Advance => {
                std::mem::swap(r0, r1);
                (state.horizontal)(&state.x, src.row_at(sy1), &mut r1[..len]);
            }
            Refresh::Both => {
                (state.horizontal)(&state.x, src.row_at(sy), &mut r0[..len]);
                (state.horizontal)(&state.x, src.row_at(sy1), &mut r1[..len]);
            }
        }
        cached = Cached::Pair(sy);
        let out = &mut state.out[..len];
        if fy == 0.0 {
            out.copy_from_slice(&r0[..len]);
        } else {
            K::bilinear_rows_f32(&r0[..len], &r1[..len], fy, out);
        }
        store_row::<S>(out, frame.dst_row(y));
    }
}

fn store_row<S: FloatSample>(values: &[f32], row: &mut [u8]) {
    for (i, &v) in values.iter().enumerate() {
        S::store(v, row, i);
    }
}

fn horizontal_f32<S: FloatSample, const N: usize>(
    table: &LinearTableF32,
    src: &[u8],
    dst: &mut [f32],
) {
    for (d, out) in dst.chunks_exact_mut(N).enumerate() {
        let i = table.index()[d] * N;
        let j = table.next()[d] * N;
        let [w0, w1] = table.weights_at(d);
        for (c, o) in out.iter_mut().enumerate() {
            *o = S::load(src, i + c) * w0 + S::load(src, j + c) * w1;
        }
    }
}
