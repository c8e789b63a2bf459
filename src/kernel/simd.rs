//! Portable 8-lane kernels using the `wide` crate.
//!
//! Each function processes full 8-lane chunks with `i32x8`/`f32x8` and hands
//! the remainder to the scalar loop, so lengths need not be lane multiples.
//! Area accumulators stay below `i32::MAX` (checked when the resampler is
//! created), which lets the accumulation run in signed lanes.

use crate::kernel::{scalar, KernelKind, RowKernel};
use crate::table::{
    BICUBIC_ROUND_TERM, BICUBIC_SHIFT, BILINEAR_ROUND_TERM, BILINEAR_SHIFT, FRACTION_RANGE,
};
use wide::{f32x8, i32x8};

const LANES: usize = 8;

#[inline]
fn load_i32(slice: &[i32]) -> i32x8 {
    let mut lanes = [0i32; LANES];
    lanes.copy_from_slice(&slice[..LANES]);
    i32x8::from(lanes)
}

#[inline]
fn load_f32(slice: &[f32]) -> f32x8 {
    let mut lanes = [0f32; LANES];
    lanes.copy_from_slice(&slice[..LANES]);
    f32x8::from(lanes)
}

#[inline]
fn widen<T: Copy + Into<u32>>(slice: &[T]) -> i32x8 {
    let mut lanes = [0i32; LANES];
    for (lane, &v) in lanes.iter_mut().zip(&slice[..LANES]) {
        *lane = v.into() as i32;
    }
    i32x8::from(lanes)
}

#[inline]
fn store_bytes(v: i32x8, dst: &mut [u8]) {
    let clamped = v.max(i32x8::splat(0)).min(i32x8::splat(255));
    for (d, lane) in dst[..LANES].iter_mut().zip(clamped.to_array()) {
        *d = lane as u8;
    }
}

/// `wide`-based kernel for the 128-bit tier.
pub(crate) struct Simd;

impl RowKernel for Simd {
    const KIND: KernelKind = KernelKind::Simd;

    fn bilinear_rows_u8(r0: &[i32], r1: &[i32], fy: i32, dst: &mut [u8]) {
        let len = dst.len();
        let body = len / LANES * LANES;
        let w0 = i32x8::splat(FRACTION_RANGE - fy);
        let w1 = i32x8::splat(fy);
        let round = i32x8::splat(BILINEAR_ROUND_TERM);
        for x in (0..body).step_by(LANES) {
            let v = (load_i32(&r0[x..]) * w0 + load_i32(&r1[x..]) * w1 + round)
                >> BILINEAR_SHIFT as i32;
            store_bytes(v, &mut dst[x..]);
        }
        scalar::bilinear_rows_u8(&r0[body..len], &r1[body..len], fy, &mut dst[body..]);
    }

    fn bilinear_rows_f32(r0: &[f32], r1: &[f32], fy: f32, dst: &mut [f32]) {
        let len = dst.len();
        let body = len / LANES * LANES;
        let w0 = f32x8::splat(1.0 - fy);
        let w1 = f32x8::splat(fy);
        for x in (0..body).step_by(LANES) {
            let v = load_f32(&r0[x..]) * w0 + load_f32(&r1[x..]) * w1;
            dst[x..x + LANES].copy_from_slice(&v.to_array());
        }
        scalar::bilinear_rows_f32(&r0[body..len], &r1[body..len], fy, &mut dst[body..]);
    }

    fn area_accumulate_u8(src: &[u8], w: u32, acc: &mut [u32]) {
        accumulate(src, w, acc);
    }

    fn area_accumulate_u16(src: &[u16], w: u32, acc: &mut [u32]) {
        accumulate(src, w, acc);
    }

    fn bicubic_rows_u8(rows: [&[i32]; 4], w: [i32; 4], dst: &mut [u8]) {
        let len = dst.len();
        let body = len / LANES * LANES;
        let [w0, w1, w2, w3] = w.map(i32x8::splat);
        let round = i32x8::splat(BICUBIC_ROUND_TERM);
        let [r0, r1, r2, r3] = rows;
        for x in (0..body).step_by(LANES) {
            let sum = load_i32(&r0[x..]) * w0
                + load_i32(&r1[x..]) * w1
                + load_i32(&r2[x..]) * w2
                + load_i32(&r3[x..]) * w3;
            store_bytes((sum + round) >> (BICUBIC_SHIFT * 2) as i32, &mut dst[x..]);
        }
        scalar::bicubic_rows_u8(
            [&r0[body..len], &r1[body..len], &r2[body..len], &r3[body..len]],
            w,
            &mut dst[body..],
        );
    }
}

fn accumulate<T: Copy + Into<u32>>(src: &[T], w: u32, acc: &mut [u32]) {
    let len = acc.len().min(src.len());
    let body = len / LANES * LANES;
    let weight = i32x8::splat(w as i32);
    for x in (0..body).step_by(LANES) {
        let sum = widen(&acc[x..]) + widen(&src[x..]) * weight;
        for (a, lane) in acc[x..x + LANES].iter_mut().zip(sum.to_array()) {
            *a = lane as u32;
        }
    }
    scalar::area_accumulate(&src[body..len], w, &mut acc[body..len]);
}
