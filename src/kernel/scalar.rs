//! Scalar reference kernels.
//!
//! The loop bodies are `#[inline(always)]` free functions so the AVX2 tier can
//! recompile them under its target feature.

use crate::kernel::{KernelKind, RowKernel};
use crate::table::{
    BICUBIC_ROUND_TERM, BICUBIC_SHIFT, BILINEAR_ROUND_TERM, BILINEAR_SHIFT, FRACTION_RANGE,
};

/// Portable reference kernel.
pub(crate) struct Scalar;

impl RowKernel for Scalar {
    const KIND: KernelKind = KernelKind::Scalar;

    fn bilinear_rows_u8(r0: &[i32], r1: &[i32], fy: i32, dst: &mut [u8]) {
        bilinear_rows_u8(r0, r1, fy, dst);
    }

    fn bilinear_rows_f32(r0: &[f32], r1: &[f32], fy: f32, dst: &mut [f32]) {
        bilinear_rows_f32(r0, r1, fy, dst);
    }

    fn area_accumulate_u8(src: &[u8], w: u32, acc: &mut [u32]) {
        area_accumulate(src, w, acc);
    }

    fn area_accumulate_u16(src: &[u16], w: u32, acc: &mut [u32]) {
        area_accumulate(src, w, acc);
    }

    fn bicubic_rows_u8(rows: [&[i32]; 4], w: [i32; 4], dst: &mut [u8]) {
        bicubic_rows_u8(rows, w, dst);
    }
}

#[inline(always)]
pub(crate) fn bilinear_rows_u8(r0: &[i32], r1: &[i32], fy: i32, dst: &mut [u8]) {
    let fy0 = FRACTION_RANGE - fy;
    for ((d, &a), &b) in dst.iter_mut().zip(r0).zip(r1) {
        let v = (a * fy0 + b * fy + BILINEAR_ROUND_TERM) >> BILINEAR_SHIFT;
        *d = v.clamp(0, 255) as u8;
    }
}

#[inline(always)]
pub(crate) fn bilinear_rows_f32(r0: &[f32], r1: &[f32], fy: f32, dst: &mut [f32]) {
    let fy0 = 1.0 - fy;
    for ((d, &a), &b) in dst.iter_mut().zip(r0).zip(r1) {
        *d = a * fy0 + b * fy;
    }
}

#[inline(always)]
pub(crate) fn area_accumulate<T: Copy + Into<u32>>(src: &[T], w: u32, acc: &mut [u32]) {
    for (a, &s) in acc.iter_mut().zip(src) {
        *a = a.wrapping_add(s.into().wrapping_mul(w));
    }
}

#[inline(always)]
pub(crate) fn bicubic_rows_u8(rows: [&[i32]; 4], w: [i32; 4], dst: &mut [u8]) {
    let [r0, r1, r2, r3] = rows;
    for (i, d) in dst.iter_mut().enumerate() {
        let sum = r0[i] * w[0] + r1[i] * w[1] + r2[i] * w[2] + r3[i] * w[3];
        let v = (sum + BICUBIC_ROUND_TERM) >> (BICUBIC_SHIFT * 2);
        *d = v.clamp(0, 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;
    use crate::kernel::RowKernel;

    #[test]
    fn bilinear_u8_rounds_half_up() {
        // Horizontal values carry a factor of 16.
        let r0 = [0, 16 * 10, 16 * 255];
        let r1 = [16 * 1, 16 * 20, 16 * 255];
        let mut dst = [0u8; 3];
        Scalar::bilinear_rows_u8(&r0, &r1, 8, &mut dst);
        // (0*8 + 16*8 + 128) >> 8 = 1, (160*8 + 320*8 + 128) >> 8 = 15
        assert_eq!(dst, [1, 15, 255]);
    }

    #[test]
    fn bilinear_f32_blends() {
        let mut dst = [0.0f32; 2];
        Scalar::bilinear_rows_f32(&[0.0, 10.0], &[4.0, 20.0], 0.25, &mut dst);
        assert_eq!(dst, [1.0, 12.5]);
    }

    #[test]
    fn area_accumulates_weighted_rows() {
        let mut acc = [1u32, 2, 3];
        Scalar::area_accumulate_u8(&[10, 20, 30], 3, &mut acc);
        assert_eq!(acc, [31, 62, 93]);
        Scalar::area_accumulate_u16(&[1000, 0, 1], 2, &mut acc);
        assert_eq!(acc, [2031, 62, 95]);
    }

    #[test]
    fn bicubic_clamps_overshoot() {
        // Values carry a factor of 128.
        let hi = [128 * 255; 2];
        let lo = [0; 2];
        let mut dst = [0u8; 2];
        Scalar::bicubic_rows_u8([&lo, &hi, &hi, &lo], [-8, 72, 72, -8], &mut dst);
        assert_eq!(dst, [255, 255]);
        Scalar::bicubic_rows_u8([&hi, &lo, &lo, &hi], [-8, 72, 72, -8], &mut dst);
        assert_eq!(dst, [0, 0]);
    }
}
