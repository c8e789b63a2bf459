//! AVX2 tier: the scalar loops recompiled with `avx2` enabled.
//!
//! Callers must only use [`Avx2`] once the capability probe has reported
//! `Vector256` or wider; the factory is the only place that selects it.

use crate::kernel::{scalar, KernelKind, RowKernel};

/// Kernel for the 256-bit and 512-bit tiers.
pub(crate) struct Avx2;

impl RowKernel for Avx2 {
    const KIND: KernelKind = KernelKind::Avx2;

    fn bilinear_rows_u8(r0: &[i32], r1: &[i32], fy: i32, dst: &mut [u8]) {
        debug_assert!(std::is_x86_feature_detected!("avx2"));
        // SAFETY: selected only for Vector256 and wider, and both tiers require
        // the AVX2 CPUID flag and `is_x86_feature_detected!("avx2")`.
        unsafe { bilinear_rows_u8(r0, r1, fy, dst) }
    }

    fn bilinear_rows_f32(r0: &[f32], r1: &[f32], fy: f32, dst: &mut [f32]) {
        debug_assert!(std::is_x86_feature_detected!("avx2"));
        // SAFETY: as above.
        unsafe { bilinear_rows_f32(r0, r1, fy, dst) }
    }

    fn area_accumulate_u8(src: &[u8], w: u32, acc: &mut [u32]) {
        debug_assert!(std::is_x86_feature_detected!("avx2"));
        // SAFETY: as above.
        unsafe { area_accumulate_u8(src, w, acc) }
    }

    fn area_accumulate_u16(src: &[u16], w: u32, acc: &mut [u32]) {
        debug_assert!(std::is_x86_feature_detected!("avx2"));
        // SAFETY: as above.
        unsafe { area_accumulate_u16(src, w, acc) }
    }

    fn bicubic_rows_u8(rows: [&[i32]; 4], w: [i32; 4], dst: &mut [u8]) {
        debug_assert!(std::is_x86_feature_detected!("avx2"));
        // SAFETY: as above.
        unsafe { bicubic_rows_u8(rows, w, dst) }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn bilinear_rows_u8(r0: &[i32], r1: &[i32], fy: i32, dst: &mut [u8]) {
    scalar::bilinear_rows_u8(r0, r1, fy, dst)
}

#[target_feature(enable = "avx2")]
unsafe fn bilinear_rows_f32(r0: &[f32], r1: &[f32], fy: f32, dst: &mut [f32]) {
    scalar::bilinear_rows_f32(r0, r1, fy, dst)
}

#[target_feature(enable = "avx2")]
unsafe fn area_accumulate_u8(src: &[u8], w: u32, acc: &mut [u32]) {
    scalar::area_accumulate(src, w, acc)
}

#[target_feature(enable = "avx2")]
unsafe fn area_accumulate_u16(src: &[u16], w: u32, acc: &mut [u32]) {
    scalar::area_accumulate(src, w, acc)
}

#[target_feature(enable = "avx2")]
unsafe fn bicubic_rows_u8(rows: [&[i32]; 4], w: [i32; 4], dst: &mut [u8]) {
    scalar::bicubic_rows_u8(rows, w, dst)
}
