//! Vertical row kernels, one implementation per capability tier.
//!
//! Horizontal passes gather through index tables and stay in the resamplers;
//! the kernels here do the contiguous, lane-friendly arithmetic that combines
//! whole rows. Every implementation must produce bit-identical results to
//! [`scalar::Scalar`].

use crate::cpu::Capability;

/// Row-combining kernel used by the interpolating resamplers.
///
/// All slices passed to one call have the same length.
pub(crate) trait RowKernel: Send + Sync + 'static {
    /// Name reported through [`crate::resize::Variant`].
    const KIND: KernelKind;

    /// `dst[i] = (r0[i] * (16 - fy) + r1[i] * fy + 128) >> 8`, clamped to a byte.
    fn bilinear_rows_u8(r0: &[i32], r1: &[i32], fy: i32, dst: &mut [u8]);

    /// `dst[i] = r0[i] * (1 - fy) + r1[i] * fy`.
    fn bilinear_rows_f32(r0: &[f32], r1: &[f32], fy: f32, dst: &mut [f32]);

    /// `acc[i] += src[i] * w`.
    fn area_accumulate_u8(src: &[u8], w: u32, acc: &mut [u32]);

    /// `acc[i] += src[i] * w` over 2x2 block sums.
    fn area_accumulate_u16(src: &[u16], w: u32, acc: &mut [u32]);

    /// `dst[i] = (sum_k rows[k][i] * w[k] + 2^13) >> 14`, clamped to a byte.
    fn bicubic_rows_u8(rows: [&[i32]; 4], w: [i32; 4], dst: &mut [u8]);
}

/// Kernel implementation family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Portable reference loops.
    Scalar,
    /// Portable 8-lane vectors from the `wide` crate.
    Simd,
    /// AVX2-compiled loops, x86_64 only.
    Avx2,
}

impl KernelKind {
    pub const fn name(self) -> &'static str {
        match self {
            KernelKind::Scalar => "scalar",
            KernelKind::Simd => "simd",
            KernelKind::Avx2 => "avx2",
        }
    }

    /// Kernel used for a capability tier.
    pub fn for_capability(capability: Capability) -> KernelKind {
        match capability {
            Capability::Baseline => KernelKind::Scalar,
            Capability::Vector128 => vector128(),
            Capability::Vector256 | Capability::Vector512 => {
                if cfg!(target_arch = "x86_64") {
                    KernelKind::Avx2
                } else {
                    vector128()
                }
            }
        }
    }
}

fn vector128() -> KernelKind {
    if cfg!(feature = "simd") {
        KernelKind::Simd
    } else {
        KernelKind::Scalar
    }
}

pub(crate) mod scalar;

#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
