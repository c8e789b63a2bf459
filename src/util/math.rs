//! Integer helpers shared by table builders and resamplers.

/// Divides rounding up: `div_hi(5, 2) == 3`.
#[inline]
pub(crate) fn div_hi(value: usize, divisor: usize) -> usize {
    value.div_ceil(divisor)
}

/// Rounds `value` up to a multiple of `align` (a power of two).
#[inline]
pub(crate) fn align_hi(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}
