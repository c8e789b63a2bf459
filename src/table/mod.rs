//! Per-axis coefficient and index tables.
//!
//! Every builder is a pure function of one axis's source size, destination
//! size and method. Tables are built once per resampler and shared read-only
//! by every row. Indices are pixel indices into the source axis and are always
//! within `0..src`; the fixed-point constants below are part of the output
//! contract, so changing them changes results bit-for-bit.

mod area;
mod bicubic;
mod bilinear;
mod nearest;

pub use area::{AreaSpan, AreaTable};
pub use bicubic::{CubicTable, EdgeRanges};
pub use bilinear::{LinearTable, LinearTableF32, LinearTableU8};
pub use nearest::nearest_indices;

/// Fraction bits of a bilinear byte weight.
pub const LINEAR_SHIFT: u32 = 4;
/// One unit of bilinear byte weight.
pub const FRACTION_RANGE: i32 = 1 << LINEAR_SHIFT;
/// Total shift after horizontal and vertical bilinear passes.
pub const BILINEAR_SHIFT: u32 = LINEAR_SHIFT * 2;
/// Rounding bias added before the bilinear shift.
pub const BILINEAR_ROUND_TERM: i32 = 1 << (BILINEAR_SHIFT - 1);

/// Shift applied to the area sum after multiplying by the reciprocal weight.
pub const AREA_SHIFT: u32 = 40;
/// Rounding bias added before the area shift.
pub const AREA_ROUND: u64 = 1 << (AREA_SHIFT - 1);
/// Largest total source weight the area normalization keeps exact.
pub const AREA_MAX_WEIGHT: u64 = 1 << 31;

/// Fraction bits of a bicubic tap weight.
pub const BICUBIC_SHIFT: u32 = 7;
/// One unit of bicubic tap weight.
pub const BICUBIC_RANGE: i32 = 1 << BICUBIC_SHIFT;
/// Rounding bias added before the combined bicubic shift.
pub const BICUBIC_ROUND_TERM: i32 = 1 << (BICUBIC_SHIFT * 2 - 1);
