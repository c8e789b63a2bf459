//! Low-level building blocks for custom resampling pipelines.
//!
//! These are the per-axis coefficient tables and fixed-point constants the
//! resamplers are built from. Most users should prefer [`crate::ResizerFactory`].

pub use crate::table::{
    nearest_indices, AreaSpan, AreaTable, CubicTable, EdgeRanges, LinearTable, LinearTableF32,
    LinearTableU8,
};
pub use crate::table::{
    AREA_MAX_WEIGHT, AREA_ROUND, AREA_SHIFT, BICUBIC_RANGE, BICUBIC_ROUND_TERM, BICUBIC_SHIFT,
    BILINEAR_ROUND_TERM, BILINEAR_SHIFT, FRACTION_RANGE, LINEAR_SHIFT,
};
