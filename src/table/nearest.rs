//! Nearest neighbour index tables.

use crate::params::ResizeMethod;
use crate::util::alloc::try_vec;
use crate::util::RescaleResult;

/// Builds the source pixel index for every destination position.
///
/// `ResizeMethod::NearestPytorch` maps `d` to `floor(d * src / dst)`; every
/// other method uses pixel centers, `floor((d + 0.5) * src / dst)`. Both are
/// evaluated in exact integer arithmetic and clamped to `src - 1`.
pub fn nearest_indices(src: usize, dst: usize, method: ResizeMethod) -> RescaleResult<Vec<usize>> {
    let mut index = try_vec(dst, 0usize, "nearest index table")?;
    let last = src as u64 - 1;
    let (src, dst) = (src as u64, dst as u64);
    for (d, slot) in index.iter_mut().enumerate() {
        let d = d as u64;
        let pos = match method {
            ResizeMethod::NearestPytorch => d * src / dst,
            _ => (2 * d + 1) * src / (2 * dst),
        };
        *slot = pos.min(last) as usize;
    }
    Ok(index)
}
