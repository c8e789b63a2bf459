//! Overlap tables for box (area) decimation.
//!
//! Weights are exact integers: one source pixel is `dst` units wide and one
//! destination pixel spans `src` units, so the weights of every destination
//! position sum to exactly `src`. Boundary `b` of the destination grid lies at
//! `b * src` units; `index[b]` is the source pixel containing it and
//! `alpha[b]` is how much of that pixel lies at or after the boundary.

use crate::util::alloc::try_vec;
use crate::util::RescaleResult;

/// Source coverage of one destination position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaSpan {
    /// First covered source pixel.
    pub first: usize,
    /// Number of source boundaries crossed; `0` means one partial pixel.
    pub count: usize,
    /// Weight of `first`.
    pub curr: u32,
    /// Weight of the last covered pixel (`first + count`) when `count > 0`.
    pub last: u32,
    /// Weight of every pixel strictly between `first` and `first + count`.
    pub unit: u32,
}

/// Area table for one axis, `dst + 1` boundaries long.
#[derive(Clone, Debug)]
pub struct AreaTable {
    index: Vec<usize>,
    alpha: Vec<u32>,
    unit: u32,
    src: usize,
}

impl AreaTable {
    /// Builds the boundary table for `src -> dst`.
    pub fn build(src: usize, dst: usize) -> RescaleResult<Self> {
        let mut index = try_vec(dst + 1, 0usize, "area index table")?;
        let mut alpha = try_vec(dst + 1, 0u32, "area weight table")?;
        let unit = dst as u64;
        for b in 0..=dst {
            let pos = b as u64 * src as u64;
            let mut i = pos / unit;
            let mut rem = pos % unit;
            if i == src as u64 {
                i -= 1;
                rem = unit;
            }
            index[b] = i as usize;
            alpha[b] = (unit - rem) as u32;
        }
        Ok(Self {
            index,
            alpha,
            unit: dst as u32,
            src,
        })
    }

    /// Number of destination positions.
    pub fn len(&self) -> usize {
        self.index.len() - 1
    }

    /// Always false; tables cover at least one destination position.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of weights for any destination position (the source extent).
    pub fn total(&self) -> u64 {
        self.src as u64
    }

    /// Coverage of destination position `d`.
    #[inline]
    pub fn span(&self, d: usize) -> AreaSpan {
        let first = self.index[d];
        let count = self.index[d + 1] - first;
        let curr = self.alpha[d];
        let next = self.alpha[d + 1];
        if count == 0 {
            AreaSpan {
                first,
                count,
                curr: curr - next,
                last: 0,
                unit: self.unit,
            }
        } else {
            AreaSpan {
                first,
                count,
                curr,
                last: self.unit - next,
                unit: self.unit,
            }
        }
    }

    /// Visits every `(source index, weight)` pair of destination `d`.
    ///
    /// Zero-weight trailing pixels (a boundary landing exactly on a source
    /// edge) are skipped.
    #[inline]
    pub fn for_each_weight(&self, d: usize, mut f: impl FnMut(usize, u32)) {
        let span = self.span(d);
        f(span.first, span.curr);
        if span.count == 0 {
            return;
        }
        for i in span.first + 1..span.first + span.count {
            f(i, span.unit);
        }
        if span.last != 0 {
            f(span.first + span.count, span.last);
        }
    }
}
