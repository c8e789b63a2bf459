//! Four-tap (bicubic) tables with nose/body/tail classification.

use std::ops::Range;

use crate::params::ResizeMethod;
use crate::table::bilinear::position;
use crate::table::BICUBIC_RANGE;
use crate::util::alloc::try_vec;
use crate::util::RescaleResult;

/// Partition of destination positions by how their taps meet the source
/// boundaries.
///
/// `nose` positions reach below source index 0, `tail` positions reach past
/// the last source index, and `body` positions read four in-bounds taps
/// directly. The ranges are contiguous and cover `0..len` in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRanges {
    pub nose: Range<usize>,
    pub body: Range<usize>,
    pub tail: Range<usize>,
}

/// Catmull-Rom table: base index and four fixed-point weights per position.
#[derive(Clone, Debug)]
pub struct CubicTable {
    index: Vec<usize>,
    weights: Vec<[i32; 4]>,
    nose_end: usize,
    tail_start: usize,
    src: usize,
}

impl CubicTable {
    /// Builds the table for `src -> dst`.
    ///
    /// Taps of position `d` are `index[d] - 1 ..= index[d] + 2`; weights are
    /// quantized to `BICUBIC_RANGE` and sum to it exactly.
    pub fn build(src: usize, dst: usize) -> RescaleResult<Self> {
        let mut index = try_vec(dst, 0usize, "bicubic index table")?;
        let mut weights = try_vec(dst, [0i32; 4], "bicubic weight table")?;
        for d in 0..dst {
            let (i, frac) = position(src, dst, ResizeMethod::Bicubic, d);
            index[d] = i;
            weights[d] = quantize(catmull_rom(frac));
        }

        let nose_end = index.iter().take_while(|&&i| i == 0).count();
        let tail_start = index
            .iter()
            .position(|&i| i + 2 >= src)
            .unwrap_or(dst)
            .max(nose_end);

        Ok(Self {
            index,
            weights,
            nose_end,
            tail_start,
            src,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Base (second) tap per destination position.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Four weights per destination position.
    pub fn weights(&self) -> &[[i32; 4]] {
        &self.weights
    }

    /// Nose/body/tail partition of the destination positions.
    pub fn edges(&self) -> EdgeRanges {
        EdgeRanges {
            nose: 0..self.nose_end,
            body: self.nose_end..self.tail_start,
            tail: self.tail_start..self.index.len(),
        }
    }

    /// Source taps of position `d`, clamped to the source extent.
    ///
    /// Body positions never clamp; nose and tail positions replace the
    /// out-of-range taps with the nearest edge sample.
    #[inline]
    pub fn taps(&self, d: usize) -> [usize; 4] {
        let i = self.index[d];
        let last = self.src - 1;
        [
            i.saturating_sub(1),
            i.min(last),
            (i + 1).min(last),
            (i + 2).min(last),
        ]
    }
}

/// Catmull-Rom (a = -0.5) weights at fractional offset `t`.
fn catmull_rom(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        (-t3 + 2.0 * t2 - t) * 0.5,
        (3.0 * t3 - 5.0 * t2 + 2.0) * 0.5,
        (-3.0 * t3 + 4.0 * t2 + t) * 0.5,
        (t3 - t2) * 0.5,
    ]
}

fn quantize(w: [f32; 4]) -> [i32; 4] {
    let range = BICUBIC_RANGE as f32;
    let q0 = (w[0] * range).round() as i32;
    let q2 = (w[2] * range).round() as i32;
    let q3 = (w[3] * range).round() as i32;
    [q0, BICUBIC_RANGE - q0 - q2 - q3, q2, q3]
}

#[cfg(test)]
mod tests {
    use super::{catmull_rom, CubicTable};
    use crate::table::BICUBIC_RANGE;

    #[test]
    fn four_to_eight_has_all_three_regions() {
        let table = CubicTable::build(4, 8).unwrap();
        let edges = table.edges();
        assert_eq!(edges.nose, 0..3);
        assert_eq!(edges.body, 3..5);
        assert_eq!(edges.tail, 5..8);
        for d in edges.nose.clone().chain(edges.tail.clone()) {
            assert!(table.taps(d).iter().all(|&t| t < 4));
        }
        for d in edges.body {
            let i = table.index()[d];
            assert!(i >= 1 && i + 2 < 4);
            assert_eq!(table.taps(d), [i - 1, i, i + 1, i + 2]);
        }
    }

    #[test]
    fn weights_sum_to_range() {
        for src in 1..20 {
            for dst in 1..20 {
                let table = CubicTable::build(src, dst).unwrap();
                let edges = table.edges();
                assert_eq!(edges.nose.start, 0);
                assert_eq!(edges.nose.end, edges.body.start);
                assert_eq!(edges.body.end, edges.tail.start);
                assert_eq!(edges.tail.end, dst);
                for d in 0..dst {
                    assert_eq!(table.weights()[d].iter().sum::<i32>(), BICUBIC_RANGE);
                    assert!(table.taps(d).iter().all(|&t| t < src));
                }
            }
        }
    }

    #[test]
    fn identity_selects_single_tap() {
        let table = CubicTable::build(6, 6).unwrap();
        for d in 0..5 {
            assert_eq!(table.weights()[d], [0, BICUBIC_RANGE, 0, 0]);
            assert_eq!(table.taps(d)[1], d);
        }
        assert_eq!(table.weights()[5], [0, 0, BICUBIC_RANGE, 0]);
        assert_eq!(table.taps(5)[2], 5);
    }

    #[test]
    fn catmull_rom_is_partition_of_unity() {
        for step in 0..=16 {
            let t = step as f32 / 16.0;
            let sum: f32 = catmull_rom(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
        let half = catmull_rom(0.5);
        assert!((half[0] + 0.0625).abs() < 1e-6);
        assert!((half[1] - 0.5625).abs() < 1e-6);
    }
}
