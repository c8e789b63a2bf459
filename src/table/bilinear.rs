//! Two-tap (bilinear) index and weight tables.

use crate::params::ResizeMethod;
use crate::table::FRACTION_RANGE;
use crate::util::alloc::try_vec;
use crate::util::RescaleResult;

/// Two-tap table: for each destination position the pair
/// `(index[d], next[d])` and the weight of `next[d]`.
///
/// `index[d] <= src - 2` whenever `src >= 2` and `next[d]` is the clamped
/// `index[d] + 1`, so both taps are always valid source pixels.
#[derive(Clone, Debug)]
pub struct LinearTable<W> {
    index: Vec<usize>,
    next: Vec<usize>,
    alpha: Vec<W>,
}

/// Byte table: weights in `0..=FRACTION_RANGE`.
pub type LinearTableU8 = LinearTable<i32>;
/// Float table: weights in `0.0..=1.0`.
pub type LinearTableF32 = LinearTable<f32>;

impl<W: Copy> LinearTable<W> {
    /// Number of destination positions.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no positions.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// First tap per destination position.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Second tap per destination position.
    pub fn next(&self) -> &[usize] {
        &self.next
    }

    /// Weight of the second tap per destination position.
    pub fn alpha(&self) -> &[W] {
        &self.alpha
    }
}

impl LinearTable<i32> {
    /// Builds a byte table; weights are `(int)(frac * 16 + 0.5)`.
    pub fn build_u8(src: usize, dst: usize, method: ResizeMethod) -> RescaleResult<Self> {
        build(src, dst, method, |alpha| {
            (alpha * FRACTION_RANGE as f32 + 0.5) as i32
        })
    }

    /// Tap weights of position `d`; they always sum to `FRACTION_RANGE`.
    pub fn weights_at(&self, d: usize) -> [i32; 2] {
        [FRACTION_RANGE - self.alpha[d], self.alpha[d]]
    }
}

impl LinearTable<f32> {
    /// Builds a float table.
    pub fn build_f32(src: usize, dst: usize, method: ResizeMethod) -> RescaleResult<Self> {
        build(src, dst, method, |alpha| alpha)
    }

    /// Tap weights of position `d`.
    pub fn weights_at(&self, d: usize) -> [f32; 2] {
        [1.0 - self.alpha[d], self.alpha[d]]
    }
}

fn build<W: Copy + Default>(
    src: usize,
    dst: usize,
    method: ResizeMethod,
    quantize: impl Fn(f32) -> W,
) -> RescaleResult<LinearTable<W>> {
    let mut index = try_vec(dst, 0usize, "bilinear index table")?;
    let mut next = try_vec(dst, 0usize, "bilinear index table")?;
    let mut alpha = try_vec(dst, W::default(), "bilinear weight table")?;
    for d in 0..dst {
        let (i, a) = position(src, dst, method, d);
        index[d] = i;
        next[d] = (i + 1).min(src - 1);
        alpha[d] = quantize(a);
    }
    Ok(LinearTable { index, next, alpha })
}

/// Source tap and fractional weight of destination position `d`.
pub(crate) fn position(src: usize, dst: usize, method: ResizeMethod, d: usize) -> (usize, f32) {
    if src == 1 {
        return (0, 0.0);
    }
    let last = src as i64 - 2;
    let (mut index, mut alpha) = match method {
        ResizeMethod::BilinearCaffe => {
            let scale = if dst > 1 {
                (src - 1) as f32 / (dst - 1) as f32
            } else {
                0.0
            };
            let pos = d as f32 * scale;
            let index = pos.floor() as i64;
            (index, pos - index as f32)
        }
        ResizeMethod::BilinearPytorch => {
            let scale = src as f32 / dst as f32;
            let pos = ((d as f32 + 0.5) * scale - 0.5).max(0.0);
            let index = pos.floor() as i64;
            (index, pos - index as f32)
        }
        _ => {
            let scale = src as f32 / dst as f32;
            let pos = (d as f32 + 0.5) * scale - 0.5;
            let index = pos.floor() as i64;
            if index < 0 {
                (0, 0.0)
            } else {
                (index, pos - index as f32)
            }
        }
    };
    if index > last {
        index = last;
        alpha = 1.0;
    }
    (index as usize, alpha)
}

#[cfg(test)]
mod tests {
    use super::{position, LinearTable};
    use crate::params::ResizeMethod;
    use crate::table::FRACTION_RANGE;

    const METHODS: [ResizeMethod; 3] = [
        ResizeMethod::Bilinear,
        ResizeMethod::BilinearCaffe,
        ResizeMethod::BilinearPytorch,
    ];

    #[test]
    fn identity_collapses_to_unit_taps() {
        for method in METHODS {
            let table = LinearTable::build_u8(5, 5, method).unwrap();
            for d in 0..4 {
                assert_eq!(table.index()[d], d);
                assert_eq!(table.weights_at(d), [FRACTION_RANGE, 0]);
            }
            assert_eq!(table.index()[4], 3);
            assert_eq!(table.next()[4], 4);
            assert_eq!(table.weights_at(4), [0, FRACTION_RANGE]);
        }
    }

    #[test]
    fn taps_stay_in_bounds_and_weights_sum_to_unit() {
        for method in METHODS {
            for src in 1..24 {
                for dst in 1..24 {
                    let table = LinearTable::build_u8(src, dst, method).unwrap();
                    let float = LinearTable::build_f32(src, dst, method).unwrap();
                    for d in 0..dst {
                        assert!(table.next()[d] < src);
                        assert!(table.index()[d] <= table.next()[d]);
                        let [w0, w1] = table.weights_at(d);
                        assert!(w0 >= 0 && w1 >= 0);
                        assert_eq!(w0 + w1, FRACTION_RANGE);
                        let [f0, f1] = float.weights_at(d);
                        assert!((f0 + f1 - 1.0).abs() < 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn half_pixel_upscale_positions() {
        // (d + 0.5) * 0.5 - 0.5 for d = 0..4
        assert_eq!(position(2, 4, ResizeMethod::Bilinear, 0), (0, 0.0));
        assert_eq!(position(2, 4, ResizeMethod::Bilinear, 1), (0, 0.25));
        assert_eq!(position(2, 4, ResizeMethod::Bilinear, 2), (0, 0.75));
        assert_eq!(position(2, 4, ResizeMethod::Bilinear, 3), (0, 1.0));
    }

    #[test]
    fn caffe_aligns_corners() {
        let table = LinearTable::build_f32(3, 5, ResizeMethod::BilinearCaffe).unwrap();
        assert_eq!(table.index(), &[0, 0, 1, 1, 1]);
        assert_eq!(table.alpha(), &[0.0, 0.5, 0.0, 0.5, 1.0]);

        let single = LinearTable::build_f32(4, 1, ResizeMethod::BilinearCaffe).unwrap();
        assert_eq!(single.index(), &[0]);
        assert_eq!(single.alpha(), &[0.0]);
    }
}
