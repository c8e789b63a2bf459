//! Nearest neighbour resampling for every sample kind.

use std::ops::Range;

use crate::kernel::KernelKind;
use crate::params::ResizeParameters;
use crate::resize::{frame, lazy_state, Family, Resampler, Variant};
use crate::table::nearest_indices;
use crate::trace::trace_span;
use crate::util::RescaleResult;

struct Tables {
    /// Byte offset of the source pixel for each destination column.
    x_offsets: Vec<usize>,
    y_index: Vec<usize>,
}

impl Tables {
    fn build(params: &ResizeParameters) -> RescaleResult<Self> {
        let pixel_size = params.pixel_size();
        let mut x_offsets =
            nearest_indices(params.src_width(), params.dst_width(), params.method())?;
        for offset in &mut x_offsets {
            *offset *= pixel_size;
        }
        let y_index = nearest_indices(params.src_height(), params.dst_height(), params.method())?;
        Ok(Self { x_offsets, y_index })
    }
}

/// Copies one whole source pixel per destination pixel.
pub(crate) struct NearestResampler {
    params: ResizeParameters,
    tables: Option<Tables>,
}

impl NearestResampler {
    pub fn new(params: ResizeParameters) -> Self {
        Self {
            params,
            tables: None,
        }
    }
}

impl Resampler for NearestResampler {
    fn params(&self) -> &ResizeParameters {
        &self.params
    }

    fn variant(&self) -> Variant {
        Variant {
            family: Family::Nearest,
            kernel: KernelKind::Scalar,
        }
    }

    fn resize_rows(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
        rows: Range<usize>,
    ) -> RescaleResult<()> {
        let Some(mut frame) = frame(&self.params, src, src_stride, dst, dst_stride, rows)? else {
            return Ok(());
        };
        let _span = trace_span!(
            "resize",
            family = "nearest",
            rows_start = frame.rows.start,
            rows_end = frame.rows.end
        )
        .entered();

        let tables = lazy_state(&mut self.tables, Family::Nearest, || {
            Tables::build(&self.params)
        })?;
        let pixel_size = self.params.pixel_size();
        for y in frame.rows.clone() {
            let src_row = frame.src.row_at(tables.y_index[y]);
            let dst_row = frame.dst_row(y);
            for (out, &offset) in dst_row
                .chunks_exact_mut(pixel_size)
                .zip(&tables.x_offsets)
            {
                out.copy_from_slice(&src_row[offset..offset + pixel_size]);
            }
        }
        Ok(())
    }
}
