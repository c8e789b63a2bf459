//! Immutable description of a resize job.

use crate::util::{RescaleError, RescaleResult};

/// Default element alignment of row accumulators.
pub const DEFAULT_ALIGNMENT: usize = 32;

/// Representation of one channel sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer, native endian.
    U16,
    /// 32-bit float, native endian.
    F32,
}

impl SampleKind {
    /// Width of one sample in bytes.
    pub const fn size(self) -> usize {
        match self {
            SampleKind::U8 => 1,
            SampleKind::U16 => 2,
            SampleKind::F32 => 4,
        }
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            SampleKind::U8 => "u8",
            SampleKind::U16 => "u16",
            SampleKind::F32 => "f32",
        }
    }
}

/// Resampling algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeMethod {
    /// Nearest neighbour sampling at pixel centers: `floor((d + 0.5) * src / dst)`.
    Nearest,
    /// Nearest neighbour without the half-pixel offset: `floor(d * src / dst)`.
    NearestPytorch,
    /// Box filter weighting every covered source sample by overlap.
    Area,
    /// Two-tap linear interpolation with half-pixel centers.
    Bilinear,
    /// Two-tap linear interpolation with aligned corners.
    BilinearCaffe,
    /// Half-pixel bilinear with negative positions clamped before flooring.
    BilinearPytorch,
    /// Four-tap Catmull-Rom interpolation (8-bit samples only).
    Bicubic,
}

impl ResizeMethod {
    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            ResizeMethod::Nearest => "nearest",
            ResizeMethod::NearestPytorch => "nearest_pytorch",
            ResizeMethod::Area => "area",
            ResizeMethod::Bilinear => "bilinear",
            ResizeMethod::BilinearCaffe => "bilinear_caffe",
            ResizeMethod::BilinearPytorch => "bilinear_pytorch",
            ResizeMethod::Bicubic => "bicubic",
        }
    }

    /// Looks a method up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        let method = match name {
            "nearest" => ResizeMethod::Nearest,
            "nearest_pytorch" => ResizeMethod::NearestPytorch,
            "area" => ResizeMethod::Area,
            "bilinear" => ResizeMethod::Bilinear,
            "bilinear_caffe" => ResizeMethod::BilinearCaffe,
            "bilinear_pytorch" => ResizeMethod::BilinearPytorch,
            "bicubic" => ResizeMethod::Bicubic,
            _ => return None,
        };
        Some(method)
    }
}

/// Sub-variant of the area resampler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AreaMode {
    /// Weights every source sample directly.
    #[default]
    OneByOne,
    /// Sums 2x2 source blocks first and runs the area pass on the halved grid.
    ///
    /// The caller opts in; the choice is never derived from the scale factor.
    TwoByTwo,
}

/// Immutable resize job description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeParameters {
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    channels: usize,
    sample: SampleKind,
    method: ResizeMethod,
    area_mode: AreaMode,
    align: usize,
}

impl ResizeParameters {
    /// Validates and builds a job description.
    ///
    /// All four extents must be non-zero and `channels` must be in `1..=4`.
    pub fn new(
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
        channels: usize,
        sample: SampleKind,
        method: ResizeMethod,
    ) -> RescaleResult<Self> {
        if src_width == 0 || src_height == 0 {
            return Err(RescaleError::InvalidDimensions {
                width: src_width,
                height: src_height,
            });
        }
        if dst_width == 0 || dst_height == 0 {
            return Err(RescaleError::InvalidDimensions {
                width: dst_width,
                height: dst_height,
            });
        }
        if !(1..=4).contains(&channels) {
            return Err(RescaleError::UnsupportedChannels { channels });
        }
        Ok(Self {
            src_width,
            src_height,
            dst_width,
            dst_height,
            channels,
            sample,
            method,
            area_mode: AreaMode::OneByOne,
            align: DEFAULT_ALIGNMENT,
        })
    }

    /// Returns a copy using the given area sub-variant.
    pub fn with_area_mode(mut self, area_mode: AreaMode) -> Self {
        self.area_mode = area_mode;
        self
    }

    /// Returns a copy with a different accumulator alignment (in elements).
    pub fn with_alignment(mut self, align: usize) -> RescaleResult<Self> {
        if align == 0 || !align.is_power_of_two() {
            return Err(RescaleError::InvalidAlignment { align });
        }
        self.align = align;
        Ok(self)
    }

    /// Source width in pixels.
    pub fn src_width(&self) -> usize {
        self.src_width
    }

    /// Source height in pixels.
    pub fn src_height(&self) -> usize {
        self.src_height
    }

    /// Destination width in pixels.
    pub fn dst_width(&self) -> usize {
        self.dst_width
    }

    /// Destination height in pixels.
    pub fn dst_height(&self) -> usize {
        self.dst_height
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample representation.
    pub fn sample(&self) -> SampleKind {
        self.sample
    }

    /// Resampling method.
    pub fn method(&self) -> ResizeMethod {
        self.method
    }

    /// Area sub-variant (ignored by the other methods).
    pub fn area_mode(&self) -> AreaMode {
        self.area_mode
    }

    /// Accumulator alignment in elements.
    pub fn alignment(&self) -> usize {
        self.align
    }

    /// Bytes per pixel.
    pub fn pixel_size(&self) -> usize {
        self.channels * self.sample.size()
    }

    /// Minimum source stride in bytes.
    pub fn src_row_bytes(&self) -> usize {
        self.src_width * self.pixel_size()
    }

    /// Minimum destination stride in bytes.
    pub fn dst_row_bytes(&self) -> usize {
        self.dst_width * self.pixel_size()
    }
}

#[cfg(test)]
mod tests {
    use super::{AreaMode, ResizeMethod, ResizeParameters, SampleKind};
    use crate::util::RescaleError;

    #[test]
    fn row_sizes_follow_channels_and_sample_width() {
        let params =
            ResizeParameters::new(10, 4, 5, 2, 3, SampleKind::F32, ResizeMethod::Bilinear)
                .unwrap();
        assert_eq!(params.pixel_size(), 12);
        assert_eq!(params.src_row_bytes(), 120);
        assert_eq!(params.dst_row_bytes(), 60);
        assert_eq!(params.area_mode(), AreaMode::OneByOne);
    }

    #[test]
    fn rejects_zero_extent_and_bad_channels() {
        let err = ResizeParameters::new(0, 4, 5, 2, 1, SampleKind::U8, ResizeMethod::Area)
            .unwrap_err();
        assert_eq!(
            err,
            RescaleError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        let err = ResizeParameters::new(4, 4, 5, 0, 1, SampleKind::U8, ResizeMethod::Area)
            .unwrap_err();
        assert_eq!(
            err,
            RescaleError::InvalidDimensions {
                width: 5,
                height: 0
            }
        );
        let err = ResizeParameters::new(4, 4, 2, 2, 5, SampleKind::U8, ResizeMethod::Area)
            .unwrap_err();
        assert_eq!(err, RescaleError::UnsupportedChannels { channels: 5 });
    }

    #[test]
    fn alignment_must_be_power_of_two() {
        let params =
            ResizeParameters::new(4, 4, 2, 2, 1, SampleKind::U8, ResizeMethod::Area).unwrap();
        assert_eq!(params.clone().with_alignment(16).unwrap().alignment(), 16);
        assert_eq!(
            params.with_alignment(24).unwrap_err(),
            RescaleError::InvalidAlignment { align: 24 }
        );
    }

    #[test]
    fn method_names_round_trip() {
        for method in [
            ResizeMethod::Nearest,
            ResizeMethod::NearestPytorch,
            ResizeMethod::Area,
            ResizeMethod::Bilinear,
            ResizeMethod::BilinearCaffe,
            ResizeMethod::BilinearPytorch,
            ResizeMethod::Bicubic,
        ] {
            assert_eq!(ResizeMethod::from_name(method.name()), Some(method));
        }
        assert_eq!(ResizeMethod::from_name("lanczos"), None);
    }
}
