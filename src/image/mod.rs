//! Byte-strided image views and an owned image buffer.
//!
//! Views borrow caller memory for the duration of one resize call. The stride
//! counts bytes between the starts of consecutive rows and may exceed the row
//! size; padding bytes are never read or written. Geometry is validated once
//! at construction so resamplers can index rows without further checks.

use crate::params::SampleKind;
use crate::util::{RescaleError, RescaleResult};

/// Borrowed read-only image with an explicit byte stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    row_bytes: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a view of `height` rows of `width * pixel_size` bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        pixel_size: usize,
        stride: usize,
    ) -> RescaleResult<Self> {
        let row_bytes = row_bytes(width, height, pixel_size)?;
        let needed = required_len(row_bytes, height, stride)?;
        if data.len() < needed {
            return Err(RescaleError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            row_bytes,
            stride,
        })
    }

    /// Creates a tightly packed view (`stride == width * pixel_size`).
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        pixel_size: usize,
    ) -> RescaleResult<Self> {
        Self::new(data, width, height, pixel_size, width * pixel_size)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes of pixel data per row.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns row `y` without padding, or `None` when out of range.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        Some(self.row_at(y))
    }

    /// Row `y`; `y < height` is an invariant of every caller.
    #[inline]
    pub(crate) fn row_at(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes]
    }
}

/// Borrowed writable image with an explicit byte stride.
pub struct ImageViewMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    row_bytes: usize,
    stride: usize,
}

impl<'a> ImageViewMut<'a> {
    /// Creates a writable view of `height` rows of `width * pixel_size` bytes.
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        pixel_size: usize,
        stride: usize,
    ) -> RescaleResult<Self> {
        let row_bytes = row_bytes(width, height, pixel_size)?;
        let needed = required_len(row_bytes, height, stride)?;
        if data.len() < needed {
            return Err(RescaleError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            row_bytes,
            stride,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns writable row `y`, or `None` when out of range.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        Some(self.row_at_mut(y))
    }

    #[inline]
    pub(crate) fn row_at_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + self.row_bytes]
    }
}

/// Owned, tightly packed image of interleaved native-endian samples.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
    sample: SampleKind,
}

impl OwnedImage {
    /// Allocates a zero-filled image.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        sample: SampleKind,
    ) -> RescaleResult<Self> {
        let len = row_bytes(width, height, channels * sample.size())?
            .checked_mul(height)
            .ok_or(RescaleError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
            channels,
            sample,
        })
    }

    /// Wraps raw bytes; the length must match the geometry exactly.
    pub fn from_vec(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
        sample: SampleKind,
    ) -> RescaleResult<Self> {
        let needed = row_bytes(width, height, channels * sample.size())?
            .checked_mul(height)
            .ok_or(RescaleError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(RescaleError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            sample,
        })
    }

    /// Builds a 16-bit image from samples.
    pub fn from_u16(
        samples: &[u16],
        width: usize,
        height: usize,
        channels: usize,
    ) -> RescaleResult<Self> {
        let data = samples.iter().flat_map(|v| v.to_ne_bytes()).collect();
        Self::from_vec(data, width, height, channels, SampleKind::U16)
    }

    /// Builds a float image from samples.
    pub fn from_f32(
        samples: &[f32],
        width: usize,
        height: usize,
        channels: usize,
    ) -> RescaleResult<Self> {
        let data = samples.iter().flat_map(|v| v.to_ne_bytes()).collect();
        Self::from_vec(data, width, height, channels, SampleKind::F32)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample representation.
    pub fn sample(&self) -> SampleKind {
        self.sample
    }

    /// Stride in bytes (always the packed row size).
    pub fn stride(&self) -> usize {
        self.width * self.channels * self.sample.size()
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes, writable.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Decodes the samples as `u16`; empty unless the sample kind is `U16`.
    pub fn to_u16_vec(&self) -> Vec<u16> {
        if self.sample != SampleKind::U16 {
            return Vec::new();
        }
        self.data
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect()
    }

    /// Decodes the samples as `f32`; empty unless the sample kind is `F32`.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        if self.sample != SampleKind::F32 {
            return Vec::new();
        }
        self.data
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    /// Borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            row_bytes: self.stride(),
            stride: self.stride(),
        }
    }
}

fn row_bytes(width: usize, height: usize, pixel_size: usize) -> RescaleResult<usize> {
    if width == 0 || height == 0 {
        return Err(RescaleError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(pixel_size)
        .ok_or(RescaleError::InvalidDimensions { width, height })
}

fn required_len(row_bytes: usize, height: usize, stride: usize) -> RescaleResult<usize> {
    if stride < row_bytes {
        return Err(RescaleError::InvalidStride { row_bytes, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(RescaleError::BufferTooSmall {
            needed: usize::MAX,
            got: 0,
        })
}
