//! Error types for rescaler.

use crate::params::{ResizeMethod, SampleKind};
use thiserror::Error;

/// Result alias for rescaler operations.
pub type RescaleResult<T> = std::result::Result<T, RescaleError>;

/// Coarse classification of [`RescaleError`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resize job cannot be built as described. Detected at construction.
    InvalidConfiguration,
    /// Buffers or row ranges handed to a resampler do not match its parameters.
    InvalidInput,
    /// A coefficient table or row accumulator could not be allocated.
    ResourceExhaustion,
}

/// Errors that can occur when building or running a resampler.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RescaleError {
    /// An image extent is zero.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Channel count is outside 1..=4.
    #[error("unsupported channel count {channels}, expected 1..=4")]
    UnsupportedChannels { channels: usize },
    /// No resampler implements this method for this sample kind.
    #[error("method {method:?} is not available for {sample:?} samples")]
    UnsupportedCombination {
        method: ResizeMethod,
        sample: SampleKind,
    },
    /// Alignment must be a non-zero power of two.
    #[error("alignment {align} is not a power of two")]
    InvalidAlignment { align: usize },
    /// The area source holds more weighted samples than exact normalization allows.
    #[error("area source of {pixels} weighted samples is too large")]
    AreaTooLarge { pixels: u64 },
    /// A stride is shorter than one row of samples.
    #[error("stride {stride} is shorter than a row of {row_bytes} bytes")]
    InvalidStride { row_bytes: usize, stride: usize },
    /// A buffer is shorter than its declared geometry.
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A destination row range is empty-inverted or runs past the image.
    #[error("row range {start}..{end} is outside destination height {height}")]
    RowRangeOutOfBounds {
        start: usize,
        end: usize,
        height: usize,
    },
    /// A table or accumulator allocation failed.
    #[error("failed to allocate {bytes} bytes for {what}")]
    AllocationFailed { what: &'static str, bytes: usize },
}

impl RescaleError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RescaleError::InvalidDimensions { .. }
            | RescaleError::UnsupportedChannels { .. }
            | RescaleError::UnsupportedCombination { .. }
            | RescaleError::InvalidAlignment { .. }
            | RescaleError::AreaTooLarge { .. } => ErrorKind::InvalidConfiguration,
            RescaleError::InvalidStride { .. }
            | RescaleError::BufferTooSmall { .. }
            | RescaleError::RowRangeOutOfBounds { .. } => ErrorKind::InvalidInput,
            RescaleError::AllocationFailed { .. } => ErrorKind::ResourceExhaustion,
        }
    }
}
