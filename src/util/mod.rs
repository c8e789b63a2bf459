//! Shared utility helpers.

pub(crate) mod alloc;
pub mod error;
pub(crate) mod math;

pub use error::{ErrorKind, RescaleError, RescaleResult};
