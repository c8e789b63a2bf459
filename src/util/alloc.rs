//! Fallible allocation for tables and row buffers.

use crate::util::{RescaleError, RescaleResult};

/// Allocates `len` copies of `fill`, reporting failure instead of aborting.
pub(crate) fn try_vec<T: Clone>(len: usize, fill: T, what: &'static str) -> RescaleResult<Vec<T>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| RescaleError::AllocationFailed { what, bytes })?;
    buf.resize(len, fill);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::try_vec;
    use crate::util::{ErrorKind, RescaleError};

    #[test]
    fn allocates_filled_buffer() {
        let buf = try_vec(5, 7u32, "test").unwrap();
        assert_eq!(buf, vec![7u32; 5]);
    }

    #[test]
    fn impossible_size_is_resource_exhaustion() {
        let err = try_vec(usize::MAX / 2, 0u64, "huge").unwrap_err();
        assert!(matches!(err, RescaleError::AllocationFailed { what: "huge", .. }));
        assert_eq!(err.kind(), ErrorKind::ResourceExhaustion);
    }
}
