//! The store that refuses everything.

use crate::{DynamicStore, SplitFn, Store, StoreError};

/// A zero-sized store whose every operation fails.
///
/// Stands in for a store that could not be produced: an absent side of an
/// `Option`, or a lazy resource whose acquisition failed. `split` hands the
/// continuation another `Noop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Noop;

impl Store for Noop {
    fn read(&mut self, _buffer: &mut [u8]) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable { operation: "read" })
    }

    fn write(&mut self, _buffer: &[u8]) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable { operation: "write" })
    }

    fn split(
        &mut self,
        _begin: usize,
        _end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        block(self)
    }
}

impl DynamicStore for Noop {
    fn size(&mut self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable { operation: "size" })
    }

    fn resize(&mut self, _new_size: usize) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable {
            operation: "resize",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_fails() {
        let mut noop = Noop;
        assert!(noop.read(&mut [0u8; 1]).is_err());
        assert!(noop.write(b"x").is_err());
        assert!(noop.size().is_err());
        assert!(noop.resize(1).is_err());
    }

    #[test]
    fn split_passes_a_noop() {
        let mut noop = Noop;
        let result = noop.split(0, 4, &mut |sub| sub.write(b"x"));
        assert!(matches!(
            result,
            Err(StoreError::Unavailable { operation: "write" })
        ));
    }

    #[test]
    fn is_zero_sized() {
        assert_eq!(std::mem::size_of::<Noop>(), 0);
    }
}
