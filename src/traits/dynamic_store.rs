//! The dynamic store contract: size and resize on top of [`Store`].

use crate::{SplitFn, Store, StoreError};

/// A store whose size can be queried and changed.
///
/// Kept separate from [`Store`] so that composites whose size is not coherent
/// after structural splitting cannot expose `size`/`resize` by accident. Any
/// `DynamicStore` is usable where a `Store` is expected; going the other way
/// requires the explicit [`Sizeless`] wrapper.
///
/// # Races
///
/// `size` and `resize` are inherently racy on shared backends. Call them with
/// no overlapping external access.
pub trait DynamicStore: Store {
    /// The current size of the store in bytes.
    ///
    /// # Errors
    ///
    /// The store cannot report a size (e.g. a failed lazy acquisition).
    fn size(&mut self) -> Result<usize, StoreError>;

    /// Attempt to resize the store to `new_size` bytes and return the size
    /// after the attempt.
    ///
    /// Resizing is best-effort: a store that cannot honour the request may
    /// return its unchanged size instead of failing.
    ///
    /// # Errors
    ///
    /// Backend failures while resizing.
    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError>;
}

impl<S: DynamicStore + ?Sized> DynamicStore for &mut S {
    #[inline]
    fn size(&mut self) -> Result<usize, StoreError> {
        (**self).size()
    }

    #[inline]
    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        (**self).resize(new_size)
    }
}

impl<S: DynamicStore + ?Sized> DynamicStore for Box<S> {
    #[inline]
    fn size(&mut self) -> Result<usize, StoreError> {
        (**self).size()
    }

    #[inline]
    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        (**self).resize(new_size)
    }
}

impl<S: DynamicStore> DynamicStore for Option<S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        match self {
            Some(store) => store.size(),
            None => Err(StoreError::Unavailable { operation: "size" }),
        }
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        match self {
            Some(store) => store.resize(new_size),
            None => Err(StoreError::Unavailable {
                operation: "resize",
            }),
        }
    }
}

/// Explicit cast of a static store to a [`DynamicStore`].
///
/// Wrapping a store in `Sizeless` acknowledges that `size` and `resize` are
/// unavailable: both report [`StoreError::NotSupported`]. Read, write and split
/// pass straight through.
///
/// # Example
///
/// ```rust
/// use salt_stores::{DynamicStore, Pipe, Sizeless, StoreError};
///
/// let mut stream = Sizeless::new(Pipe::new());
/// assert!(matches!(stream.size(), Err(StoreError::NotSupported { .. })));
/// ```
#[derive(Debug, Default)]
pub struct Sizeless<S> {
    inner: S,
}

impl<S: Store> Sizeless<S> {
    /// Wrap `inner`, giving up its size information.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Store> Store for Sizeless<S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.inner.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        self.inner.write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        self.inner.split(begin, end, block)
    }
}

impl<S: Store> DynamicStore for Sizeless<S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        Err(StoreError::NotSupported { operation: "size" })
    }

    fn resize(&mut self, _new_size: usize) -> Result<usize, StoreError> {
        Err(StoreError::NotSupported {
            operation: "resize",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn dynamic_store_is_object_safe() {
        fn _check(_: &mut dyn DynamicStore) {}
    }

    #[test]
    fn dynamic_store_is_a_store() {
        fn _takes_store<S: Store + ?Sized>(_: &mut S) {}
        fn _check<S: DynamicStore>(store: &mut S) {
            _takes_store(store);
        }
    }

    #[test]
    fn sizeless_passes_data_through() {
        let mut bytes = [0u8; 4];
        let mut store = Sizeless::new(MemoryStore::new(&mut bytes));
        assert_eq!(store.write(b"hi").unwrap(), 2);
        assert!(matches!(
            store.resize(8),
            Err(StoreError::NotSupported { .. })
        ));
        drop(store);
        assert_eq!(&bytes[..2], b"hi");
    }
}
