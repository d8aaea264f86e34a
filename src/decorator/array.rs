//! Fixed-size element view over a byte store.

use crate::{DynamicStore, SplitFn, Store, StoreError};

/// Presents `child` as an array of `element_size`-byte elements.
///
/// Counts and offsets are in elements:
///
/// - `read`/`write` move as many whole elements as fit in the buffer and
///   return the number of elements moved (bytes / `element_size`).
/// - `split(begin, end)` narrows to elements `[begin, end)` and passes the
///   **undecorated** child's sub-store.
/// - `size`/`resize` are in elements.
///
/// # Example
///
/// ```rust
/// use salt_stores::{ArrayStore, DynamicStore, MemoryStore};
///
/// let mut bytes = [0u8; 32];
/// let mut words = ArrayStore::new(MemoryStore::new(&mut bytes), 4).unwrap();
///
/// words.set(3, &7u32.to_le_bytes()).unwrap();
/// let mut word = [0u8; 4];
/// words.get(3, &mut word).unwrap();
/// assert_eq!(u32::from_le_bytes(word), 7);
/// assert_eq!(words.size().unwrap(), 8);
/// ```
#[derive(Debug)]
pub struct ArrayStore<S> {
    child: S,
    element_size: usize,
}

impl<S> ArrayStore<S> {
    /// View `child` as `element_size`-byte elements.
    ///
    /// # Errors
    ///
    /// [`StoreError::ZeroElementSize`] if `element_size` is zero.
    pub fn new(child: S, element_size: usize) -> Result<Self, StoreError> {
        if element_size == 0 {
            return Err(StoreError::ZeroElementSize);
        }
        Ok(Self {
            child,
            element_size,
        })
    }

    pub(crate) fn from_layer(child: S, element_size: usize) -> Self {
        Self {
            child,
            element_size,
        }
    }

    /// Bytes per element.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.child
    }

    fn bytes(&self, elements: usize) -> usize {
        elements.saturating_mul(self.element_size)
    }

    fn check_element(&self, len: usize) -> Result<(), StoreError> {
        if len != self.element_size {
            return Err(StoreError::ElementSize {
                expected: self.element_size,
                actual: len,
            });
        }
        Ok(())
    }
}

impl<S: Store> ArrayStore<S> {
    /// Read element `index` into `element`.
    ///
    /// # Errors
    ///
    /// [`StoreError::ElementSize`] if `element` is not exactly one element
    /// long, [`StoreError::OutOfBounds`] if the element could not be read
    /// whole, or the child's error.
    pub fn get(&mut self, index: usize, element: &mut [u8]) -> Result<(), StoreError> {
        self.check_element(element.len())?;
        let (begin, end) = (self.bytes(index), self.bytes(index.saturating_add(1)));
        let read = self
            .child
            .split(begin, end, &mut |sub| sub.read(&mut *element))?;
        if read < self.element_size {
            return Err(StoreError::OutOfBounds { index });
        }
        Ok(())
    }

    /// Write `element` at `index`.
    ///
    /// # Errors
    ///
    /// As for [`get`](ArrayStore::get).
    pub fn set(&mut self, index: usize, element: &[u8]) -> Result<(), StoreError> {
        self.check_element(element.len())?;
        let (begin, end) = (self.bytes(index), self.bytes(index.saturating_add(1)));
        let written = self.child.split(begin, end, &mut |sub| sub.write(element))?;
        if written < self.element_size {
            return Err(StoreError::OutOfBounds { index });
        }
        Ok(())
    }
}

impl<S: Store> Store for ArrayStore<S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let whole = buffer.len() - buffer.len() % self.element_size;
        Ok(self.child.read(&mut buffer[..whole])? / self.element_size)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let whole = buffer.len() - buffer.len() % self.element_size;
        Ok(self.child.write(&buffer[..whole])? / self.element_size)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        let (begin, end) = (self.bytes(begin), self.bytes(end));
        self.child.split(begin, end, block)
    }
}

impl<S: DynamicStore> DynamicStore for ArrayStore<S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        Ok(self.child.size()? / self.element_size)
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        let bytes = self.bytes(new_size);
        Ok(self.child.resize(bytes)? / self.element_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn zero_element_size_is_rejected() {
        let mut bytes = [0u8; 4];
        assert!(matches!(
            ArrayStore::new(MemoryStore::new(&mut bytes), 0),
            Err(StoreError::ZeroElementSize)
        ));
    }

    #[test]
    fn read_counts_whole_elements() {
        let mut bytes = [1u8; 10];
        let mut pairs = ArrayStore::new(MemoryStore::new(&mut bytes), 2).unwrap();
        let mut out = [0u8; 7];
        assert_eq!(pairs.read(&mut out).unwrap(), 3);
        assert_eq!(out[6], 0);
    }

    #[test]
    fn get_past_end_is_out_of_bounds() {
        let mut bytes = [0u8; 8];
        let mut words = ArrayStore::new(MemoryStore::new(&mut bytes), 4).unwrap();
        let mut word = [0u8; 4];
        assert!(matches!(
            words.get(2, &mut word),
            Err(StoreError::OutOfBounds { index: 2 })
        ));
    }

    #[test]
    fn wrong_element_buffer_is_rejected() {
        let mut bytes = [0u8; 8];
        let mut words = ArrayStore::new(MemoryStore::new(&mut bytes), 4).unwrap();
        assert!(matches!(
            words.set(0, b"abc"),
            Err(StoreError::ElementSize {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn split_passes_byte_store() {
        let mut bytes = [0u8; 8];
        let mut words = ArrayStore::new(MemoryStore::new(&mut bytes), 4).unwrap();
        let written = words.split(1, 2, &mut |sub| sub.write(b"wxyz!")).unwrap();
        assert_eq!(written, 4);
        drop(words);
        assert_eq!(&bytes[4..], b"wxyz");
    }

    #[test]
    fn resize_scales() {
        let mut bytes = [0u8; 16];
        let mut words = ArrayStore::new(MemoryStore::new(&mut bytes), 4).unwrap();
        assert_eq!(words.resize(2).unwrap(), 2);
        assert_eq!(words.size().unwrap(), 2);
    }
}
