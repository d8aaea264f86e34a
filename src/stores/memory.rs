//! A store over a caller-owned byte slice.

use crate::{DynamicStore, SplitFn, Store, StoreError};

/// A store over a borrowed `&mut [u8]`.
///
/// Reads and writes copy `min(requested, len)` bytes from the start of the
/// slice. Splits clamp both bounds to the slice, so an out-of-range split
/// yields an empty store rather than an error.
///
/// # Example
///
/// ```rust
/// use salt_stores::{DynamicStore, MemoryStore, Store};
///
/// let mut bytes = [0u8; 8];
/// let mut store = MemoryStore::new(&mut bytes);
/// assert_eq!(store.write(b"0123456789").unwrap(), 8);
/// assert_eq!(store.resize(4).unwrap(), 4);
/// assert_eq!(store.resize(16).unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct MemoryStore<'a> {
    bytes: &'a mut [u8],
}

impl<'a> MemoryStore<'a> {
    /// Wrap a slice.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Length of the visible range.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the visible range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The visible bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}

impl Store for MemoryStore<'_> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let n = buffer.len().min(self.bytes.len());
        buffer[..n].copy_from_slice(&self.bytes[..n]);
        Ok(n)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let n = buffer.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&buffer[..n]);
        Ok(n)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        let end = end.min(self.bytes.len());
        let begin = begin.min(end);
        let mut sub = MemoryStore::new(&mut self.bytes[begin..end]);
        block(&mut sub)
    }
}

impl DynamicStore for MemoryStore<'_> {
    fn size(&mut self) -> Result<usize, StoreError> {
        Ok(self.bytes.len())
    }

    /// Only shrinking is possible; growing leaves the size unchanged.
    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        if new_size < self.bytes.len() {
            let bytes = std::mem::take(&mut self.bytes);
            self.bytes = &mut bytes[..new_size];
        }
        Ok(self.bytes.len())
    }
}
