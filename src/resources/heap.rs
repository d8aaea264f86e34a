//! Heap-allocated buffers with a write watermark.

use tracing::warn;

use crate::{DynamicStore, Resource, SplitFn, Store, StoreError};

/// A zeroed heap buffer of a fixed size, allocated on `init`.
///
/// The buffer tracks how far it has been written (its *watermark*). Reads
/// never return bytes past the watermark, so a fresh buffer used as a cache
/// reads nothing until something is stored in it.
///
/// # Example
///
/// ```rust
/// use salt_stores::{use_resource, HeapResource, Store};
///
/// let mut heap = HeapResource::new(8);
/// use_resource(&mut heap, |acquired| {
///     let mut out = [0u8; 8];
///     assert_eq!(acquired.read(&mut out)?, 0);
///     acquired.write(b"abc")?;
///     assert_eq!(acquired.read(&mut out)?, 3);
///     Ok(())
/// })
/// .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct HeapResource {
    size: usize,
    buffer: Vec<u8>,
    written: usize,
}

impl HeapResource {
    /// A resource that allocates `size` bytes on `init`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            buffer: Vec::new(),
            written: 0,
        }
    }

    /// The configured allocation size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Resource for HeapResource {
    type Store<'a> = HeapStore<'a>;

    fn init(&mut self) -> Result<(), StoreError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(self.size)
            .map_err(|_| StoreError::AllocationFailed {
                requested: self.size,
            })?;
        buffer.resize(self.size, 0);
        self.buffer = buffer;
        self.written = 0;
        Ok(())
    }

    fn store(&mut self) -> Self::Store<'_> {
        HeapStore::new(&mut self.buffer, &mut self.written)
    }

    fn deinit(&mut self) {
        self.buffer = Vec::new();
        self.written = 0;
    }
}

/// The store over an owned buffer and its watermark.
///
/// Produced by [`HeapResource`] and [`FormatResource`](crate::FormatResource).
/// `resize` grows or shrinks the buffer; growing is best-effort and leaves the
/// size unchanged if the allocation fails.
#[derive(Debug)]
pub struct HeapStore<'a> {
    buffer: &'a mut Vec<u8>,
    written: &'a mut usize,
}

impl<'a> HeapStore<'a> {
    pub(crate) fn new(buffer: &'a mut Vec<u8>, written: &'a mut usize) -> Self {
        Self { buffer, written }
    }

    /// How many leading bytes have been written.
    #[inline]
    pub fn written(&self) -> usize {
        *self.written
    }

    /// The whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer
    }
}

impl Store for HeapStore<'_> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        HeapSlice::new(self.buffer, 0, self.written).read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        HeapSlice::new(self.buffer, 0, self.written).write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        HeapSlice::new(self.buffer, 0, self.written).split(begin, end, block)
    }
}

impl DynamicStore for HeapStore<'_> {
    fn size(&mut self) -> Result<usize, StoreError> {
        Ok(self.buffer.len())
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        let current = self.buffer.len();
        if new_size > current && self.buffer.try_reserve_exact(new_size - current).is_err() {
            warn!(current, requested = new_size, "heap store could not grow");
            return Ok(current);
        }
        self.buffer.resize(new_size, 0);
        *self.written = (*self.written).min(new_size);
        Ok(new_size)
    }
}

/// A split of a [`HeapStore`], sharing its watermark.
#[derive(Debug)]
struct HeapSlice<'a> {
    bytes: &'a mut [u8],
    base: usize,
    written: &'a mut usize,
}

impl<'a> HeapSlice<'a> {
    fn new(bytes: &'a mut [u8], base: usize, written: &'a mut usize) -> Self {
        Self {
            bytes,
            base,
            written,
        }
    }
}

impl Store for HeapSlice<'_> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let readable = self.written.saturating_sub(self.base).min(self.bytes.len());
        let n = buffer.len().min(readable);
        buffer[..n].copy_from_slice(&self.bytes[..n]);
        Ok(n)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let n = buffer.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&buffer[..n]);
        *self.written = (*self.written).max(self.base + n);
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
        let mut sub = HeapSlice::new(&mut self.bytes[begin..end], self.base + begin, self.written);
        block(&mut sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{acquire, use_resource};

    #[test]
    fn init_zero_fills() {
        let mut heap = HeapResource::new(4);
        let mut acquired = acquire(&mut heap).unwrap();
        let store = acquired.store();
        assert_eq!(store.as_bytes(), &[0u8; 4]);
        assert_eq!(store.written(), 0);
    }

    #[test]
    fn huge_allocation_fails() {
        let mut heap = HeapResource::new(usize::MAX);
        assert!(matches!(
            acquire(&mut heap),
            Err(StoreError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn split_write_raises_shared_watermark() {
        let mut heap = HeapResource::new(8);
        use_resource(&mut heap, |acquired| {
            let mut store = acquired.store();
            store.split(2, 5, &mut |sub| sub.write(b"xyz"))?;
            assert_eq!(store.written(), 5);

            let mut out = [0u8; 8];
            assert_eq!(store.read(&mut out)?, 5);
            assert_eq!(&out[..5], b"\0\0xyz");

            let tail = store.split(4, 8, &mut |sub| sub.read(&mut out))?;
            assert_eq!(tail, 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn resize_trims_watermark() {
        let mut heap = HeapResource::new(8);
        use_resource(&mut heap, |acquired| {
            let mut store = acquired.store();
            store.write(b"abcdef")?;
            assert_eq!(store.resize(3)?, 3);
            assert_eq!(store.written(), 3);
            assert_eq!(store.resize(16)?, 16);
            assert_eq!(store.size()?, 16);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn deinit_releases_buffer() {
        let mut heap = HeapResource::new(8);
        drop(acquire(&mut heap).unwrap());
        assert!(heap.buffer.is_empty());
    }
}
