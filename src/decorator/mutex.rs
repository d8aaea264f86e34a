//! Mutual exclusion around a store.

use parking_lot::Mutex;

use crate::{DynamicStore, SplitFn, Store, StoreError};

/// Guards every operation on `child` with a caller-owned [`Mutex`].
///
/// The lock is only ever *tried*: if another holder has it, the operation
/// fails with [`StoreError::WouldBlock`] instead of waiting.
///
/// `split` holds the lock for the whole continuation and hands it the
/// undecorated sub-store, so nothing inside the continuation re-locks.
///
/// # Example
///
/// ```rust
/// use parking_lot::Mutex;
/// use salt_stores::{MemoryStore, MutexStore, Store};
///
/// let lock = Mutex::new(());
/// let mut bytes = [0u8; 4];
/// let mut guarded = MutexStore::new(MemoryStore::new(&mut bytes), &lock);
///
/// let held = lock.lock();
/// assert!(guarded.write(b"x").unwrap_err().is_would_block());
/// drop(held);
/// assert_eq!(guarded.write(b"x").unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct MutexStore<'l, S> {
    child: S,
    lock: &'l Mutex<()>,
}

impl<'l, S> MutexStore<'l, S> {
    /// Guard `child` with `lock`.
    pub fn new(child: S, lock: &'l Mutex<()>) -> Self {
        Self { child, lock }
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.child
    }
}

fn would_block(operation: &'static str) -> StoreError {
    StoreError::WouldBlock { operation }
}

impl<S: Store> Store for MutexStore<'_, S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let _guard = self.lock.try_lock().ok_or_else(|| would_block("read"))?;
        self.child.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let _guard = self.lock.try_lock().ok_or_else(|| would_block("write"))?;
        self.child.write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        let _guard = self.lock.try_lock().ok_or_else(|| would_block("split"))?;
        self.child.split(begin, end, block)
    }
}

impl<S: DynamicStore> DynamicStore for MutexStore<'_, S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        let _guard = self.lock.try_lock().ok_or_else(|| would_block("size"))?;
        self.child.size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        let _guard = self.lock.try_lock().ok_or_else(|| would_block("resize"))?;
        self.child.resize(new_size)
    }
}
