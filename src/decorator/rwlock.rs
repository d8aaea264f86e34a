//! Reader/writer locking around a store.

use parking_lot::RwLock;

use crate::{DynamicStore, SplitFn, Store, StoreError};

/// Guards `child` with a caller-owned [`RwLock`].
///
/// | Operation | Lock |
/// |-----------|------|
/// | `read`, `size` | shared |
/// | `write`, `resize` | exclusive |
/// | `split` | exclusive barrier, then released |
///
/// Locks are only tried, never waited for: contention is reported as
/// [`StoreError::WouldBlock`]. `parking_lot`'s lock is task-fair, so readers
/// cannot starve a writer waiting on the same lock elsewhere.
///
/// `split` does not hold the lock across the continuation. It takes the
/// exclusive lock once as a barrier and hands the continuation a sub-store
/// re-wrapped in a new `RwLockStore` on the same lock, so every access made
/// inside the continuation is locked on its own.
#[derive(Debug)]
pub struct RwLockStore<'l, S> {
    child: S,
    lock: &'l RwLock<()>,
}

impl<'l, S> RwLockStore<'l, S> {
    /// Guard `child` with `lock`.
    pub fn new(child: S, lock: &'l RwLock<()>) -> Self {
        Self { child, lock }
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.child
    }
}

impl<S: Store> Store for RwLockStore<'_, S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let _shared = self
            .lock
            .try_read()
            .ok_or(StoreError::WouldBlock { operation: "read" })?;
        self.child.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let _exclusive = self
            .lock
            .try_write()
            .ok_or(StoreError::WouldBlock { operation: "write" })?;
        self.child.write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        drop(
            self.lock
                .try_write()
                .ok_or(StoreError::WouldBlock { operation: "split" })?,
        );
        let lock = self.lock;
        self.child
            .split(begin, end, &mut |sub| block(&mut RwLockStore::new(sub, lock)))
    }
}

impl<S: DynamicStore> DynamicStore for RwLockStore<'_, S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        let _shared = self
            .lock
            .try_read()
            .ok_or(StoreError::WouldBlock { operation: "size" })?;
        self.child.size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        let _exclusive = self.lock.try_write().ok_or(StoreError::WouldBlock {
            operation: "resize",
        })?;
        self.child.resize(new_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn readers_share_writers_exclude() {
        let lock = RwLock::new(());
        let mut bytes = *b"data";
        let mut guarded = RwLockStore::new(MemoryStore::new(&mut bytes), &lock);

        let reader = lock.read();
        assert_eq!(guarded.read(&mut [0u8; 4]).unwrap(), 4);
        assert!(guarded.write(b"x").unwrap_err().is_would_block());
        drop(reader);
        assert_eq!(guarded.write(b"x").unwrap(), 1);
    }

    #[test]
    fn split_rewraps_instead_of_holding() {
        let lock = RwLock::new(());
        let mut bytes = [0u8; 8];
        let mut guarded = RwLockStore::new(MemoryStore::new(&mut bytes), &lock);

        let mut free_inside = false;
        guarded
            .split(2, 6, &mut |sub| {
                free_inside = lock.try_write().is_some();
                sub.write(b"ab")
            })
            .unwrap();
        assert!(free_inside);
    }

    #[test]
    fn split_rewrapped_store_still_locks() {
        let lock = RwLock::new(());
        let mut bytes = [0u8; 8];
        let mut guarded = RwLockStore::new(MemoryStore::new(&mut bytes), &lock);

        let result = guarded.split(0, 4, &mut |sub| {
            let _reader = lock.read();
            sub.write(b"ab")
        });
        assert!(result.unwrap_err().is_would_block());
    }

    #[test]
    fn split_barrier_refuses_while_read_locked() {
        let lock = RwLock::new(());
        let mut bytes = [0u8; 8];
        let mut guarded = RwLockStore::new(MemoryStore::new(&mut bytes), &lock);
        let _reader = lock.read();
        assert!(guarded.split(0, 4, &mut |_| Ok(0)).is_err());
    }
}
