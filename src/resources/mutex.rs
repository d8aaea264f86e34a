//! A resource bundled with its own lock.

use parking_lot::Mutex;

use crate::{MutexStore, Resource, StoreError};

/// Owns a [`Mutex`] and a child resource; the store is the child's store
/// behind a [`MutexStore`] on that lock.
///
/// The lock is reachable through [`lock`](MutexResource::lock) so other code
/// holding a shared reference can exclude the store's users.
#[derive(Debug, Default)]
pub struct MutexResource<R> {
    child: R,
    lock: Mutex<()>,
}

impl<R: Resource> MutexResource<R> {
    /// Guard `child` with a fresh lock.
    pub fn new(child: R) -> Self {
        Self {
            child,
            lock: Mutex::new(()),
        }
    }

    /// The lock guarding the store.
    pub fn lock(&self) -> &Mutex<()> {
        &self.lock
    }
}

impl<R: Resource> Resource for MutexResource<R> {
    type Store<'a>
        = MutexStore<'a, R::Store<'a>>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        self.child.init()
    }

    fn store(&mut self) -> Self::Store<'_> {
        MutexStore::new(self.child.store(), &self.lock)
    }

    fn deinit(&mut self) {
        self.child.deinit();
    }
}
