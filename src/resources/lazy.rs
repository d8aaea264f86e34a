//! Deferred acquisition.

use std::mem;

use tracing::debug;

use crate::{DynamicStore, Noop, Resource, SplitFn, Store, StoreError};

/// Defers the child's `init` until its store is first used.
///
/// `init` on the lazy resource always succeeds and leaves the child alone.
/// The first store operation initializes the child; later operations reuse
/// it. While the child cannot be initialized:
///
/// - `read`, `write`, `size` and `resize` return the initialization error,
/// - `split` runs the continuation with a [`Noop`] store,
///
/// and the next operation tries again. `deinit` releases the child only if it
/// was ever initialized.
///
/// # Example
///
/// ```rust
/// use salt_stores::{use_resource, HeapResource, Lazy, Store};
///
/// let mut lazy = Lazy::new(HeapResource::new(8));
/// use_resource(&mut lazy, |acquired| {
///     acquired.write(b"late")?;
///     Ok(())
/// })
/// .unwrap();
/// assert!(!lazy.is_initialized());
/// ```
#[derive(Debug, Default)]
pub struct Lazy<R> {
    child: R,
    initialized: bool,
}

impl<R: Resource> Lazy<R> {
    /// Defer `child`.
    pub fn new(child: R) -> Self {
        Self {
            child,
            initialized: false,
        }
    }

    /// Returns `true` if the child has been initialized and not yet released.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The deferred resource.
    pub fn child(&mut self) -> &mut R {
        &mut self.child
    }
}

impl<R: Resource> Resource for Lazy<R> {
    type Store<'a>
        = LazyStore<'a, R>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn store(&mut self) -> Self::Store<'_> {
        LazyStore::new(self)
    }

    fn deinit(&mut self) {
        if mem::take(&mut self.initialized) {
            self.child.deinit();
        }
    }
}

enum Phase<'a, R: Resource + 'a> {
    Pending(&'a mut Lazy<R>),
    Ready(R::Store<'a>),
    Taken,
}

/// The store of a [`Lazy`] resource.
pub struct LazyStore<'a, R: Resource + 'a> {
    phase: Phase<'a, R>,
}

impl<'a, R: Resource + 'a> LazyStore<'a, R> {
    fn new(lazy: &'a mut Lazy<R>) -> Self {
        let phase = if lazy.initialized {
            Phase::Ready(lazy.child.store())
        } else {
            Phase::Pending(lazy)
        };
        Self { phase }
    }

    fn ready(&mut self) -> Result<&mut R::Store<'a>, StoreError> {
        self.phase = match mem::replace(&mut self.phase, Phase::Taken) {
            Phase::Pending(lazy) => match lazy.child.init() {
                Ok(()) => {
                    debug!(resource = std::any::type_name::<R>(), "deferred resource acquired");
                    lazy.initialized = true;
                    Phase::Ready(lazy.child.store())
                }
                Err(error) => {
                    self.phase = Phase::Pending(lazy);
                    return Err(error);
                }
            },
            other => other,
        };
        match &mut self.phase {
            Phase::Ready(store) => Ok(store),
            _ => Err(StoreError::Unavailable { operation: "lazy" }),
        }
    }
}

impl<'a, R: Resource + 'a> Store for LazyStore<'a, R> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.ready()?.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        self.ready()?.write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        match self.ready() {
            Ok(store) => store.split(begin, end, block),
            Err(error) => {
                debug!(%error, "deferred resource unavailable, splitting a no-op store");
                block(&mut Noop)
            }
        }
    }
}

impl<'a, R: Resource + 'a> DynamicStore for LazyStore<'a, R>
where
    R::Store<'a>: DynamicStore,
{
    fn size(&mut self) -> Result<usize, StoreError> {
        self.ready()?.size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        self.ready()?.resize(new_size)
    }
}
