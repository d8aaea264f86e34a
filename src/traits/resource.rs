//! The resource contract: acquire, view, release.

use tracing::debug;

use crate::{SplitFn, Store, StoreError};

/// Something with an acquire/release lifecycle that yields a [`Store`].
///
/// Lifecycle: **uninitialized → initialized → deinitialized**.
///
/// - [`init`](Resource::init) acquires the underlying handle (file descriptor,
///   allocation, lock). On failure the resource stays uninitialized and must
///   not be deinitialized.
/// - [`store`](Resource::store) borrows the acquired handle as a store. It is
///   only meaningful between a successful `init` and `deinit`.
/// - [`deinit`](Resource::deinit) releases the handle. It runs exactly once
///   after every successful `init`, never otherwise.
///
/// Prefer [`use_resource`] or [`acquire`] over calling these by hand: both
/// guarantee the pairing above.
///
/// # Composites
///
/// Composite resources own their children and cascade the lifecycle in a
/// fixed order: children are initialized first-to-second and deinitialized in
/// reverse. A child that fails to initialize causes every already-initialized
/// sibling to be rolled back before the composite reports the failure.
pub trait Resource {
    /// The store view handed out while the resource is initialized.
    type Store<'a>: Store
    where
        Self: 'a;

    /// Acquire the underlying handle.
    ///
    /// # Errors
    ///
    /// The acquisition failed; the resource remains uninitialized.
    fn init(&mut self) -> Result<(), StoreError>;

    /// Borrow the initialized handle as a store.
    fn store(&mut self) -> Self::Store<'_>;

    /// Release the underlying handle.
    fn deinit(&mut self);
}

impl<R: Resource + ?Sized> Resource for &mut R {
    type Store<'a>
        = R::Store<'a>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        (**self).init()
    }

    fn store(&mut self) -> Self::Store<'_> {
        (**self).store()
    }

    fn deinit(&mut self) {
        (**self).deinit()
    }
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    type Store<'a>
        = R::Store<'a>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        (**self).init()
    }

    fn store(&mut self) -> Self::Store<'_> {
        (**self).store()
    }

    fn deinit(&mut self) {
        (**self).deinit()
    }
}

/// An initialized resource. Dropping the guard deinitializes it.
///
/// Created by [`acquire`]. The guard is itself a [`Store`] that forwards to
/// the resource's current store; call [`store`](Acquired::store) for the typed
/// view (for example to reach `size`/`resize` on dynamic stores).
pub struct Acquired<'r, R: Resource + ?Sized> {
    resource: &'r mut R,
}

impl<R: Resource + ?Sized> Acquired<'_, R> {
    /// Borrow the resource's store.
    pub fn store(&mut self) -> R::Store<'_> {
        self.resource.store()
    }
}

impl<R: Resource + ?Sized> Drop for Acquired<'_, R> {
    fn drop(&mut self) {
        debug!(resource = std::any::type_name::<R>(), "releasing resource");
        self.resource.deinit();
    }
}

impl<R: Resource + ?Sized> Store for Acquired<'_, R> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.resource.store().read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        self.resource.store().write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        self.resource.store().split(begin, end, block)
    }
}

/// Initialize `resource` and return a guard that deinitializes it on drop.
///
/// # Errors
///
/// The resource failed to initialize. Nothing is deinitialized in that case.
pub fn acquire<R: Resource + ?Sized>(resource: &mut R) -> Result<Acquired<'_, R>, StoreError> {
    resource.init()?;
    debug!(resource = std::any::type_name::<R>(), "resource acquired");
    Ok(Acquired { resource })
}

/// Run `block` against an initialized `resource`, then release it.
///
/// - If `init` fails, its error is returned and `block` never runs.
/// - Otherwise `block` runs and `deinit` is called exactly once afterwards,
///   whether `block` succeeded or not. The block's result is returned as-is.
///
/// This is the one automatic-cleanup guarantee of the crate.
///
/// # Example
///
/// ```rust
/// use salt_stores::{use_resource, DynamicStore, HeapResource, Store};
///
/// let mut heap = HeapResource::new(16);
/// let written = use_resource(&mut heap, |acquired| {
///     let mut store = acquired.store();
///     assert_eq!(store.size()?, 16);
///     store.write(b"hello")
/// })
/// .unwrap();
/// assert_eq!(written, 5);
/// ```
///
/// # Errors
///
/// The initialization error, or the error returned by `block`.
pub fn use_resource<R, T, F>(resource: &mut R, block: F) -> Result<T, StoreError>
where
    R: Resource + ?Sized,
    F: FnOnce(&mut Acquired<'_, R>) -> Result<T, StoreError>,
{
    let mut acquired = acquire(resource)?;
    block(&mut acquired)
}
