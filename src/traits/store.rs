//! The static store contract: read, write and split.

use crate::{Noop, StoreError};

/// Continuation invoked by [`Store::split`] with the narrowed sub-store.
///
/// The sub-store is only valid for the duration of the call. Its return value
/// becomes the return value of `split`.
pub type SplitFn<'k> = dyn FnMut(&mut dyn Store) -> Result<usize, StoreError> + 'k;

/// Anything bytes can be read from or written to.
///
/// A store addresses its own range from offset zero: `read` and `write` always
/// start at the beginning of the store. To work on a sub-range, [`split`](Store::split)
/// the store and operate on the narrowed store handed to the continuation.
///
/// # Non-blocking
///
/// Implementations never sleep. `Ok(0)` means "nothing could be moved right
/// now", not end-of-file; callers tell the two apart from context (for
/// example by comparing against a known total with [`Progress`](crate::Progress)).
///
/// # Object Safety
///
/// This trait is object-safe and is used as `&mut dyn Store` throughout the
/// split protocol.
pub trait Store {
    /// Read up to `buffer.len()` bytes from the start of the store.
    ///
    /// Returns the number of bytes read, never more than requested.
    ///
    /// # Errors
    ///
    /// Any backend failure. Buffer contents are undefined after an error.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError>;

    /// Write up to `buffer.len()` bytes to the start of the store.
    ///
    /// Returns the number of bytes written, never more than requested.
    ///
    /// # Errors
    ///
    /// Any backend failure.
    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError>;

    /// Narrow the store to the half-open byte range `[begin, end)` and pass the
    /// result to `block`.
    ///
    /// No allocation takes place: the sub-store lives on the callee's stack and
    /// must not be retained once `block` returns.
    ///
    /// # Errors
    ///
    /// Returns the error of the continuation, or any error the store hits
    /// while constructing the sub-store.
    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError>;
}

impl<S: Store + ?Sized> Store for &mut S {
    #[inline]
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        (**self).read(buffer)
    }

    #[inline]
    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        (**self).write(buffer)
    }

    #[inline]
    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        (**self).split(begin, end, block)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    #[inline]
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        (**self).read(buffer)
    }

    #[inline]
    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        (**self).write(buffer)
    }

    #[inline]
    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        (**self).split(begin, end, block)
    }
}

/// A missing store behaves like [`Noop`].
impl<S: Store> Store for Option<S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        match self {
            Some(store) => store.read(buffer),
            None => Noop.read(buffer),
        }
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        match self {
            Some(store) => store.write(buffer),
            None => Noop.write(buffer),
        }
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        match self {
            Some(store) => store.split(begin, end, block),
            None => Noop.split(begin, end, block),
        }
    }
}
