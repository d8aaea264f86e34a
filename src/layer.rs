//! # Layer Trait
//!
//! Tower-style composition for store decorators.
//!
//! ## How It Works
//!
//! ```text
//! Store ──▶ Layer::layer() ──▶ Decorated Store
//! ```
//!
//! A layer carries a decorator's configuration (a lock, an element size, a
//! log table) separately from the store it will wrap, so a decorator stack
//! can be described once and applied to whichever store turns up:
//!
//! ```rust
//! use parking_lot::RwLock;
//! use salt_stores::{Layer, MemoryStore, RwLockLayer, Store};
//!
//! let lock = RwLock::new(());
//! let layer = RwLockLayer::new(&lock);
//!
//! let mut bytes = [0u8; 4];
//! let mut shared = layer.layer(MemoryStore::new(&mut bytes));
//! assert_eq!(shared.write(b"ab").unwrap(), 2);
//! ```
//!
//! ## Fluent Composition
//!
//! [`LayerExt`] puts `.layer()` on every store:
//!
//! ```rust
//! use parking_lot::Mutex;
//! use salt_stores::{ArrayLayer, LayerExt, MemoryStore, MutexLayer};
//!
//! let lock = Mutex::new(());
//! let mut bytes = [0u8; 64];
//! let _stack = MemoryStore::new(&mut bytes)
//!     .layer(ArrayLayer::new(8).unwrap())
//!     .layer(MutexLayer::new(&lock));
//! ```

use parking_lot::{Mutex, RwLock};

use crate::{ArrayStore, LogMessages, LoggerStore, MutexStore, RwLockStore, Store, StoreError};

/// A layer that wraps a store in a decorator.
///
/// # Type Parameters
///
/// - `S`: the store being wrapped
///
/// `layer(self, store)` consumes both; the decorated store implements
/// [`Store`] (and [`DynamicStore`](crate::DynamicStore) when `S` does).
pub trait Layer<S> {
    /// The decorated store.
    type Decorated;

    /// Wrap `store`.
    fn layer(self, store: S) -> Self::Decorated;
}

/// Fluent `.layer()` on any [`Store`].
pub trait LayerExt: Store + Sized {
    /// Apply `layer` to this store.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Decorated {
        layer.layer(self)
    }
}

impl<S: Store> LayerExt for S {}

/// Builds [`LoggerStore`]s.
#[derive(Debug)]
pub struct LoggerLayer<'o, O: ?Sized> {
    output: &'o mut O,
    messages: &'o LogMessages,
}

impl<'o, O: Store + ?Sized> LoggerLayer<'o, O> {
    /// Log into `output` with the labels in `messages`.
    pub fn new(output: &'o mut O, messages: &'o LogMessages) -> Self {
        Self { output, messages }
    }
}

impl<'o, S: Store, O: Store + ?Sized> Layer<S> for LoggerLayer<'o, O> {
    type Decorated = LoggerStore<'o, S, O>;

    fn layer(self, store: S) -> Self::Decorated {
        LoggerStore::new(store, self.output, self.messages)
    }
}

/// Builds [`MutexStore`]s sharing one lock.
#[derive(Debug, Clone, Copy)]
pub struct MutexLayer<'l> {
    lock: &'l Mutex<()>,
}

impl<'l> MutexLayer<'l> {
    /// Guard with `lock`.
    pub fn new(lock: &'l Mutex<()>) -> Self {
        Self { lock }
    }
}

impl<'l, S: Store> Layer<S> for MutexLayer<'l> {
    type Decorated = MutexStore<'l, S>;

    fn layer(self, store: S) -> Self::Decorated {
        MutexStore::new(store, self.lock)
    }
}

/// Builds [`RwLockStore`]s sharing one lock.
#[derive(Debug, Clone, Copy)]
pub struct RwLockLayer<'l> {
    lock: &'l RwLock<()>,
}

impl<'l> RwLockLayer<'l> {
    /// Guard with `lock`.
    pub fn new(lock: &'l RwLock<()>) -> Self {
        Self { lock }
    }
}

impl<'l, S: Store> Layer<S> for RwLockLayer<'l> {
    type Decorated = RwLockStore<'l, S>;

    fn layer(self, store: S) -> Self::Decorated {
        RwLockStore::new(store, self.lock)
    }
}

/// Builds [`ArrayStore`]s with a fixed element size.
#[derive(Debug, Clone, Copy)]
pub struct ArrayLayer {
    element_size: usize,
}

impl ArrayLayer {
    /// View stores as `element_size`-byte elements.
    ///
    /// # Errors
    ///
    /// [`StoreError::ZeroElementSize`] if `element_size` is zero.
    pub fn new(element_size: usize) -> Result<Self, StoreError> {
        if element_size == 0 {
            return Err(StoreError::ZeroElementSize);
        }
        Ok(Self { element_size })
    }
}

impl<S: Store> Layer<S> for ArrayLayer {
    type Decorated = ArrayStore<S>;

    fn layer(self, store: S) -> Self::Decorated {
        ArrayStore::from_layer(store, self.element_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DynamicStore, LogMessages, MemoryStore, Operation, Outcome, Pipe};

    #[test]
    fn layer_ext_is_auto_implemented() {
        fn _check<S: Store + LayerExt>() {}
        _check::<Pipe>();
    }

    #[test]
    fn zero_element_layer_is_rejected() {
        assert!(ArrayLayer::new(0).is_err());
    }

    #[test]
    fn layers_stack_outside_in() {
        let lock = Mutex::new(());
        let messages = LogMessages::new().on(Operation::Resize, Outcome::Success, "resized");
        let mut log = Pipe::new();
        let mut bytes = [0u8; 32];

        let mut stack = MemoryStore::new(&mut bytes)
            .layer(ArrayLayer::new(4).unwrap())
            .layer(LoggerLayer::new(&mut log, &messages))
            .layer(MutexLayer::new(&lock));

        assert_eq!(stack.size().unwrap(), 8);
        assert_eq!(stack.resize(2).unwrap(), 2);
        drop(stack);
        assert_eq!(log.take(), b"resized: resize(2) -> 2\n");
    }
}
