//! # Decorators
//!
//! Single-child wrappers that add one behaviour to a store.
//!
//! | Decorator | State | Behaviour |
//! |-----------|-------|-----------|
//! | [`LoggerStore`] | output store, [`LogMessages`](crate::LogMessages) | labelled outcome lines |
//! | [`MutexStore`] | `&parking_lot::Mutex<()>` | non-blocking exclusive access |
//! | [`RwLockStore`] | `&parking_lot::RwLock<()>` | non-blocking shared/exclusive access |
//! | [`ArrayStore`] | element size | element-indexed view |
//!
//! Each decorator has a matching [`Layer`](crate::Layer) so a stack can be
//! built fluently:
//!
//! ```rust
//! use parking_lot::Mutex;
//! use salt_stores::{ArrayLayer, LayerExt, MemoryStore, MutexLayer, Store};
//!
//! let lock = Mutex::new(());
//! let mut bytes = [0u8; 16];
//! let mut words = MemoryStore::new(&mut bytes)
//!     .layer(ArrayLayer::new(4).unwrap())
//!     .layer(MutexLayer::new(&lock));
//!
//! assert_eq!(words.write(&[1u8; 8]).unwrap(), 2);
//! ```

mod array;
mod logger;
mod mutex;
mod rwlock;

pub use array::ArrayStore;
pub use logger::LoggerStore;
pub(crate) use logger::log_outcome;
pub use mutex::MutexStore;
pub use rwlock::RwLockStore;
