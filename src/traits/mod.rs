//! # Store and Resource Traits
//!
//! The capability contracts every backend and combinator implements.
//!
//! ## Trait Layers
//!
//! ```text
//! Layer 1 (Static):   Store          read + write + split
//!                       ↓
//! Layer 2 (Dynamic):  DynamicStore   + size + resize
//!
//! Lifecycle:          Resource       init → store → deinit
//! ```
//!
//! ## Quick Reference
//!
//! | Trait | Methods | Implemented by |
//! |-------|---------|----------------|
//! | [`Store`] | `read`, `write`, `split` | every store and combinator |
//! | [`DynamicStore`] | + `size`, `resize` | stores with a coherent size |
//! | [`Resource`] | `init`, `store`, `deinit` | anything that must be acquired |
//!
//! ## Why Two Store Traits?
//!
//! `size` and `resize` are not meaningful on every composite: a stream has no
//! size, and resizing a store that was reached through a split would resize
//! the whole backend rather than the sub-range. Keeping them on a separate
//! trait makes that mistake a compile error. A static store can still be
//! handed to code that wants a dynamic one through [`Sizeless`].
//!
//! ## Split Protocol
//!
//! [`Store::split`] is continuation-passing. Instead of returning a narrowed
//! store (which would need an allocation or unsafe aliasing), the store builds
//! the narrowed view on its own stack and calls the continuation with it:
//!
//! ```rust
//! use salt_stores::{MemoryStore, Store};
//!
//! let mut bytes = *b"hello world";
//! let mut store = MemoryStore::new(&mut bytes);
//!
//! let mut word = [0u8; 5];
//! let read = store
//!     .split(6, 11, &mut |sub| sub.read(&mut word))
//!     .unwrap();
//! assert_eq!(read, 5);
//! assert_eq!(&word, b"world");
//! ```
//!
//! ## Object Safety
//!
//! [`Store`] and [`DynamicStore`] are object-safe. [`Resource`] is not (its
//! store type is generic over a lifetime); composites take resources as type
//! parameters instead.

mod dynamic_store;
mod resource;
mod store;

pub use dynamic_store::{DynamicStore, Sizeless};
pub use resource::{Acquired, Resource, acquire, use_resource};
pub use store::{SplitFn, Store};
