//! # salt-stores
//!
//! Composable, allocation-free, non-blocking byte stores and resources.
//!
//! A **store** is anything bytes can be read from or written to: a slice, a
//! heap buffer, a stream. A **resource** is anything with an acquire/release
//! lifecycle that yields a store. This crate defines both contracts and a set
//! of combinators (pairs, tiered caches, locks, logging, array views) that
//! work the same over any backend implementing them.
//!
//! ---
//!
//! ## Quick Start
//!
//! A two-tier cache over heap buffers, acquired and released as one:
//!
//! ```rust
//! use salt_stores::{use_resource, FallbackResource, HeapResource, Store};
//!
//! let mut tiers = FallbackResource::new(HeapResource::new(64), HeapResource::new(4096));
//!
//! use_resource(&mut tiers, |acquired| {
//!     let mut cache = acquired.store();
//!     cache.write(b"hot data")?;   // lands in the primary only
//!     cache.flush(8)?;             // now in the backing store too
//!     Ok(())
//! })
//! .unwrap();
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Store`] | read, write, split |
//! | [`DynamicStore`] | adds size and resize |
//! | [`Resource`] | init, store, deinit |
//! | [`use_resource`] / [`acquire`] | scoped acquisition with guaranteed release |
//! | [`transfer`] / [`Progress`] | resumable copy between stores |
//! | [`Pair`], [`Fallback`], [`PairList`], [`FallbackList`] | composites |
//! | [`LoggerStore`], [`MutexStore`], [`RwLockStore`], [`ArrayStore`] | decorators |
//! | [`StoreError`] | error type with context |
//!
//! ---
//!
//! ## Non-blocking Contract
//!
//! No operation sleeps. A store that cannot move bytes right now returns
//! `Ok(0)`; lock decorators refuse contended locks with
//! [`StoreError::WouldBlock`]. Drive long copies with [`transfer`], calling
//! it again until the [`Progress`] is complete.
//!
//! ---
//!
//! ## Sub-ranges Without Allocation
//!
//! [`Store::split`] narrows a store to `[begin, end)` by building the narrowed
//! view on the stack and handing it to a continuation. Composites split each
//! child and re-assemble the pieces, so a split of a `Fallback` of two
//! buffers is again a `Fallback`, over the two sub-buffers.
//!
//! ---
//!
//! ## Diagnostics
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (acquisition,
//! release, rollback, transfer chunks) and never installs a subscriber.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`LogMessages`], [`Operation`], [`Outcome`], [`SplitRange`]; JSON helpers on stores |

// Private modules
mod composite;
mod decorator;
mod error;
mod ext;
mod layer;
mod progress;
mod resources;
mod stores;
mod traits;
mod types;

// Public re-exports - error types
pub use error::StoreError;

// Public re-exports - core types
pub use types::{LogMessage, LogMessages, Operation, Outcome, PAGE_SIZE, SplitRange};

// Public re-exports - contracts
pub use traits::{Acquired, DynamicStore, Resource, Sizeless, SplitFn, Store, acquire, use_resource};

// Public re-exports - transfer
pub use progress::{Progress, transfer, transfer_all};

// Public re-exports - stores
pub use stores::{MemoryStore, Noop, Pipe};

// Public re-exports - composites
pub use composite::{Fallback, FallbackList, Pair, PairList};

// Public re-exports - decorators
pub use decorator::{ArrayStore, LoggerStore, MutexStore, RwLockStore};

// Public re-exports - resources
pub use resources::{
    FallbackListResource, FallbackResource, First, FormatResource, HeapResource, HeapStore, Lazy,
    LazyStore, LoggerResource, Member, MutexResource, PairListResource, PairResource,
};

// Public re-exports - infrastructure
pub use ext::StoreExt;
pub use layer::{ArrayLayer, Layer, LayerExt, LoggerLayer, MutexLayer, RwLockLayer};

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::StoreExtJson;
