//! Leaf stores that need no acquisition.
//!
//! | Store | Kind | Notes |
//! |-------|------|-------|
//! | [`MemoryStore`] | dynamic | borrowed slice; resize only shrinks |
//! | [`Pipe`] | static | FIFO stream; split is the identity |
//! | [`Noop`] | dynamic | every operation fails |
//!
//! Stores that own an allocation are produced by resources instead, see
//! [`HeapResource`](crate::HeapResource).

mod memory;
mod noop;
mod pipe;

pub use memory::MemoryStore;
pub use noop::Noop;
pub use pipe::Pipe;
