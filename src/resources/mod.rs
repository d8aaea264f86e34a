//! # Resources
//!
//! Concrete and composite [`Resource`](crate::Resource) implementations.
//!
//! ## Lifecycle Cascades
//!
//! ```text
//! PairResource(A, B)      init:   A ──▶ B          (B fails ⇒ deinit A)
//!                         deinit: B ──▶ A
//!
//! PairListResource[0..N]  init:   0 ──▶ 1 ──▶ … ──▶ N-1
//!                                 (i fails ⇒ deinit i-1 … 0, never touch i+1 …)
//!                         deinit: N-1 ──▶ … ──▶ 0
//!
//! First[0..N]             init:   0, 1, … until one succeeds
//!                         deinit: the chosen one only
//!
//! Lazy(R)                 init:   nothing; R initializes on first store use
//!                         deinit: R, if it was initialized
//! ```
//!
//! | Resource | Store |
//! |----------|-------|
//! | [`HeapResource`] | [`HeapStore`] |
//! | [`FormatResource`] | [`HeapStore`] |
//! | [`PairResource`] | [`Pair`](crate::Pair) |
//! | [`FallbackResource`] | [`Fallback`](crate::Fallback) |
//! | [`First`] | `Option<R::Store>` |
//! | [`Lazy`] | [`LazyStore`] |
//! | [`PairListResource`] | [`PairList`](crate::PairList) of [`Member`]s |
//! | [`FallbackListResource`] | [`FallbackList`](crate::FallbackList) of [`Member`]s |
//! | [`MutexResource`] | [`MutexStore`](crate::MutexStore) |
//! | [`LoggerResource`] | [`LoggerStore`](crate::LoggerStore) |

mod first;
mod format;
mod heap;
mod lazy;
mod list;
mod logger;
mod mutex;
mod pair;

pub use first::First;
pub use format::FormatResource;
pub use heap::{HeapResource, HeapStore};
pub use lazy::{Lazy, LazyStore};
pub use list::{FallbackListResource, Member, PairListResource};
pub use logger::LoggerResource;
pub use mutex::MutexResource;
pub use pair::{FallbackResource, PairResource};
