//! # Composite Stores
//!
//! Stores built out of other stores.
//!
//! | Type | Children | Read | Write |
//! |------|----------|------|-------|
//! | [`Pair`] | 2 | first, then second on a zero read | both, `min` |
//! | [`Fallback`] | 2 | primary, top-up from secondary | primary only |
//! | [`PairList`] | N | first member with data | all members |
//! | [`FallbackList`] | N | fastest tier, promoting misses | fastest tier |
//!
//! Composites never own their children's lifecycles. To build a composite
//! from things that must be acquired, use the matching resource
//! ([`PairResource`](crate::PairResource), [`FallbackResource`](crate::FallbackResource),
//! [`PairListResource`](crate::PairListResource), [`FallbackListResource`](crate::FallbackListResource)).

mod fallback;
mod list;
mod pair;

pub use fallback::Fallback;
pub use list::{FallbackList, PairList};
pub use pair::Pair;
