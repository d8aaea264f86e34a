//! Chains of stores built from pairs.
//!
//! A list of `N` stores is the chain `Pair(s0, Pair(s1, ... Pair(sN-1, ∅)))`.
//! The chain is never materialized: each operation views the slice as
//! `Pair(head, rest)` on the fly, so building a list allocates nothing.
//!
//! ```text
//! PairList [s0, s1, s2]
//!   = Pair(s0, PairList [s1, s2])
//!   = Pair(s0, Pair(s1, PairList [s2]))
//!   = Pair(s0, Pair(s1, Pair(s2, ∅)))
//! ```

use crate::{DynamicStore, Fallback, Noop, Pair, SplitFn, SplitRange, Store, StoreError};

/// A non-empty slice of stores behaving as a chain of [`Pair`]s.
///
/// Writes reach every member; reads are served by the first member that
/// returns data.
///
/// # Example
///
/// ```rust
/// use salt_stores::{MemoryStore, PairList, Store};
///
/// let (mut a, mut b, mut c) = ([0u8; 4], [0u8; 4], [0u8; 2]);
/// let mut stores = [
///     MemoryStore::new(&mut a),
///     MemoryStore::new(&mut b),
///     MemoryStore::new(&mut c),
/// ];
/// let mut mirror = PairList::new(&mut stores).unwrap();
/// assert_eq!(mirror.write(b"abcd").unwrap(), 2);
/// assert_eq!(mirror.len(), 3);
/// ```
#[derive(Debug)]
pub struct PairList<'a, S> {
    members: &'a mut [S],
}

/// A non-empty slice of stores behaving as a chain of [`Fallback`]s.
///
/// Member `0` is the fastest tier. A read missing in tier `i` is satisfied
/// from tier `i + 1` and promoted into tier `i`. Writes reach member `0` only.
#[derive(Debug)]
pub struct FallbackList<'a, S> {
    members: &'a mut [S],
}

macro_rules! list_accessors {
    ($list:ident, $kind:literal) => {
        impl<'a, S> $list<'a, S> {
            /// Chain the stores in `members`, first to last.
            ///
            /// # Errors
            ///
            /// [`StoreError::EmptyList`] if `members` is empty.
            pub fn new(members: &'a mut [S]) -> Result<Self, StoreError> {
                if members.is_empty() {
                    return Err(StoreError::EmptyList { kind: $kind });
                }
                Ok(Self { members })
            }

            pub(crate) fn from_members(members: &'a mut [S]) -> Self {
                Self { members }
            }

            /// Number of members.
            #[inline]
            pub fn len(&self) -> usize {
                self.members.len()
            }

            /// Always `false`: lists cannot be empty.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.members.is_empty()
            }

            /// Member `index`, if it exists.
            pub fn get(&mut self, index: usize) -> Option<&mut S> {
                self.members.get_mut(index)
            }
        }
    };
}

list_accessors!(PairList, "pair");
list_accessors!(FallbackList, "fallback");

impl<S> PairList<'_, S> {
    fn as_pair(&mut self) -> Pair<&mut S, PairList<'_, S>> {
        match self.members.split_first_mut() {
            Some((head, [])) => Pair::from_options(Some(head), None),
            Some((head, rest)) => Pair::new(head, PairList { members: rest }),
            None => Pair::empty(),
        }
    }
}

impl<S: Store> PairList<'_, S> {
    /// Split member `i` over `ranges[i]` and pass the re-paired chain of
    /// sub-stores to `block`.
    ///
    /// Members past the end of `ranges` are passed through unsplit.
    ///
    /// # Errors
    ///
    /// The first member or continuation error.
    pub fn multisplit(&mut self, ranges: &[SplitRange], block: &mut SplitFn<'_>) -> Result<usize, StoreError> {
        chain(self.members, ranges, block, Kind::Pair)
    }
}

impl<S> FallbackList<'_, S> {
    fn as_fallback(&mut self) -> Fallback<&mut S, FallbackList<'_, S>> {
        match self.members.split_first_mut() {
            Some((head, [])) => Fallback::from_options(Some(head), None),
            Some((head, rest)) => Fallback::new(head, FallbackList { members: rest }),
            None => Fallback::from_options(None, None),
        }
    }
}

impl<S: Store> FallbackList<'_, S> {
    /// Split member `i` over `ranges[i]` and pass the re-assembled fallback
    /// chain of sub-stores to `block`.
    ///
    /// Members past the end of `ranges` are passed through unsplit.
    ///
    /// # Errors
    ///
    /// The first member or continuation error.
    pub fn multisplit(&mut self, ranges: &[SplitRange], block: &mut SplitFn<'_>) -> Result<usize, StoreError> {
        chain(self.members, ranges, block, Kind::Fallback)
    }

    /// Copy the first `amount` bytes of each tier into the next, starting
    /// with the fastest.
    ///
    /// # Errors
    ///
    /// The first tier that fails or stalls.
    pub fn flush(&mut self, amount: usize) -> Result<usize, StoreError> {
        let mut tiers = self.members.iter_mut();
        let Some(mut upper) = tiers.next() else {
            return Ok(0);
        };
        for lower in tiers {
            Fallback::new(&mut *upper, &mut *lower).flush(amount)?;
            upper = lower;
        }
        Ok(amount)
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Pair,
    Fallback,
}

fn chain<S: Store>(
    members: &mut [S],
    ranges: &[SplitRange],
    block: &mut SplitFn<'_>,
    kind: Kind,
) -> Result<usize, StoreError> {
    let Some((range, ranges)) = ranges.split_first() else {
        return match kind {
            Kind::Pair => block(&mut PairList { members }),
            Kind::Fallback => block(&mut FallbackList { members }),
        };
    };
    let Some((head, rest)) = members.split_first_mut() else {
        return block(&mut Noop);
    };
    head.split(range.begin, range.end, &mut |sub| {
        if rest.is_empty() {
            return match kind {
                Kind::Pair => block(&mut Pair::<_, Noop>::from_options(Some(sub), None)),
                Kind::Fallback => block(&mut Fallback::<_, Noop>::from_options(Some(sub), None)),
            };
        }
        chain(&mut *rest, ranges, &mut |tail| match kind {
            Kind::Pair => block(&mut Pair::new(&mut *sub, tail)),
            Kind::Fallback => block(&mut Fallback::new(&mut *sub, tail)),
        }, kind)
    })
}

impl<S: Store> Store for PairList<'_, S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.as_pair().read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        self.as_pair().write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        self.as_pair().split(begin, end, block)
    }
}

impl<S: DynamicStore> DynamicStore for PairList<'_, S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        self.as_pair().size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        self.as_pair().resize(new_size)
    }
}

impl<S: Store> Store for FallbackList<'_, S> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.as_fallback().read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        self.as_fallback().write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        self.as_fallback().split(begin, end, block)
    }
}

impl<S: DynamicStore> DynamicStore for FallbackList<'_, S> {
    fn size(&mut self) -> Result<usize, StoreError> {
        self.as_fallback().size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        self.as_fallback().resize(new_size)
    }
}
