//! Two resources acquired as one.

use tracing::warn;

use crate::{Fallback, Pair, Resource, StoreError};

/// Initializes `first` then `second`; deinitializes in reverse.
///
/// If `second` fails to initialize, `first` is deinitialized before the
/// error is returned, so a failed `init` leaves nothing acquired.
///
/// The store is a [`Pair`] of both children's stores.
#[derive(Debug, Default)]
pub struct PairResource<A, B> {
    first: A,
    second: B,
}

impl<A: Resource, B: Resource> PairResource<A, B> {
    /// Bind two resources.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The first resource.
    pub fn first(&mut self) -> &mut A {
        &mut self.first
    }

    /// The second resource.
    pub fn second(&mut self) -> &mut B {
        &mut self.second
    }

    /// Take the children back.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

pub(crate) fn init_both<A, B>(first: &mut A, second: &mut B) -> Result<(), StoreError>
where
    A: Resource + ?Sized,
    B: Resource + ?Sized,
{
    first.init()?;
    if let Err(error) = second.init() {
        warn!(%error, "second resource failed to initialize, releasing first");
        first.deinit();
        return Err(error);
    }
    Ok(())
}

impl<A: Resource, B: Resource> Resource for PairResource<A, B> {
    type Store<'a>
        = Pair<A::Store<'a>, B::Store<'a>>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        init_both(&mut self.first, &mut self.second)
    }

    fn store(&mut self) -> Self::Store<'_> {
        Pair::new(self.first.store(), self.second.store())
    }

    fn deinit(&mut self) {
        self.second.deinit();
        self.first.deinit();
    }
}

/// [`PairResource`] discipline with a [`Fallback`] store: `primary` caches
/// `secondary`.
#[derive(Debug, Default)]
pub struct FallbackResource<A, B> {
    primary: A,
    secondary: B,
}

impl<A: Resource, B: Resource> FallbackResource<A, B> {
    /// Put `primary` in front of `secondary`.
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    /// The primary (cache) resource.
    pub fn primary(&mut self) -> &mut A {
        &mut self.primary
    }

    /// The secondary (backing) resource.
    pub fn secondary(&mut self) -> &mut B {
        &mut self.secondary
    }
}

impl<A: Resource, B: Resource> Resource for FallbackResource<A, B> {
    type Store<'a>
        = Fallback<A::Store<'a>, B::Store<'a>>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        init_both(&mut self.primary, &mut self.secondary)
    }

    fn store(&mut self) -> Self::Store<'_> {
        Fallback::new(self.primary.store(), self.secondary.store())
    }

    fn deinit(&mut self) {
        self.secondary.deinit();
        self.primary.deinit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DynamicStore, HeapResource, Store, use_resource};

    #[test]
    fn pair_store_spans_both_children() {
        let mut both = PairResource::new(HeapResource::new(4), HeapResource::new(8));
        let written = use_resource(&mut both, |acquired| {
            let mut store = acquired.store();
            assert_eq!(store.size()?, 4);
            store.write(b"abcdef")
        })
        .unwrap();
        assert_eq!(written, 4);
    }

    #[test]
    fn second_failure_leaves_nothing_acquired() {
        let mut both = PairResource::new(HeapResource::new(4), HeapResource::new(usize::MAX));
        assert!(both.init().is_err());
        assert!(both.first().store().as_bytes().is_empty());
    }

    #[test]
    fn fallback_store_promotes() {
        let mut tiers = FallbackResource::new(HeapResource::new(8), HeapResource::new(8));
        use_resource(&mut tiers, |acquired| {
            let mut store = acquired.store();
            if let Some(backing) = store.secondary() {
                backing.write(b"cold")?;
            }
            let mut out = [0u8; 4];
            assert_eq!(store.read(&mut out)?, 4);
            assert_eq!(store.primary().map(|cache| cache.written()), Some(4));
            Ok(())
        })
        .unwrap();
    }
}
