//! Lists of resources acquired as one.

use tracing::warn;

use crate::{FallbackList, PairList, Resource, SplitFn, Store, StoreError};

/// One resource in a resource list, usable as a [`Store`] while initialized.
///
/// Each operation borrows the resource's current store and forwards to it.
#[derive(Debug, Default)]
pub struct Member<R> {
    resource: R,
}

impl<R: Resource> Member<R> {
    /// The wrapped resource.
    pub fn resource(&mut self) -> &mut R {
        &mut self.resource
    }
}

impl<R: Resource> Store for Member<R> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.resource.store().read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        self.resource.store().write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        self.resource.store().split(begin, end, block)
    }
}

fn members<R>(resources: Vec<R>, kind: &'static str) -> Result<Vec<Member<R>>, StoreError> {
    if resources.is_empty() {
        return Err(StoreError::EmptyList { kind });
    }
    Ok(resources
        .into_iter()
        .map(|resource| Member { resource })
        .collect())
}

/// Initialize every member in order. A failure at `i` releases `0..i` in
/// reverse and leaves `i+1..` untouched.
fn init_all<R: Resource>(members: &mut [Member<R>]) -> Result<(), StoreError> {
    for index in 0..members.len() {
        if let Err(error) = members[index].resource.init() {
            warn!(index, %error, "list member failed to initialize, rolling back");
            for member in members[..index].iter_mut().rev() {
                member.resource.deinit();
            }
            return Err(error);
        }
    }
    Ok(())
}

fn deinit_all<R: Resource>(members: &mut [Member<R>]) {
    for member in members.iter_mut().rev() {
        member.resource.deinit();
    }
}

/// N resources whose stores form a [`PairList`].
///
/// # Example
///
/// ```rust
/// use salt_stores::{use_resource, HeapResource, PairListResource, Store};
///
/// let mut mirrors = PairListResource::new(vec![
///     HeapResource::new(4),
///     HeapResource::new(4),
///     HeapResource::new(4),
/// ])
/// .unwrap();
///
/// let written = use_resource(&mut mirrors, |acquired| acquired.write(b"data")).unwrap();
/// assert_eq!(written, 4);
/// ```
#[derive(Debug)]
pub struct PairListResource<R> {
    members: Vec<Member<R>>,
}

impl<R: Resource> PairListResource<R> {
    /// Chain `resources`, first to last.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyList`] if `resources` is empty.
    pub fn new(resources: Vec<R>) -> Result<Self, StoreError> {
        Ok(Self {
            members: members(resources, "pair")?,
        })
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

    /// Member resource `index`.
    pub fn get(&mut self, index: usize) -> Option<&mut R> {
        self.members.get_mut(index).map(Member::resource)
    }
}

impl<R: Resource> Resource for PairListResource<R> {
    type Store<'a>
        = PairList<'a, Member<R>>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        init_all(&mut self.members)
    }

    fn store(&mut self) -> Self::Store<'_> {
        PairList::from_members(&mut self.members)
    }

    fn deinit(&mut self) {
        deinit_all(&mut self.members);
    }
}

/// N resources whose stores form a [`FallbackList`], fastest tier first.
#[derive(Debug)]
pub struct FallbackListResource<R> {
    members: Vec<Member<R>>,
}

impl<R: Resource> FallbackListResource<R> {
    /// Chain `resources`, fastest tier first.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyList`] if `resources` is empty.
    pub fn new(resources: Vec<R>) -> Result<Self, StoreError> {
        Ok(Self {
            members: members(resources, "fallback")?,
        })
    }

    /// Number of tiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: lists cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Tier resource `index`.
    pub fn get(&mut self, index: usize) -> Option<&mut R> {
        self.members.get_mut(index).map(Member::resource)
    }
}

impl<R: Resource> Resource for FallbackListResource<R> {
    type Store<'a>
        = FallbackList<'a, Member<R>>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        init_all(&mut self.members)
    }

    fn store(&mut self) -> Self::Store<'_> {
        FallbackList::from_members(&mut self.members)
    }

    fn deinit(&mut self) {
        deinit_all(&mut self.members);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeapResource, use_resource};

    #[test]
    fn empty_resource_list_is_rejected() {
        assert!(matches!(
            PairListResource::<HeapResource>::new(Vec::new()),
            Err(StoreError::EmptyList { kind: "pair" })
        ));
    }

    #[test]
    fn middle_failure_rolls_back_prefix_only() {
        let mut list = PairListResource::new(vec![
            HeapResource::new(4),
            HeapResource::new(usize::MAX),
            HeapResource::new(4),
        ])
        .unwrap();
        assert!(list.init().is_err());
        for index in 0..3 {
            let member = list.get(index).unwrap();
            assert!(member.store().as_bytes().is_empty());
        }
    }

    #[test]
    fn fallback_list_reads_through_tiers() {
        let mut tiers =
            FallbackListResource::new(vec![HeapResource::new(4), HeapResource::new(8)]).unwrap();
        use_resource(&mut tiers, |acquired| {
            let mut store = acquired.store();
            if let Some(cold) = store.get(1) {
                cold.write(b"warmdata")?;
            }
            let mut out = [0u8; 6];
            assert_eq!(store.read(&mut out)?, 6);
            assert_eq!(&out, b"warmda");
            Ok(())
        })
        .unwrap();
    }
}
