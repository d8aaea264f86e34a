//! First-success selection among candidate resources.

use tracing::debug;

use crate::{Resource, StoreError};

/// Tries candidates in order and keeps the first that initializes.
///
/// Useful for "whichever of these works" setups: a list of addresses to
/// connect to, a list of paths to open. Only the chosen candidate is ever
/// deinitialized.
///
/// The store is `Option<R::Store>`: `None` (behaving as [`Noop`](crate::Noop))
/// if the store is requested while nothing is chosen.
///
/// # Example
///
/// ```rust
/// use salt_stores::{First, HeapResource, Resource};
///
/// let mut any = First::new(vec![HeapResource::new(usize::MAX), HeapResource::new(16)]);
/// any.init().unwrap();
/// assert_eq!(any.chosen(), Some(1));
/// any.deinit();
/// ```
#[derive(Debug, Default)]
pub struct First<R> {
    candidates: Vec<R>,
    chosen: Option<usize>,
}

impl<R: Resource> First<R> {
    /// Select among `candidates`, in order.
    pub fn new(candidates: Vec<R>) -> Self {
        Self {
            candidates,
            chosen: None,
        }
    }

    /// Index of the candidate that initialized, if any.
    #[inline]
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Candidate `index`.
    pub fn candidate(&mut self, index: usize) -> Option<&mut R> {
        self.candidates.get_mut(index)
    }
}

impl<R: Resource> Resource for First<R> {
    type Store<'a>
        = Option<R::Store<'a>>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        for (index, candidate) in self.candidates.iter_mut().enumerate() {
            match candidate.init() {
                Ok(()) => {
                    debug!(index, "candidate acquired");
                    self.chosen = Some(index);
                    return Ok(());
                }
                Err(error) => debug!(index, %error, "candidate failed"),
            }
        }
        Err(StoreError::NoCandidate {
            attempts: self.candidates.len(),
        })
    }

    fn store(&mut self) -> Self::Store<'_> {
        let index = self.chosen?;
        self.candidates.get_mut(index).map(|candidate| candidate.store())
    }

    fn deinit(&mut self) {
        if let Some(candidate) = self.chosen.take().and_then(|i| self.candidates.get_mut(i)) {
            candidate.deinit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeapResource, Store};

    #[test]
    fn all_failing_reports_attempts() {
        let mut none = First::new(vec![HeapResource::new(usize::MAX), HeapResource::new(usize::MAX)]);
        assert!(matches!(
            none.init(),
            Err(StoreError::NoCandidate { attempts: 2 })
        ));
        assert!(none.store().is_none());
    }

    #[test]
    fn empty_candidate_list_fails() {
        let mut none: First<HeapResource> = First::new(Vec::new());
        assert!(none.init().is_err());
    }

    #[test]
    fn only_chosen_is_released() {
        let mut any = First::new(vec![HeapResource::new(4), HeapResource::new(8)]);
        any.init().unwrap();
        assert_eq!(any.chosen(), Some(0));
        assert_eq!(any.store().write(b"abcdef").unwrap(), 4);
        any.deinit();
        assert_eq!(any.chosen(), None);
    }
}
