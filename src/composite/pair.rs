//! Two stores bound together as one.

use crate::{DynamicStore, Noop, SplitFn, Store, StoreError};

/// Two optional stores acting as one.
///
/// | Operation | Result |
/// |-----------|--------|
/// | `read` | `first`, or `second` if `first` read nothing |
/// | `write` | both sides, `min` of the two |
/// | `size` | `min` of both sizes |
/// | `resize` | both sides, `min` of the two |
/// | `split` | both sides over the same range, re-paired |
///
/// An absent side is skipped: it counts as writing everything, and as `n`
/// for `resize`. The pair borrows nothing; pass `&mut S` to keep ownership of
/// the stores.
///
/// # Partial writes
///
/// When the sides accept different amounts the pair reports the smaller one.
/// Callers retry only the remainder, which rewrites the same bytes on the side
/// that had already accepted them.
///
/// # Example
///
/// ```rust
/// use salt_stores::{MemoryStore, Pair, Store};
///
/// let mut small = [0u8; 2];
/// let mut large = [0u8; 8];
/// let mut pair = Pair::new(MemoryStore::new(&mut small), MemoryStore::new(&mut large));
/// assert_eq!(pair.write(b"abcd").unwrap(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Pair<A, B> {
    first: Option<A>,
    second: Option<B>,
}

impl<A, B> Pair<A, B> {
    /// Pair two present stores.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
        }
    }

    /// Pair stores that may be absent.
    pub fn from_options(first: Option<A>, second: Option<B>) -> Self {
        Self { first, second }
    }

    /// A pair with neither side.
    pub fn empty() -> Self {
        Self {
            first: None,
            second: None,
        }
    }

    /// The first store, if present.
    pub fn first(&mut self) -> Option<&mut A> {
        self.first.as_mut()
    }

    /// The second store, if present.
    pub fn second(&mut self) -> Option<&mut B> {
        self.second.as_mut()
    }

    /// Returns `true` if neither side is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// Split the pair back into its sides.
    pub fn into_parts(self) -> (Option<A>, Option<B>) {
        (self.first, self.second)
    }

    pub(crate) fn sides(&mut self) -> (&mut Option<A>, &mut Option<B>) {
        (&mut self.first, &mut self.second)
    }
}

impl<A: Store, B: Store> Store for Pair<A, B> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let first = match &mut self.first {
            Some(store) => store.read(buffer)?,
            None => 0,
        };
        if first != 0 {
            return Ok(first);
        }
        let second = match &mut self.second {
            Some(store) => store.read(buffer)?,
            None => 0,
        };
        Ok(first.max(second))
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        if self.is_empty() {
            return Ok(0);
        }
        let first = match &mut self.first {
            Some(store) => store.write(buffer)?,
            None => buffer.len(),
        };
        let second = match &mut self.second {
            Some(store) => store.write(buffer)?,
            None => buffer.len(),
        };
        Ok(first.min(second))
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        if self.is_empty() {
            return block(self);
        }
        match (&mut self.first, &mut self.second) {
            (Some(first), Some(second)) => first.split(begin, end, &mut |a| {
                second.split(begin, end, &mut |b| block(&mut Pair::new(&mut *a, b)))
            }),
            (Some(first), None) => first.split(begin, end, &mut |a| {
                block(&mut Pair::<_, Noop>::from_options(Some(a), None))
            }),
            (None, Some(second)) => second.split(begin, end, &mut |b| {
                block(&mut Pair::<Noop, _>::from_options(None, Some(b)))
            }),
            (None, None) => Ok(0),
        }
    }
}

impl<A: DynamicStore, B: DynamicStore> DynamicStore for Pair<A, B> {
    fn size(&mut self) -> Result<usize, StoreError> {
        let first = match &mut self.first {
            Some(store) => store.size()?,
            None => 0,
        };
        let second = match &mut self.second {
            Some(store) => store.size()?,
            None => first,
        };
        Ok(first.min(second))
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        if self.is_empty() {
            return Err(StoreError::Unavailable {
                operation: "resize",
            });
        }
        let first = match &mut self.first {
            Some(store) => store.resize(new_size)?,
            None => new_size,
        };
        let second = match &mut self.second {
            Some(store) => store.resize(new_size)?,
            None => new_size,
        };
        Ok(first.min(second))
    }
}
