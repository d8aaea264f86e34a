//! Tiered cache: a primary store in front of a backing store.

use crate::{DynamicStore, Noop, Pair, Progress, SplitFn, Store, StoreError, transfer, transfer_all};

/// A [`Pair`] used asymmetrically: `primary` caches `secondary`.
///
/// - **read**: from the primary; whatever it could not supply is read from the
///   secondary at the same offset and written back into the primary.
/// - **write**: to the primary only. Nothing reaches the secondary until
///   [`flush`](Fallback::flush).
/// - **size/resize/split**: as [`Pair`], with splits re-wrapped as `Fallback`.
///
/// # Example
///
/// ```rust
/// use salt_stores::{Fallback, MemoryStore, Store};
///
/// let mut cache = [0u8; 8];
/// let mut disk = *b"persist!";
/// let mut tiered = Fallback::new(MemoryStore::new(&mut cache), MemoryStore::new(&mut disk));
///
/// tiered.write(b"PER").unwrap();
/// tiered.flush(3).unwrap();
/// drop(tiered);
/// assert_eq!(&disk, b"PERsist!");
/// ```
#[derive(Debug, Default)]
pub struct Fallback<A, B> {
    pair: Pair<A, B>,
}

impl<A, B> Fallback<A, B> {
    /// Put `primary` in front of `secondary`.
    pub fn new(primary: A, secondary: B) -> Self {
        Self {
            pair: Pair::new(primary, secondary),
        }
    }

    /// Build from stores that may be absent.
    pub fn from_options(primary: Option<A>, secondary: Option<B>) -> Self {
        Self {
            pair: Pair::from_options(primary, secondary),
        }
    }

    /// Reinterpret a pair: its first side becomes the primary.
    pub fn from_pair(pair: Pair<A, B>) -> Self {
        Self { pair }
    }

    /// The primary (cache) store.
    pub fn primary(&mut self) -> Option<&mut A> {
        self.pair.first()
    }

    /// The secondary (backing) store.
    pub fn secondary(&mut self) -> Option<&mut B> {
        self.pair.second()
    }

    /// Give back the underlying pair.
    pub fn into_pair(self) -> Pair<A, B> {
        self.pair
    }
}

impl<A: Store, B: Store> Fallback<A, B> {
    /// Copy the first `amount` bytes of the primary into the secondary,
    /// driving the transfer to completion.
    ///
    /// # Errors
    ///
    /// Either side failing, or [`StoreError::Stalled`] if a step moves nothing.
    pub fn flush(&mut self, amount: usize) -> Result<usize, StoreError> {
        let mut progress = Progress::new(amount);
        let (primary, secondary) = self.pair.sides();
        transfer_all(&mut progress, primary, secondary)
    }

    /// Move the next chunk of a flush without looping.
    ///
    /// # Errors
    ///
    /// Either side failing.
    pub fn flush_step(&mut self, progress: &mut Progress) -> Result<usize, StoreError> {
        let (primary, secondary) = self.pair.sides();
        transfer(progress, primary, secondary)
    }
}

impl<A: Store, B: Store> Store for Fallback<A, B> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let wanted = buffer.len();
        let (primary, secondary) = self.pair.sides();
        let cached = match primary {
            Some(store) => store.read(buffer)?,
            None => 0,
        };
        if cached == wanted {
            return Ok(cached);
        }
        let Some(secondary) = secondary else {
            return Ok(cached);
        };

        let rest = &mut buffer[cached..];
        let fetched = secondary.split(cached, wanted, &mut |sub| sub.read(&mut *rest))?;
        if fetched > 0 {
            if let Some(primary) = primary {
                let fill = &rest[..fetched];
                primary.split(cached, cached + fetched, &mut |sub| sub.write(fill))?;
            }
        }
        Ok(cached + fetched)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let (primary, _) = self.pair.sides();
        primary.write(buffer)
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        if self.pair.is_empty() {
            return block(self);
        }
        match self.pair.sides() {
            (Some(primary), Some(secondary)) => primary.split(begin, end, &mut |a| {
                secondary.split(begin, end, &mut |b| block(&mut Fallback::new(&mut *a, b)))
            }),
            (Some(primary), None) => primary.split(begin, end, &mut |a| {
                block(&mut Fallback::<_, Noop>::from_options(Some(a), None))
            }),
            (None, Some(secondary)) => secondary.split(begin, end, &mut |b| {
                block(&mut Fallback::<Noop, _>::from_options(None, Some(b)))
            }),
            (None, None) => Ok(0),
        }
    }
}

impl<A: DynamicStore, B: DynamicStore> DynamicStore for Fallback<A, B> {
    fn size(&mut self) -> Result<usize, StoreError> {
        self.pair.size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        self.pair.resize(new_size)
    }
}
