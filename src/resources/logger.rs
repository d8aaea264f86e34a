//! Logging around a resource's lifecycle and store.

use crate::decorator::log_outcome;
use crate::{LogMessages, LoggerStore, Operation, Outcome, Resource, Store, StoreError};

/// Logs the child's `init` under [`Operation::Init`] and yields a
/// [`LoggerStore`] over the child's store, writing to the same output.
///
/// A failed `init` is logged as [`Outcome::Error`] and returned unchanged.
///
/// # Example
///
/// ```rust
/// use salt_stores::{HeapResource, LogMessages, LoggerResource, Operation, Outcome, Pipe, Resource};
///
/// let messages = LogMessages::new().on(Operation::Init, Outcome::Error, "no memory");
/// let mut log = Pipe::new();
/// let mut heap = LoggerResource::new(HeapResource::new(usize::MAX), &mut log, &messages);
///
/// assert!(heap.init().is_err());
/// drop(heap);
/// assert!(log.take().starts_with(b"no memory: init() -> error: "));
/// ```
#[derive(Debug)]
pub struct LoggerResource<'o, R, O: ?Sized> {
    child: R,
    output: &'o mut O,
    messages: &'o LogMessages,
}

impl<'o, R: Resource, O: Store + ?Sized> LoggerResource<'o, R, O> {
    /// Log `child` into `output` using `messages`.
    pub fn new(child: R, output: &'o mut O, messages: &'o LogMessages) -> Self {
        Self {
            child,
            output,
            messages,
        }
    }
}

impl<R: Resource, O: Store + ?Sized> Resource for LoggerResource<'_, R, O> {
    type Store<'a>
        = LoggerStore<'a, R::Store<'a>, O>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        let result = self.child.init();
        let outcome = match result {
            Ok(()) => Outcome::Success,
            Err(_) => Outcome::Error,
        };
        log_outcome(
            &mut *self.output,
            self.messages,
            Operation::Init,
            None,
            outcome,
            result.as_ref().map(|()| None),
        );
        result
    }

    fn store(&mut self) -> Self::Store<'_> {
        LoggerStore::new(self.child.store(), &mut *self.output, self.messages)
    }

    fn deinit(&mut self) {
        self.child.deinit();
    }
}
