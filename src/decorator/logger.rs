//! Outcome logging into a caller-chosen store.

use std::fmt;

use tracing::warn;

use crate::{
    DynamicStore, FormatResource, LogMessages, Operation, Outcome, Progress, SplitFn, Store,
    StoreError, transfer_all, use_resource,
};

/// Logs the outcome of each `read`, `write` and `resize` on `child`.
///
/// Every call is classified as [`Outcome::Success`], [`Outcome::Partial`] or
/// [`Outcome::Error`] and looked up in `messages`. When the table has a label
/// for the combination, one line is written to `output`:
///
/// ```text
/// <label>: <operation>(<argument>) -> <result>
/// ```
///
/// where `<result>` is the returned count or `error: <message>`. Without a
/// label the call passes through silently. The child's result is always
/// returned unchanged, even if writing the line fails.
///
/// `split` re-wraps the sub-store in a logger sharing the same table and
/// output.
///
/// # Example
///
/// ```rust
/// use salt_stores::{LogMessages, LoggerStore, MemoryStore, Operation, Outcome, Pipe, Store};
///
/// let messages = LogMessages::new().on(Operation::Write, Outcome::Partial, "short");
/// let mut log = Pipe::new();
/// let mut bytes = [0u8; 2];
/// let mut store = LoggerStore::new(MemoryStore::new(&mut bytes), &mut log, &messages);
///
/// store.write(b"abc").unwrap();
/// drop(store);
/// assert_eq!(log.take(), b"short: write(3) -> 2\n");
/// ```
#[derive(Debug)]
pub struct LoggerStore<'o, S, O: ?Sized> {
    child: S,
    output: &'o mut O,
    messages: &'o LogMessages,
}

impl<'o, S, O: Store + ?Sized> LoggerStore<'o, S, O> {
    /// Log operations on `child` into `output` using `messages`.
    pub fn new(child: S, output: &'o mut O, messages: &'o LogMessages) -> Self {
        Self {
            child,
            output,
            messages,
        }
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.child
    }

    fn record(&mut self, operation: Operation, argument: usize, outcome: Outcome, result: &Result<usize, StoreError>) {
        log_outcome(
            &mut *self.output,
            self.messages,
            operation,
            Some(argument),
            outcome,
            result.as_ref().map(|n| Some(*n)),
        );
    }
}

impl<S: Store, O: Store + ?Sized> Store for LoggerStore<'_, S, O> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let result = self.child.read(buffer);
        let outcome = Outcome::of_transfer(buffer.len(), &result);
        self.record(Operation::Read, buffer.len(), outcome, &result);
        result
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let result = self.child.write(buffer);
        let outcome = Outcome::of_transfer(buffer.len(), &result);
        self.record(Operation::Write, buffer.len(), outcome, &result);
        result
    }

    fn split(
        &mut self,
        begin: usize,
        end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        let Self {
            child,
            output,
            messages,
        } = self;
        let messages = *messages;
        child.split(begin, end, &mut |sub| {
            block(&mut LoggerStore::new(sub, &mut **output, messages))
        })
    }
}

impl<S: DynamicStore, O: Store + ?Sized> DynamicStore for LoggerStore<'_, S, O> {
    fn size(&mut self) -> Result<usize, StoreError> {
        self.child.size()
    }

    fn resize(&mut self, new_size: usize) -> Result<usize, StoreError> {
        let original = self.child.size().ok();
        let result = self.child.resize(new_size);
        let outcome = Outcome::of_resize(original, new_size, &result);
        self.record(Operation::Resize, new_size, outcome, &result);
        result
    }
}

/// One formatted log line.
pub(crate) struct LogLine<'a> {
    pub(crate) label: &'a str,
    pub(crate) operation: Operation,
    pub(crate) argument: Option<usize>,
    pub(crate) result: Result<Option<usize>, &'a StoreError>,
}

impl fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}(", self.label, self.operation)?;
        if let Some(argument) = self.argument {
            write!(f, "{argument}")?;
        }
        f.write_str(") -> ")?;
        match &self.result {
            Ok(Some(value)) => writeln!(f, "{value}"),
            Ok(None) => writeln!(f, "ok"),
            Err(error) => writeln!(f, "error: {error}"),
        }
    }
}

/// Write the labelled line for `(operation, outcome)`, if any, to `output`.
///
/// Sink failures are reported through `tracing` and otherwise ignored.
pub(crate) fn log_outcome<O: Store + ?Sized>(
    output: &mut O,
    messages: &LogMessages,
    operation: Operation,
    argument: Option<usize>,
    outcome: Outcome,
    result: Result<Option<usize>, &StoreError>,
) {
    let Some(label) = messages.label(operation, outcome) else {
        return;
    };
    let line = LogLine {
        label,
        operation,
        argument,
        result,
    };
    if let Err(error) = emit(output, &line) {
        warn!(%error, %operation, "log output rejected line");
    }
}

fn emit<O: Store + ?Sized>(output: &mut O, line: &LogLine<'_>) -> Result<usize, StoreError> {
    let mut text = FormatResource::new(line);
    use_resource(&mut text, |acquired| {
        let mut store = acquired.store();
        let mut progress = Progress::new(store.size()?);
        transfer_all(&mut progress, &mut store, output)
    })
}
