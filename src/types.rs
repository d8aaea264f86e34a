//! Core data types shared by stores, decorators and resources.

use std::fmt;

/// Size of the scratch buffer used by [`transfer`](crate::transfer) per call.
pub const PAGE_SIZE: usize = 4096;

/// A store or resource operation, as seen by the logging decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operation {
    /// [`Store::read`](crate::Store::read).
    Read,
    /// [`Store::write`](crate::Store::write).
    Write,
    /// [`DynamicStore::resize`](crate::DynamicStore::resize).
    Resize,
    /// [`Resource::init`](crate::Resource::init).
    Init,
}

impl Operation {
    /// The operation's name as it appears in log lines.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Resize => "resize",
            Operation::Init => "init",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// The operation returned an error (or a resize left the size unchanged).
    Error,
    /// The full request was honoured.
    Success,
    /// Fewer bytes than requested were moved, or a resize landed elsewhere.
    Partial,
}

impl Outcome {
    /// Classify a read or write that asked for `requested` bytes.
    pub fn of_transfer<E>(requested: usize, result: &Result<usize, E>) -> Self {
        match result {
            Err(_) => Outcome::Error,
            Ok(amount) if *amount == requested => Outcome::Success,
            Ok(_) => Outcome::Partial,
        }
    }

    /// Classify a resize from `original` (if known) towards `requested`.
    ///
    /// Landing on the requested size is a success; staying at the original
    /// size means the resize silently failed. The requested size is checked
    /// first, so a resize to the current size is a success.
    pub fn of_resize<E>(original: Option<usize>, requested: usize, result: &Result<usize, E>) -> Self {
        match result {
            Err(_) => Outcome::Error,
            Ok(size) if *size == requested => Outcome::Success,
            Ok(size) if Some(*size) == original => Outcome::Error,
            Ok(_) => Outcome::Partial,
        }
    }
}

/// A half-open byte range `[begin, end)` used by multi-range splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitRange {
    /// First byte of the range.
    pub begin: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl SplitRange {
    /// Create a range.
    #[inline]
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Length of the range (zero when `end <= begin`).
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Returns `true` if the range covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<std::ops::Range<usize>> for SplitRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// One entry of a [`LogMessages`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogMessage {
    /// The operation this entry matches.
    pub operation: Operation,
    /// The outcome this entry matches.
    pub outcome: Outcome,
    /// Label written at the start of the log line.
    pub label: String,
}

/// Lookup table from `(Operation, Outcome)` to a log label.
///
/// Combinations without a label are not logged.
///
/// # Example
///
/// ```rust
/// use salt_stores::{LogMessages, Operation, Outcome};
///
/// let messages = LogMessages::new()
///     .on(Operation::Read, Outcome::Error, "cache read failed")
///     .on(Operation::Write, Outcome::Partial, "short write");
///
/// assert_eq!(messages.label(Operation::Read, Outcome::Error), Some("cache read failed"));
/// assert_eq!(messages.label(Operation::Read, Outcome::Success), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LogMessages {
    entries: Vec<LogMessage>,
}

impl LogMessages {
    /// An empty table: nothing is logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the label for `operation` ending in `outcome`.
    pub fn on(mut self, operation: Operation, outcome: Outcome, label: impl Into<String>) -> Self {
        let label = label.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.operation == operation && e.outcome == outcome)
        {
            Some(entry) => entry.label = label,
            None => self.entries.push(LogMessage {
                operation,
                outcome,
                label,
            }),
        }
        self
    }

    /// The label for `operation` ending in `outcome`, if any.
    pub fn label(&self, operation: Operation, outcome: Outcome) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.operation == operation && e.outcome == outcome)
            .map(|e| e.label.as_str())
    }

    /// Returns `true` if no combination is labelled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a table from a JSON array of `{operation, outcome, label}` objects.
    ///
    /// # Errors
    ///
    /// [`StoreError::Deserialization`](crate::StoreError::Deserialization) on malformed input.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::StoreError> {
        serde_json::from_str(json).map_err(|e| crate::StoreError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = Result<usize, ()>;

    #[test]
    fn later_label_replaces_earlier() {
        let messages = LogMessages::new()
            .on(Operation::Write, Outcome::Error, "first")
            .on(Operation::Write, Outcome::Error, "second");
        assert_eq!(messages.label(Operation::Write, Outcome::Error), Some("second"));
        assert!(!messages.is_empty());
        assert!(LogMessages::new().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn messages_from_json() {
        let json = r#"[{"operation":"resize","outcome":"partial","label":"grew short"}]"#;
        let messages = LogMessages::from_json(json).unwrap();
        assert_eq!(
            messages.label(Operation::Resize, Outcome::Partial),
            Some("grew short")
        );
        assert!(LogMessages::from_json("{").is_err());
    }

    #[test]
    fn transfer_outcomes() {
        assert_eq!(Outcome::of_transfer(8, &R::Ok(8)), Outcome::Success);
        assert_eq!(Outcome::of_transfer(8, &R::Ok(3)), Outcome::Partial);
        assert_eq!(Outcome::of_transfer(8, &R::Err(())), Outcome::Error);
    }

    #[test]
    fn resize_outcomes() {
        assert_eq!(Outcome::of_resize(Some(4), 8, &R::Ok(8)), Outcome::Success);
        assert_eq!(Outcome::of_resize(Some(4), 8, &R::Ok(4)), Outcome::Error);
        assert_eq!(Outcome::of_resize(Some(4), 8, &R::Ok(6)), Outcome::Partial);
        assert_eq!(Outcome::of_resize(None, 8, &R::Err(())), Outcome::Error);
    }

    #[test]
    fn resize_to_same_size_is_success() {
        assert_eq!(Outcome::of_resize(Some(8), 8, &R::Ok(8)), Outcome::Success);
    }

    #[test]
    fn split_range_len() {
        assert_eq!(SplitRange::new(2, 6).len(), 4);
        assert!(SplitRange::new(6, 2).is_empty());
        assert_eq!(SplitRange::from(1..3), SplitRange::new(1, 3));
    }

    #[test]
    fn operation_names() {
        assert_eq!(Operation::Read.to_string(), "read");
        assert_eq!(Operation::Init.name(), "init");
    }
}
