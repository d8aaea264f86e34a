//! Formatted text as a resource.

use std::fmt::{self, Write as _};

use crate::{HeapStore, Resource, StoreError};

/// Formats a [`Display`](fmt::Display) value into an exactly-sized buffer on
/// `init`.
///
/// The value is formatted twice: once to measure the text, then into an
/// allocation of exactly that length. The store is a [`HeapStore`] over the
/// text, fully written.
///
/// # Example
///
/// ```rust
/// use salt_stores::{use_resource, DynamicStore, FormatResource, Store};
///
/// let mut text = FormatResource::new(std::net::Ipv4Addr::LOCALHOST);
/// let bytes = use_resource(&mut text, |acquired| {
///     let mut store = acquired.store();
///     let mut out = vec![0u8; store.size()?];
///     store.read(&mut out)?;
///     Ok(out)
/// })
/// .unwrap();
/// assert_eq!(bytes, b"127.0.0.1");
/// ```
#[derive(Debug)]
pub struct FormatResource<T> {
    value: T,
    buffer: Vec<u8>,
    written: usize,
}

impl<T: fmt::Display> FormatResource<T> {
    /// Format `value` when initialized.
    pub fn new(value: T) -> Self {
        Self {
            value,
            buffer: Vec::new(),
            written: 0,
        }
    }
}

struct Measure(usize);

impl fmt::Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

impl<T: fmt::Display> Resource for FormatResource<T> {
    type Store<'a>
        = HeapStore<'a>
    where
        Self: 'a;

    fn init(&mut self) -> Result<(), StoreError> {
        let mut measure = Measure(0);
        write!(measure, "{}", self.value)?;

        let mut text = String::new();
        text.try_reserve_exact(measure.0)
            .map_err(|_| StoreError::AllocationFailed {
                requested: measure.0,
            })?;
        write!(text, "{}", self.value)?;

        self.buffer = text.into_bytes();
        self.written = self.buffer.len();
        Ok(())
    }

    fn store(&mut self) -> Self::Store<'_> {
        HeapStore::new(&mut self.buffer, &mut self.written)
    }

    fn deinit(&mut self) {
        self.buffer = Vec::new();
        self.written = 0;
    }
}
