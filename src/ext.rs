//! # Extension Traits
//!
//! Convenience methods for any store.
//!
//! ## Overview
//!
//! [`StoreExt`] wraps the continuation-passing [`split`](crate::Store::split)
//! in a few everyday shapes. It has a blanket implementation, so every store
//! (including `dyn Store`) gets it for free.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`with_range`](StoreExt::with_range) | split with a typed result |
//! | [`read_at`](StoreExt::read_at) | read at an offset |
//! | [`write_at`](StoreExt::write_at) | write at an offset |
//! | [`copy_to`](StoreExt::copy_to) | transfer to completion |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, [`StoreExtJson`] adds:
//!
//! | Method | Description |
//! |--------|-------------|
//! | `write_json` | serialize a value and write it out |
//! | `read_json` | read bytes and deserialize them |
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! salt-stores = { version = "0.1", features = ["serde"] }
//! ```

use crate::{Progress, Store, StoreError, transfer_all};

/// Extension methods for any store.
///
/// # Example
///
/// ```rust
/// use salt_stores::{MemoryStore, StoreExt};
///
/// let mut bytes = [0u8; 12];
/// let mut store = MemoryStore::new(&mut bytes);
/// store.write_at(6, b"world").unwrap();
///
/// let mut word = [0u8; 5];
/// assert_eq!(store.read_at(6, &mut word).unwrap(), 5);
/// assert_eq!(&word, b"world");
/// ```
pub trait StoreExt: Store {
    /// Split over `[begin, end)` and run `block` on the sub-store, returning
    /// whatever it returns.
    ///
    /// # Errors
    ///
    /// The error of `block` or of the split, or
    /// [`StoreError::Unavailable`] if the store never ran the continuation.
    fn with_range<T, F>(&mut self, begin: usize, end: usize, block: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn Store) -> Result<T, StoreError>,
    {
        let mut block = Some(block);
        let mut output = None;
        self.split(begin, end, &mut |sub| {
            if let Some(block) = block.take() {
                output = Some(block(sub)?);
            }
            Ok(0)
        })?;
        output.ok_or(StoreError::Unavailable { operation: "split" })
    }

    /// Read into `buffer` starting at byte `offset`.
    ///
    /// # Errors
    ///
    /// Any error of the split or the read.
    fn read_at(&mut self, offset: usize, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let end = offset.saturating_add(buffer.len());
        self.split(offset, end, &mut |sub| sub.read(&mut *buffer))
    }

    /// Write `buffer` starting at byte `offset`.
    ///
    /// # Errors
    ///
    /// Any error of the split or the write.
    fn write_at(&mut self, offset: usize, buffer: &[u8]) -> Result<usize, StoreError> {
        let end = offset.saturating_add(buffer.len());
        self.split(offset, end, &mut |sub| sub.write(buffer))
    }

    /// Copy the first `amount` bytes of this store into `to`, looping over
    /// [`transfer`](crate::transfer) until done.
    ///
    /// # Errors
    ///
    /// [`StoreError::Stalled`] if either side stops accepting or providing
    /// data, or the first store error.
    fn copy_to<T: Store + ?Sized>(&mut self, to: &mut T, amount: usize) -> Result<usize, StoreError> {
        let mut progress = Progress::new(amount);
        transfer_all(&mut progress, self, to)
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

// =============================================================================
// JSON Support (Feature-Gated)
// =============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use crate::MemoryStore;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON serialization extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait StoreExtJson: Store {
        /// Serialize `value` as JSON and write all of it.
        ///
        /// Returns the number of bytes written.
        ///
        /// # Errors
        ///
        /// - `StoreError::Serialization` if serialization failed
        /// - `StoreError::Stalled` if the store stopped accepting bytes
        fn write_json<T: Serialize>(&mut self, value: &T) -> Result<usize, StoreError> {
            let mut json =
                serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
            let len = json.len();
            MemoryStore::new(&mut json).copy_to(self, len)
        }

        /// Read up to `limit` bytes and deserialize them as JSON.
        ///
        /// # Errors
        ///
        /// - `StoreError::Deserialization` if the bytes are not valid JSON
        /// - Any error from the underlying read
        fn read_json<T: DeserializeOwned>(&mut self, limit: usize) -> Result<T, StoreError> {
            let mut bytes = vec![0u8; limit];
            let read = self.read(&mut bytes)?;
            serde_json::from_slice(&bytes[..read]).map_err(|e| StoreError::Deserialization(e.to_string()))
        }
    }

    impl<S: Store + ?Sized> StoreExtJson for S {}
}

#[cfg(feature = "serde")]
pub use json::StoreExtJson;
