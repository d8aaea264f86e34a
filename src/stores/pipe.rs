//! An in-memory FIFO stream.

use std::collections::VecDeque;

use crate::{SplitFn, Store, StoreError};

/// A byte stream: writes append to the back, reads drain from the front.
///
/// With a capacity set, writes accept only what fits and return `Ok(0)` when
/// the pipe is full. Reads return `Ok(0)` when it is empty. A stream has no
/// addressable range, so `split` hands the continuation the pipe itself.
///
/// # Example
///
/// ```rust
/// use salt_stores::{Pipe, Store};
///
/// let mut pipe = Pipe::with_capacity(4);
/// assert_eq!(pipe.write(b"abcdef").unwrap(), 4);
/// assert_eq!(pipe.write(b"g").unwrap(), 0);
///
/// let mut out = [0u8; 3];
/// assert_eq!(pipe.read(&mut out).unwrap(), 3);
/// assert_eq!(&out, b"abc");
/// assert_eq!(pipe.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Pipe {
    queue: VecDeque<u8>,
    capacity: Option<usize>,
}

impl Pipe {
    /// An unbounded pipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipe that holds at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Bytes currently buffered.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drain everything buffered.
    pub fn take(&mut self) -> Vec<u8> {
        self.queue.drain(..).collect()
    }
}

impl Store for Pipe {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let n = buffer.len().min(self.queue.len());
        for (slot, byte) in buffer.iter_mut().zip(self.queue.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        let room = match self.capacity {
            Some(capacity) => capacity.saturating_sub(self.queue.len()),
            None => buffer.len(),
        };
        let n = buffer.len().min(room);
        self.queue.extend(&buffer[..n]);
        Ok(n)
    }

    fn split(
        &mut self,
        _begin: usize,
        _end: usize,
        block: &mut SplitFn<'_>,
    ) -> Result<usize, StoreError> {
        block(self)
    }
}
