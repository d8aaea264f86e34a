//! Resumable, non-blocking byte transfer between two stores.
//!
//! [`transfer`] moves at most one page ([`PAGE_SIZE`] bytes) per call and
//! records how far it got in a [`Progress`]. Calling it again with the same
//! progress resumes where the previous call stopped, so a caller driving
//! non-blocking backends simply calls it until [`Progress::is_complete`].
//!
//! ```text
//! from: [ completed ........ total )
//!           │  split
//!           ▼
//!        read ≤ PAGE_SIZE ──► write ──► completed += written
//! ```

use tracing::trace;

use crate::{PAGE_SIZE, Store, StoreError};

/// How much of a transfer has been done.
///
/// Created by the caller with the total to move, advanced only by
/// [`transfer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    total: usize,
    completed: usize,
}

impl Progress {
    /// A fresh transfer of `total` bytes.
    #[inline]
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
        }
    }

    /// Bytes the transfer was asked to move.
    #[inline]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Bytes moved so far.
    #[inline]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Bytes still to move.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.total - self.completed
    }

    /// Returns `true` once every byte has been moved.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Move the next chunk of `progress` from `from` to `to`.
///
/// Both stores are split over `[completed, total)`; up to one page, clipped to
/// the remaining amount, is read from the source and written to the
/// destination. `progress` advances by the bytes actually written.
///
/// Returns the new completed count, or `0` without touching either store if
/// the transfer was already complete. A call that finds no data (either side
/// reporting `Ok(0)`) returns the unchanged count.
///
/// # Errors
///
/// The first read or write error. `progress` is not advanced.
pub fn transfer<F, T>(progress: &mut Progress, from: &mut F, to: &mut T) -> Result<usize, StoreError>
where
    F: Store + ?Sized,
    T: Store + ?Sized,
{
    if progress.is_complete() {
        return Ok(0);
    }

    let begin = progress.completed;
    let end = progress.total;
    let chunk = progress.remaining().min(PAGE_SIZE);

    let written = from.split(begin, end, &mut |source| {
        to.split(begin, end, &mut |sink| {
            let mut page = [0u8; PAGE_SIZE];
            let read = source.read(&mut page[..chunk])?;
            if read == 0 {
                return Ok(0);
            }
            sink.write(&page[..read])
        })
    })?;

    progress.completed += written.min(progress.remaining());
    trace!(
        written,
        completed = progress.completed,
        total = progress.total,
        "transfer chunk"
    );
    Ok(progress.completed)
}

/// Drive [`transfer`] until `progress` completes.
///
/// Intended for backends that always make progress (memory, heap). Returns the
/// total once complete.
///
/// # Errors
///
/// [`StoreError::Stalled`] if a call moves no bytes, or the first error from
/// [`transfer`].
pub fn transfer_all<F, T>(progress: &mut Progress, from: &mut F, to: &mut T) -> Result<usize, StoreError>
where
    F: Store + ?Sized,
    T: Store + ?Sized,
{
    while !progress.is_complete() {
        let before = progress.completed;
        transfer(progress, from, to)?;
        if progress.completed == before {
            return Err(StoreError::Stalled {
                completed: progress.completed,
                total: progress.total,
            });
        }
    }
    Ok(progress.total)
}
