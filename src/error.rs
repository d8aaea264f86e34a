//! Error types for store and resource operations.

/// Store and resource error type with contextual variants.
///
/// Every failing operation reports one of these. A composite never swallows a
/// child's error: the first error encountered is returned unchanged and the
/// remaining steps are skipped.
///
/// Transient unavailability on a non-blocking backend is **not** an error:
/// it is reported as `Ok(0)`.
///
/// # Examples
///
/// ```rust
/// use salt_stores::StoreError;
///
/// let err = StoreError::WouldBlock { operation: "read" };
/// assert_eq!(err.to_string(), "read: would block");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    // Availability Errors
    /// A lock could not be taken without blocking.
    #[error("{operation}: would block")]
    WouldBlock {
        /// The operation that was refused.
        operation: &'static str,
    },

    /// The store cannot serve requests (no-op store, failed lazy acquisition).
    #[error("{operation}: store unavailable")]
    Unavailable {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The store does not support the operation (e.g. `size` on a static store).
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation.
        operation: &'static str,
    },

    /// A blocking transfer stopped making progress.
    #[error("transfer stalled at {completed} of {total} bytes")]
    Stalled {
        /// Bytes moved before the stall.
        completed: usize,
        /// Bytes the transfer was asked to move.
        total: usize,
    },

    // Shape Errors
    /// An element index fell outside the store.
    #[error("index {index} out of bounds")]
    OutOfBounds {
        /// The requested element index.
        index: usize,
    },

    /// A buffer does not hold exactly one element of an array view.
    #[error("element size mismatch: expected {expected} bytes, got {actual}")]
    ElementSize {
        /// The configured element size.
        expected: usize,
        /// The size of the buffer that was supplied.
        actual: usize,
    },

    /// An array view was configured with zero-byte elements.
    #[error("element size must be non-zero")]
    ZeroElementSize,

    /// A list was built from no members.
    #[error("cannot build a {kind} list from zero members")]
    EmptyList {
        /// Which list constructor was called.
        kind: &'static str,
    },

    // Acquisition Errors
    /// Memory for a resource could not be allocated.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed {
        /// The number of bytes requested.
        requested: usize,
    },

    /// A resource failed to initialise.
    #[error("failed to acquire {resource}: {reason}")]
    AcquireFailed {
        /// The resource kind.
        resource: &'static str,
        /// Why acquisition failed.
        reason: String,
    },

    /// No candidate of a first-success resource could be acquired.
    #[error("no candidate could be acquired ({attempts} tried)")]
    NoCandidate {
        /// How many candidates were tried.
        attempts: usize,
    },

    /// Formatting a value into a buffer failed.
    #[error("formatting failed")]
    Format,

    // Data Errors
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    // Backend Errors
    /// Generic backend error.
    #[error("backend error: {0}")]
    Backend(String),

    /// I/O error with context.
    #[error("{operation} failed: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Returns `true` if the failure was a refused non-blocking lock.
    #[inline]
    pub fn is_would_block(&self) -> bool {
        matches!(self, StoreError::WouldBlock { .. })
    }

    /// The raw OS error code, when the error came from the platform.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            StoreError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::WouldBlock => StoreError::WouldBlock { operation: "io" },
            std::io::ErrorKind::Unsupported => StoreError::NotSupported { operation: "io" },
            _ => StoreError::Io {
                operation: "io",
                source: error,
            },
        }
    }
}

impl From<std::fmt::Error> for StoreError {
    fn from(_: std::fmt::Error) -> Self {
        StoreError::Format
    }
}
