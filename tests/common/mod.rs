//! Shared stubs for the integration tests.
//!
//! - [`Scripted`]: a stream-like store with fixed read data, a write limit and
//!   an optional forced failure.
//! - [`StubResource`]: a resource that records its lifecycle into a shared
//!   [`Journal`] and can be told to fail `init`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use salt_stores::{MemoryStore, Resource, SplitFn, Store, StoreError};

/// Install a test-friendly subscriber once. Honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Scripted store
// =============================================================================

/// A store that serves `supply` on every read, accepts at most `accept` bytes
/// per write, and records everything written.
#[derive(Debug, Default)]
pub struct Scripted {
    supply: Vec<u8>,
    accept: usize,
    fail: bool,
    pub written: Vec<u8>,
    pub reads: usize,
}

impl Scripted {
    /// Reads return `supply`; writes accept everything.
    pub fn serving(supply: &[u8]) -> Self {
        Self {
            supply: supply.to_vec(),
            accept: usize::MAX,
            ..Self::default()
        }
    }

    /// Reads return nothing; writes accept at most `accept` bytes.
    pub fn accepting(accept: usize) -> Self {
        Self {
            accept,
            ..Self::default()
        }
    }

    /// Every read and write fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Store for Scripted {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StoreError> {
        self.reads += 1;
        if self.fail {
            return Err(StoreError::Backend("scripted read failure".into()));
        }
        let n = buffer.len().min(self.supply.len());
        buffer[..n].copy_from_slice(&self.supply[..n]);
        Ok(n)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StoreError> {
        if self.fail {
            return Err(StoreError::Backend("scripted write failure".into()));
        }
        let n = buffer.len().min(self.accept);
        self.written.extend_from_slice(&buffer[..n]);
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

// =============================================================================
// Recording resource
// =============================================================================

/// Ordered record of lifecycle events across several resources.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// A fresh, empty journal.
pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Snapshot of the journal's events.
pub fn events(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// A resource over a fixed-size byte buffer that journals `init`/`deinit`.
#[derive(Debug)]
pub struct StubResource {
    name: &'static str,
    fail: bool,
    journal: Journal,
    bytes: Vec<u8>,
}

impl StubResource {
    /// A resource that initializes successfully.
    pub fn ok(name: &'static str, size: usize, journal: &Journal) -> Self {
        Self {
            name,
            fail: false,
            journal: Rc::clone(journal),
            bytes: vec![0; size],
        }
    }

    /// A resource whose `init` fails.
    pub fn failing(name: &'static str, journal: &Journal) -> Self {
        Self {
            fail: true,
            ..Self::ok(name, 0, journal)
        }
    }

    /// The backing bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Resource for StubResource {
    type Store<'a> = MemoryStore<'a>;

    fn init(&mut self) -> Result<(), StoreError> {
        if self.fail {
            self.journal.borrow_mut().push(format!("init {} failed", self.name));
            return Err(StoreError::AcquireFailed {
                resource: "stub",
                reason: format!("{} told to fail", self.name),
            });
        }
        self.journal.borrow_mut().push(format!("init {}", self.name));
        Ok(())
    }

    fn store(&mut self) -> Self::Store<'_> {
        MemoryStore::new(&mut self.bytes)
    }

    fn deinit(&mut self) {
        self.journal.borrow_mut().push(format!("deinit {}", self.name));
    }
}
