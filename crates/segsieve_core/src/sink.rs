//! Destinations for the primes of each sieved segment.
//!
//! Workers hand every segment's list to a [`PrimeSink`] in one call. A
//! sink must keep each call's primes contiguous; the relative order of
//! different calls follows whatever order the engine issues them in.

use crate::error::CoreResult;
use crate::record::{encode_records, RECORD_SIZE};
use crate::Number;
use parking_lot::Mutex;
use segsieve_storage::{FileBackend, InMemoryBackend, StorageBackend};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Receives the primes found in one segment at a time.
pub trait PrimeSink: Send + Sync {
    /// Appends one segment's primes as a single atomic unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the primes could not be stored. Nothing from the
    /// failed call is retained.
    fn append(&self, primes: &[Number]) -> CoreResult<()>;

    /// Pushes buffered data to its destination at the end of a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be flushed.
    fn finish(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// Writes primes as fixed-width binary records into a storage backend.
///
/// The backend sits behind a mutex held only for the append itself, so
/// workers sieve concurrently and serialize only on the write.
#[derive(Debug)]
pub struct BinaryPrimeSink<B: StorageBackend> {
    backend: Mutex<B>,
    records: AtomicU64,
}

impl<B: StorageBackend> BinaryPrimeSink<B> {
    /// Wraps an existing backend. Records go after its current contents.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
            records: AtomicU64::new(0),
        }
    }

    /// Records written through this sink.
    pub fn records_written(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }

    /// Returns the backend.
    pub fn into_inner(self) -> B {
        self.backend.into_inner()
    }
}

impl BinaryPrimeSink<FileBackend> {
    /// Creates or truncates the file at `path`, so a run never mixes its
    /// records with those of an earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for writing.
    pub fn create_file(path: &Path) -> CoreResult<Self> {
        let backend = FileBackend::create(path)?;
        debug!(path = %path.display(), "created prime record file");
        Ok(Self::new(backend))
    }
}

impl BinaryPrimeSink<InMemoryBackend> {
    /// Creates a sink over an empty in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }
}

impl<B: StorageBackend> PrimeSink for BinaryPrimeSink<B> {
    fn append(&self, primes: &[Number]) -> CoreResult<()> {
        if primes.is_empty() {
            return Ok(());
        }

        let mut bytes = Vec::with_capacity(primes.len() * RECORD_SIZE);
        encode_records(primes, &mut bytes);

        let mut backend = self.backend.lock();
        let start = backend.size()?;
        if let Err(err) = backend.append(&bytes) {
            if backend.size()? > start {
                backend.truncate(start)?;
            }
            return Err(err.into());
        }
        drop(backend);
        self.records
            .fetch_add(primes.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    fn finish(&self) -> CoreResult<()> {
        let mut backend = self.backend.lock();
        backend.flush()?;
        backend.sync()?;
        Ok(())
    }
}

/// Keeps every appended block in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    blocks: Mutex<Vec<Vec<Number>>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks in the order they were appended.
    pub fn blocks(&self) -> Vec<Vec<Number>> {
        self.blocks.lock().clone()
    }

    /// All primes in append order.
    pub fn primes(&self) -> Vec<Number> {
        self.blocks.lock().iter().flatten().copied().collect()
    }

    /// All primes in ascending order.
    pub fn into_sorted(self) -> Vec<Number> {
        let mut primes: Vec<Number> = self.blocks.into_inner().into_iter().flatten().collect();
        primes.sort_unstable();
        primes
    }
}

impl PrimeSink for CollectingSink {
    fn append(&self, primes: &[Number]) -> CoreResult<()> {
        if !primes.is_empty() {
            self.blocks.lock().push(primes.to_vec());
        }
        Ok(())
    }
}
