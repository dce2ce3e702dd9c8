//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level byte store.
///
/// Backends provide reading, appending and flushing. The record format
/// (fixed-width prime records) is owned by `segsieve_core`; backends only
/// see bytes.
///
/// # Invariants
///
/// - `append` writes all bytes contiguously and returns their offset
/// - `read_at` returns exactly the bytes previously written at that offset
/// - `flush` pushes appended data to the OS
/// - `truncate` never grows the storage
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The read would extend beyond the current size
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Appends data to the end of the storage.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is read-only or an I/O error occurs.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Flushes all pending writes to the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Returns the current size of the storage in bytes.
    ///
    /// This is the offset where the next `append` will write.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Syncs all data and metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;

    /// Truncates the storage to `new_size` bytes, dropping everything after.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::TruncatePastEnd`] if `new_size` is greater
    /// than the current size, or an error if the truncation fails.
    ///
    /// [`StorageError::TruncatePastEnd`]: crate::StorageError::TruncatePastEnd
    fn truncate(&mut self, new_size: u64) -> StorageResult<()>;
}
