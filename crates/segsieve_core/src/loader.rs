//! Reads prime record streams back into memory.

use crate::error::CoreResult;
use crate::record::{decode_records, RECORD_SIZE};
use crate::Number;
use segsieve_storage::{FileBackend, StorageBackend};
use std::path::Path;
use tracing::{debug, error, warn};

/// Records read per backend call.
pub const LOAD_CHUNK_RECORDS: usize = 64 * 1024;

/// Reads every complete record from `backend` in stream order.
///
/// Trailing bytes that do not form a whole record are dropped silently.
///
/// # Errors
///
/// Returns an error if the backend cannot be read.
pub fn load_primes(backend: &dyn StorageBackend) -> CoreResult<Vec<Number>> {
    let size = backend.size()?;
    let record_size = RECORD_SIZE as u64;
    let complete = size / record_size;
    let mut primes = Vec::with_capacity(complete as usize);

    let chunk_bytes = (LOAD_CHUNK_RECORDS * RECORD_SIZE) as u64;
    let end = complete * record_size;
    let mut offset = 0u64;
    while offset < end {
        let len = chunk_bytes.min(end - offset) as usize;
        let bytes = backend.read_at(offset, len)?;
        primes.extend(decode_records(&bytes));
        offset += len as u64;
    }

    let tail = size - end;
    if tail != 0 {
        debug!(tail, "ignored partial record at end of stream");
    }
    Ok(primes)
}

/// Loads the record file at `path`.
///
/// Open and read failures are logged and produce an empty vector.
pub fn load_primes_from_path(path: &Path) -> Vec<Number> {
    let backend = match FileBackend::open_read_only(path) {
        Ok(backend) => backend,
        Err(e) => {
            error!("error opening {} for reading: {e}", path.display());
            return Vec::new();
        }
    };

    match load_primes(&backend) {
        Ok(primes) => primes,
        Err(e) => {
            warn!("error reading {}: {e}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::encode_records;
    use segsieve_storage::InMemoryBackend;
    use tempfile::tempdir;

    fn backend_with(values: &[Number], extra: &[u8]) -> InMemoryBackend {
        let mut bytes = Vec::new();
        encode_records(values, &mut bytes);
        bytes.extend_from_slice(extra);
        InMemoryBackend::with_data(bytes)
    }

    #[test]
    fn loads_in_stream_order() {
        let backend = backend_with(&[11, 2, 7, 3], &[]);
        assert_eq!(load_primes(&backend).unwrap(), vec![11, 2, 7, 3]);
    }

    #[test]
    fn empty_stream_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(load_primes(&backend).unwrap().is_empty());
    }

    #[test]
    fn partial_tail_is_dropped() {
        for extra in 1..RECORD_SIZE {
            let backend = backend_with(&[2, 3, 5], &vec![0xEE; extra]);
            assert_eq!(load_primes(&backend).unwrap(), vec![2, 3, 5]);
        }
    }

    #[test]
    fn reads_across_chunk_boundaries() {
        let values: Vec<Number> = (0..(LOAD_CHUNK_RECORDS as Number * 2 + 17)).collect();
        let backend = backend_with(&values, &[1, 2, 3]);
        assert_eq!(load_primes(&backend).unwrap(), values);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        assert!(load_primes_from_path(&dir.path().join("nope.bin")).is_empty());
    }

    #[test]
    fn loads_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("primes.bin");
        let mut bytes = Vec::new();
        encode_records(&[2, 3, 5, 7], &mut bytes);
        bytes.truncate(bytes.len() - 3);
        std::fs::write(&path, &bytes).unwrap();

        assert_eq!(load_primes_from_path(&path), vec![2, 3, 5]);
    }
}
