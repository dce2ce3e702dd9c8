//! Prime record codec.
//!
//! A record stream is a back-to-back sequence of 8-byte signed integers in
//! the host's native byte order. There is no header, footer, length prefix
//! or checksum.

use crate::Number;

/// Width of one record in bytes.
pub const RECORD_SIZE: usize = std::mem::size_of::<Number>();

/// Appends the records for `primes` to `out`.
pub fn encode_records(primes: &[Number], out: &mut Vec<u8>) {
    out.reserve(primes.len() * RECORD_SIZE);
    for prime in primes {
        out.extend_from_slice(&prime.to_ne_bytes());
    }
}

/// Decodes every complete record in `bytes`.
///
/// A trailing partial record (fewer than [`RECORD_SIZE`] bytes) is ignored.
#[must_use]
pub fn decode_records(bytes: &[u8]) -> Vec<Number> {
    bytes
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; RECORD_SIZE];
            raw.copy_from_slice(chunk);
            Number::from_ne_bytes(raw)
        })
        .collect()
}
