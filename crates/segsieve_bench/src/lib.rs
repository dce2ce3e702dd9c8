//! Benchmark utilities.

use segsieve_core::{encode_records, simple_sieve, Number};

/// Limits used across the sieve benchmarks.
pub const LIMITS: [Number; 3] = [100_000, 1_000_000, 10_000_000];

/// Encoded record stream holding the primes up to `limit`.
pub fn record_bytes(limit: Number) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode_records(&simple_sieve(limit), &mut bytes);
    bytes
}
