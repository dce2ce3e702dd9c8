//! # segsieve core
//!
//! Parallel segmented Sieve of Eratosthenes.
//!
//! This crate provides:
//! - A simple sieve for the base primes up to `isqrt(N)`
//! - A segment plan partitioning `[2, N]` into fixed-width blocks
//! - The segment sieving engine, running blocks on a rayon pool
//! - Prime sinks persisting each block as fixed-width binary records
//! - A loader reading record streams back into memory
//!
//! ## Example
//!
//! ```rust
//! use segsieve_core::{load_primes, BinaryPrimeSink, SegmentedSieve, SieveConfig};
//!
//! let engine = SegmentedSieve::new(SieveConfig::new().parallel(false)).unwrap();
//! let sink = BinaryPrimeSink::in_memory();
//! let report = engine.run(30, &sink).unwrap();
//! assert_eq!(report.count, 10);
//!
//! let backend = sink.into_inner();
//! let mut primes = load_primes(&backend).unwrap();
//! primes.sort_unstable();
//! assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod loader;
mod record;
mod segment;
mod sieve;
mod sink;
mod stats;

pub use config::{OutputOrder, SieveConfig, DEFAULT_BLOCK_WIDTH};
pub use engine::{sieve_segment, SegmentedSieve};
pub use error::{CoreError, CoreResult};
pub use loader::{load_primes, load_primes_from_path, LOAD_CHUNK_RECORDS};
pub use record::{decode_records, encode_records, RECORD_SIZE};
pub use segment::{MarkingBuffer, Segment, SegmentPlan};
pub use sieve::{isqrt, simple_sieve};
pub use sink::{BinaryPrimeSink, CollectingSink, PrimeSink};
pub use stats::{SieveReport, SieveStats};

/// Integer domain for candidates, primes and bounds.
pub type Number = i64;
