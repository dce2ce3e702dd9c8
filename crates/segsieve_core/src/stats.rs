//! Run counters and the per-run report.

use crate::config::OutputOrder;
use crate::Number;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the workers of one run.
///
/// All counters are atomic and can be read while a run is in progress.
#[derive(Debug, Default)]
pub struct SieveStats {
    segments: AtomicU64,
    primes: AtomicU64,
    failed_segments: AtomicU64,
    lost_primes: AtomicU64,
}

impl SieveStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sieved segment and the number of primes it held.
    pub fn record_segment(&self, primes: usize) {
        self.segments.fetch_add(1, Ordering::Relaxed);
        self.primes.fetch_add(primes as u64, Ordering::Relaxed);
    }

    /// Records a segment whose primes could not be written.
    pub fn record_failed_write(&self, primes: usize) {
        self.failed_segments.fetch_add(1, Ordering::Relaxed);
        self.lost_primes.fetch_add(primes as u64, Ordering::Relaxed);
    }

    /// Segments sieved so far.
    pub fn segments(&self) -> u64 {
        self.segments.load(Ordering::Relaxed)
    }

    /// Primes found so far.
    pub fn primes(&self) -> u64 {
        self.primes.load(Ordering::Relaxed)
    }

    /// Segments whose write failed.
    pub fn failed_segments(&self) -> u64 {
        self.failed_segments.load(Ordering::Relaxed)
    }

    /// Primes found but not persisted.
    pub fn lost_primes(&self) -> u64 {
        self.lost_primes.load(Ordering::Relaxed)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SieveReport {
    /// Upper bound that was sieved.
    pub limit: Number,
    /// Primes found in `[2, limit]`, including 2.
    pub count: u64,
    /// Number of base primes up to `isqrt(limit)`.
    pub base_primes: usize,
    /// Segments sieved.
    pub segments: u64,
    /// Segments whose primes could not be written to the sink.
    pub failed_segments: u64,
    /// Primes found but lost to failed writes.
    pub lost_primes: u64,
    /// Segment width used.
    pub block_width: Number,
    /// Worker threads used.
    pub threads: usize,
    /// Output order used.
    pub order: OutputOrder,
    /// Wall-clock time of the run in seconds.
    pub elapsed_secs: f64,
}

impl SieveReport {
    /// Returns true if every segment reached the sink.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_segments == 0
    }
}
