//! Segmented sieve engine.
//!
//! The engine sieves each segment of a [`SegmentPlan`] against the base
//! primes on a rayon pool. Within a segment the base primes are applied
//! one after another by the worker owning the segment's buffer; parallelism
//! is only ever across segments. Each finished segment goes to the sink in
//! a single append.

use crate::config::{OutputOrder, SieveConfig};
use crate::error::{CoreError, CoreResult};
use crate::segment::{MarkingBuffer, Segment, SegmentPlan};
use crate::sieve::{isqrt, simple_sieve};
use crate::sink::{CollectingSink, PrimeSink};
use crate::stats::{SieveReport, SieveStats};
use crate::Number;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use tracing::{debug, error, info, trace};

/// Segments sieved per worker before an ascending-order batch is written.
const ASCENDING_BATCH_PER_THREAD: usize = 4;

/// Sieves one segment against `base_primes` and returns its primes in
/// ascending order.
///
/// `base_primes` must be ascending and contain every prime up to
/// `isqrt(segment.high())`. The segment containing 2 reports it directly,
/// since the buffer only tracks odd candidates.
#[must_use]
pub fn sieve_segment(segment: &Segment, base_primes: &[Number]) -> Vec<Number> {
    let mut buffer = MarkingBuffer::for_segment(segment);
    let (low, high) = (segment.low(), segment.high());

    for &p in base_primes {
        // Even multiples are never tracked.
        if p == 2 {
            continue;
        }
        let Some(square) = p.checked_mul(p) else {
            break;
        };
        if square > high {
            break;
        }

        let rem = low % p;
        let aligned = if rem == 0 {
            Some(low)
        } else {
            low.checked_add(p - rem)
        };
        let Some(mut multiple) = aligned.map(|m| m.max(square)) else {
            continue;
        };
        if multiple % 2 == 0 {
            match multiple.checked_add(p) {
                Some(odd) => multiple = odd,
                None => continue,
            }
        }

        let step = 2 * p;
        while multiple <= high {
            buffer.mark_composite(segment.slot_of(multiple));
            match multiple.checked_add(step) {
                Some(next) => multiple = next,
                None => break,
            }
        }
    }

    let mut primes = Vec::new();
    if segment.contains(2) {
        primes.push(2);
    }
    primes.extend(
        (0..segment.odd_count())
            .filter(|&slot| buffer.is_prime(slot))
            .map(|slot| segment.value_at(slot)),
    );
    primes
}

/// Parallel segmented Sieve of Eratosthenes.
///
/// # Example
///
/// ```rust
/// use segsieve_core::{SegmentedSieve, SieveConfig};
///
/// let engine = SegmentedSieve::new(SieveConfig::new().block_width(16)).unwrap();
/// assert_eq!(engine.primes(20).unwrap(), vec![2, 3, 5, 7, 11, 13, 17, 19]);
/// ```
pub struct SegmentedSieve {
    config: SieveConfig,
    pool: ThreadPool,
    threads: usize,
}

impl std::fmt::Debug for SegmentedSieve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedSieve")
            .field("config", &self.config)
            .field("threads", &self.threads)
            .finish_non_exhaustive()
    }
}

impl SegmentedSieve {
    /// Creates an engine and starts its worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool cannot
    /// be started.
    pub fn new(config: SieveConfig) -> CoreResult<Self> {
        config.validate()?;
        let threads = config.worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("segsieve-worker-{i}"))
            .build()
            .map_err(|e| CoreError::ThreadPool {
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            pool,
            threads,
        })
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Sieves `[2, limit]` and sends every prime to `sink`.
    ///
    /// The base primes up to `isqrt(limit)` are computed first with
    /// [`simple_sieve`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the segment plan is invalid. Failed sink
    /// appends are logged and counted in the report instead.
    pub fn run<S>(&self, limit: Number, sink: &S) -> CoreResult<SieveReport>
    where
        S: PrimeSink + ?Sized,
    {
        let base_primes = simple_sieve(isqrt(limit));
        debug!(
            limit,
            base_primes = base_primes.len(),
            "computed base primes"
        );
        self.run_with_base_primes(limit, &base_primes, sink)
    }

    /// Sieves `[2, limit]` with precomputed base primes.
    ///
    /// `base_primes` must be ascending and hold every prime up to
    /// `isqrt(limit)`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the segment plan is invalid.
    pub fn run_with_base_primes<S>(
        &self,
        limit: Number,
        base_primes: &[Number],
        sink: &S,
    ) -> CoreResult<SieveReport>
    where
        S: PrimeSink + ?Sized,
    {
        let started = Instant::now();
        let plan = SegmentPlan::new(limit, self.config.block_width)?;
        let stats = SieveStats::new();

        info!(
            limit,
            segments = plan.len(),
            threads = self.threads,
            order = ?self.config.order,
            "sieving"
        );

        match self.config.order {
            OutputOrder::Completion => self.run_completion(&plan, base_primes, sink, &stats),
            OutputOrder::Ascending => self.run_ascending(&plan, base_primes, sink, &stats),
        }

        if let Err(e) = sink.finish() {
            error!("error finishing prime output: {e}");
        }

        let report = SieveReport {
            limit,
            count: stats.primes(),
            base_primes: base_primes.len(),
            segments: stats.segments(),
            failed_segments: stats.failed_segments(),
            lost_primes: stats.lost_primes(),
            block_width: self.config.block_width,
            threads: self.threads,
            order: self.config.order,
            elapsed_secs: started.elapsed().as_secs_f64(),
        };
        info!(
            count = report.count,
            failed_segments = report.failed_segments,
            elapsed_secs = report.elapsed_secs,
            "sieve finished"
        );
        Ok(report)
    }

    /// Sieves `[2, limit]` in memory and returns the primes ascending.
    ///
    /// # Errors
    ///
    /// Returns an error only if the segment plan is invalid.
    pub fn primes(&self, limit: Number) -> CoreResult<Vec<Number>> {
        let sink = CollectingSink::new();
        self.run(limit, &sink)?;
        Ok(sink.into_sorted())
    }

    fn run_completion<S>(
        &self,
        plan: &SegmentPlan,
        base_primes: &[Number],
        sink: &S,
        stats: &SieveStats,
    ) where
        S: PrimeSink + ?Sized,
    {
        self.pool.install(|| {
            (0..plan.len()).into_par_iter().for_each(|index| {
                let segment = plan.segment(index);
                let primes = sieve_segment(&segment, base_primes);
                emit(sink, &segment, &primes, stats);
            });
        });
    }

    fn run_ascending<S>(
        &self,
        plan: &SegmentPlan,
        base_primes: &[Number],
        sink: &S,
        stats: &SieveStats,
    ) where
        S: PrimeSink + ?Sized,
    {
        let batch = self.threads * ASCENDING_BATCH_PER_THREAD;
        for start in (0..plan.len()).step_by(batch) {
            let end = (start + batch).min(plan.len());
            let sieved: Vec<(Segment, Vec<Number>)> = self.pool.install(|| {
                (start..end)
                    .into_par_iter()
                    .map(|index| {
                        let segment = plan.segment(index);
                        let primes = sieve_segment(&segment, base_primes);
                        (segment, primes)
                    })
                    .collect()
            });

            for (segment, primes) in &sieved {
                emit(sink, segment, primes, stats);
            }
        }
    }
}

fn emit<S>(sink: &S, segment: &Segment, primes: &[Number], stats: &SieveStats)
where
    S: PrimeSink + ?Sized,
{
    stats.record_segment(primes.len());
    trace!(
        segment = segment.index(),
        low = segment.low(),
        high = segment.high(),
        primes = primes.len(),
        "segment sieved"
    );
    if let Err(e) = sink.append(primes) {
        error!(
            segment = segment.index(),
            low = segment.low(),
            high = segment.high(),
            "error writing segment primes: {e}"
        );
        stats.record_failed_write(primes.len());
    }
}
