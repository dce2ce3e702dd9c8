//! Generate command implementation.

use segsieve_core::{BinaryPrimeSink, Number, OutputOrder, SegmentedSieve, SieveConfig, SieveReport};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

/// Options for a generate run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Upper bound; prompted for when absent.
    pub limit: Option<Number>,
    /// Record file, truncated at start.
    pub output: PathBuf,
    /// Segment width.
    pub block_width: Number,
    /// Explicit worker count.
    pub threads: Option<usize>,
    /// Run on a single worker.
    pub sequential: bool,
    /// Write the file in ascending order.
    pub ordered: bool,
    /// Summary format (text, json).
    pub format: String,
}

impl GenerateOptions {
    fn config(&self) -> SieveConfig {
        let mut config = SieveConfig::new()
            .block_width(self.block_width)
            .parallel(!self.sequential);
        if let Some(threads) = self.threads {
            config = config.threads(threads);
        }
        if self.ordered {
            config = config.order(OutputOrder::Ascending);
        }
        config
    }
}

/// Runs the generate command.
///
/// Returns `None` when the output file could not be opened; that failure is
/// logged rather than returned.
pub fn run<R: BufRead, W: Write>(
    options: &GenerateOptions,
    input: &mut R,
    out: &mut W,
) -> Result<Option<SieveReport>, Box<dyn std::error::Error>> {
    let limit = match options.limit {
        Some(limit) => limit,
        None => crate::prompt(input, out, "Enter the maximum number to find primes up to: ")?,
    };

    let engine = SegmentedSieve::new(options.config())?;
    let processors = std::thread::available_parallelism().map_or(1, |n| n.get());

    writeln!(out, "Primes between 2 and {limit}\n")?;
    writeln!(
        out,
        "Using up to {} threads running on {} processors\n",
        engine.threads(),
        processors
    )?;

    let sink = match BinaryPrimeSink::create_file(&options.output) {
        Ok(sink) => sink,
        Err(e) => {
            error!("error opening {} for writing: {e}", options.output.display());
            return Ok(None);
        }
    };

    let report = engine.run(limit, &sink)?;
    info!(
        path = %options.output.display(),
        records = sink.records_written(),
        "prime records written"
    );

    match options.format.as_str() {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
        _ => {
            writeln!(
                out,
                "{} primes found in {:.3}s\n",
                report.count, report.elapsed_secs
            )?;
            if !report.is_complete() {
                writeln!(
                    out,
                    "{} segments ({} primes) could not be written to {}",
                    report.failed_segments,
                    report.lost_primes,
                    options.output.display()
                )?;
            }
        }
    }

    Ok(Some(report))
}
