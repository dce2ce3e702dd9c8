//! primegen
//!
//! Sieves `[2, N]` with the segmented sieve and writes every prime to a
//! binary record file. Prompts for `N` when `--limit` is not given.

use clap::Parser;
use segsieve_cli::commands::generate::{self, GenerateOptions};
use segsieve_core::{Number, DEFAULT_BLOCK_WIDTH};
use std::io;
use std::path::PathBuf;
use tracing::error;

/// Segmented Sieve of Eratosthenes prime generator.
#[derive(Parser)]
#[command(name = "primegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Upper bound of the sieve (prompted for if omitted)
    #[arg(short, long)]
    limit: Option<Number>,

    /// Output record file, truncated at start
    #[arg(short, long, default_value = "primes.bin")]
    output: PathBuf,

    /// Candidates per segment
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_WIDTH)]
    block_width: Number,

    /// Worker threads (defaults to the number of logical processors)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Sieve on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write primes in ascending order
    #[arg(long)]
    ordered: bool,

    /// Summary format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    segsieve_cli::init_logging(cli.verbose);

    let options = GenerateOptions {
        limit: cli.limit,
        output: cli.output,
        block_width: cli.block_width,
        threads: cli.threads,
        sequential: cli.sequential,
        ordered: cli.ordered,
        format: cli.format,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = generate::run(&options, &mut stdin.lock(), &mut stdout.lock()) {
        error!("{e}");
    }
}
