//! primeload
//!
//! Loads a binary prime record file and prints its values. Prompts for the
//! path when none is given.

use clap::Parser;
use segsieve_cli::commands::load::{self, LoadOptions};
use std::io;
use std::path::PathBuf;
use tracing::error;

/// Prints the primes stored in a record file.
#[derive(Parser)]
#[command(name = "primeload")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Record file to read (prompted for if omitted)
    path: Option<PathBuf>,

    /// Print in ascending order instead of file order
    #[arg(short, long)]
    sort: bool,

    /// Print only the number of records
    #[arg(short, long)]
    count: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    segsieve_cli::init_logging(cli.verbose);

    let options = LoadOptions {
        path: cli.path,
        sort: cli.sort,
        count: cli.count,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(e) = load::run(&options, &mut stdin.lock(), &mut out) {
        error!("{e}");
    }
}
