//! segsieve CLI
//!
//! Shared pieces of the `primegen` and `primeload` binaries.
//!
//! # Binaries
//!
//! - `primegen` - Sieve `[2, N]` and write the primes to a record file
//! - `primeload` - Load a record file and print its primes

pub mod commands;

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Initializes logging on stderr, so stdout carries only program output.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Writes `message`, then reads one line from `input` and parses it.
///
/// # Errors
///
/// Returns an error if reading fails, input is exhausted, or the line does
/// not parse as `T`.
pub fn prompt<T, R, W>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::error::Error + 'static,
    R: BufRead,
    W: Write,
{
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err("no input given".into());
    }
    let value = line.trim().parse::<T>()?;
    Ok(value)
}
