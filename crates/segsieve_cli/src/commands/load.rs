//! Load command implementation.

use segsieve_core::{load_primes_from_path, Number};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Options for a load run.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Record file; prompted for when absent.
    pub path: Option<PathBuf>,
    /// Print in ascending order instead of file order.
    pub sort: bool,
    /// Print only the number of records.
    pub count: bool,
}

/// Runs the load command and returns the loaded primes.
///
/// An unreadable file is logged by the loader and prints an empty line.
pub fn run<R: BufRead, W: Write>(
    options: &LoadOptions,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<Number>, Box<dyn std::error::Error>> {
    let path = match &options.path {
        Some(path) => path.clone(),
        None => crate::prompt(
            input,
            out,
            "Insert the name of the .bin file you want to open: ",
        )?,
    };

    let mut primes = load_primes_from_path(&path);
    if options.sort {
        primes.sort_unstable();
    }

    if options.count {
        writeln!(out, "{}", primes.len())?;
    } else {
        write_primes(out, &primes)?;
    }
    out.flush()?;
    Ok(primes)
}

/// Writes `primes` space-separated, followed by a newline.
pub fn write_primes<W: Write>(out: &mut W, primes: &[Number]) -> std::io::Result<()> {
    for (i, prime) in primes.iter().enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{prime}")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use segsieve_core::encode_records;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn formats_space_separated() {
        let mut out = Vec::new();
        write_primes(&mut out, &[2, 3, 5]).unwrap();
        assert_eq!(out, b"2 3 5\n");

        let mut out = Vec::new();
        write_primes(&mut out, &[]).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn prompts_for_path_and_prints_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("primes.bin");
        let mut bytes = Vec::new();
        encode_records(&[7, 2, 5], &mut bytes);
        std::fs::write(&path, &bytes).unwrap();

        let mut input = Cursor::new(format!("{}\n", path.display()));
        let mut out = Vec::new();
        let primes = run(&LoadOptions::default(), &mut input, &mut out).unwrap();

        assert_eq!(primes, vec![7, 2, 5]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("7 2 5\n"));
    }

    #[test]
    fn sort_and_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("primes.bin");
        let mut bytes = Vec::new();
        encode_records(&[7, 2, 5], &mut bytes);
        std::fs::write(&path, &bytes).unwrap();

        let mut out = Vec::new();
        let options = LoadOptions {
            path: Some(path.clone()),
            sort: true,
            count: false,
        };
        run(&options, &mut Cursor::new(""), &mut out).unwrap();
        assert_eq!(out, b"2 5 7\n");

        let mut out = Vec::new();
        let options = LoadOptions {
            path: Some(path),
            sort: false,
            count: true,
        };
        run(&options, &mut Cursor::new(""), &mut out).unwrap();
        assert_eq!(out, b"3\n");
    }

    #[test]
    fn missing_file_prints_empty_line() {
        let dir = tempdir().unwrap();
        let options = LoadOptions {
            path: Some(dir.path().join("nope.bin")),
            ..LoadOptions::default()
        };
        let mut out = Vec::new();
        let primes = run(&options, &mut Cursor::new(""), &mut out).unwrap();
        assert!(primes.is_empty());
        assert_eq!(out, b"\n");
    }
}
