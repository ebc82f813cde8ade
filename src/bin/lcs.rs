//! Prints the longest common substrings of two strings.
//!
//! The first string is indexed, the second is matched against it. The output is
//! the common length followed by every distinct substring of that length, one per
//! line, in sorted order.
//!
//! ```bash
//! echo "abcabxabcd abcabca" | cargo run --bin lcs
//! ```

use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use online_suffix_tree::{Alphabet, SuffixTree};

#[derive(Parser)]
#[command(name = "lcs")]
#[command(about = "Longest common substrings of two strings")]
struct Cli {
    /// String to index (read from stdin with QUERY when omitted)
    text: Option<String>,

    /// String to match against the index
    query: Option<String>,

    /// Restrict the alphabet to 7-bit ASCII
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (text, query) = match (cli.text, cli.query) {
        (Some(text), Some(query)) => (text, query),
        (None, None) => read_pair()?,
        _ => bail!("expected both TEXT and QUERY, or neither"),
    };

    let alphabet = if cli.ascii { Alphabet::ASCII } else { Alphabet::BYTES };
    let mut tree = SuffixTree::with_alphabet(alphabet);
    tree.insert(text.as_bytes()).context("cannot index the first string")?;
    let result = tree.longest_common_with(query.as_bytes());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", result.length)?;
    for s in &result.substrings {
        writeln!(out, "{}", String::from_utf8_lossy(s))?;
    }
    Ok(())
}

/// Reads the first two whitespace-separated tokens from stdin.
fn read_pair() -> Result<(String, String)> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).context("cannot read stdin")?;
    let mut tokens = input.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(text), Some(query)) => Ok((text.to_string(), query.to_string())),
        _ => bail!("stdin must hold two strings"),
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
fn init_tracing() {}
