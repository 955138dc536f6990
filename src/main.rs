//! Program that converts relational algebra to SQL.
//!
//! Reads one expression from standard input and prints its translation. Set
//! `RUST_LOG=debug` to see the parsed expression and generated SQL on
//! standard error.

use std::io::{self, BufRead, Write};

use ra2sql::translate::parse_and_translate;

fn main() -> io::Result<()> {
    init_logging();

    let stdin = io::stdin();
    let mut buf = Vec::new();
    if stdin.lock().read_until(b'\n', &mut buf)? == 0 {
        return Ok(());
    }
    // Invalid bytes become U+FFFD, which the parser rejects like any other
    // unexpected character.
    let line = String::from_utf8_lossy(&buf);
    let input = line.strip_suffix('\n').unwrap_or(&line);
    let input = input.strip_suffix('\r').unwrap_or(input);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", parse_and_translate(input))?;
    out.flush()
}

/// Installs the logger, reading the filter from `RUST_LOG`.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("off");
    let _ = env_logger::Builder::from_env(env).try_init();
}
