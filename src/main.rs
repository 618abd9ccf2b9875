//! Terminal keypad for the calculator core.
//!
//! ## Usage
//!
//! ```bash
//! keypad                      # type keys on stdin, one line at a time
//! keypad --eval "2 * (3 + 4)" # evaluate one expression
//! keypad --precision 4        # keep 4 fractional digits
//! ```
//!
//! On stdin each character is a key press. The words `enter`, `backspace`
//! and `escape` name the keys without a printable character.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use keypad_expr::{evaluate_str, Calculator, DisplayOptions, DEFAULT_PRECISION};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keypad", version, about = "Keypad calculator")]
struct Cli {
    /// Evaluate one expression, print the result and exit.
    #[arg(short, long)]
    eval: Option<String>,

    /// Fractional digits kept in non-integer results.
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = DisplayOptions {
        precision: cli.precision,
    };

    let result = match cli.eval {
        Some(expression) => eval_once(&expression, &options),
        None => run_keypad(options),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn eval_once(expression: &str, options: &DisplayOptions) -> Result<ExitCode> {
    match evaluate_str(expression, options) {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(%error, expression, "evaluation failed");
            println!("Error");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_keypad(options: DisplayOptions) -> Result<ExitCode> {
    let mut calculator = Calculator::new(options);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        for key in split_keys(&line) {
            if calculator.press_key(key)?.is_none() {
                tracing::debug!(key, "ignoring unmapped key");
            }
        }
        let screen = calculator.screen();
        writeln!(stdout, "{}", screen.expression)?;
        writeln!(stdout, "= {}", screen.result)?;
        stdout.flush()?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Splits an input line into key names. Whitespace separates words; a named
/// key word becomes that key and any other word is one key per character.
fn split_keys(line: &str) -> Vec<&str> {
    let mut keys = Vec::new();
    for word in line.split_whitespace() {
        match word.to_ascii_lowercase().as_str() {
            "enter" => keys.push("Enter"),
            "backspace" => keys.push("Backspace"),
            "escape" | "esc" => keys.push("Escape"),
            _ => keys.extend(word.char_indices().map(|(i, c)| &word[i..i + c.len_utf8()])),
        }
    }
    keys
}
