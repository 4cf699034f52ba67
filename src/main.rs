// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging at the verbosity the user asked for
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = all links sound, 1 = failures, 2 = error)
// =============================================================================

mod checker; // src/checker/ - link rules and the document visitor
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - compiled-in settings
mod error; // src/error.rs - errors that abort a run
mod markdown; // src/markdown/ - callback rendering over pulldown-cmark
mod report; // src/report.rs - runs a check and prints the result
mod walk; // src/walk/ - finds the files to check

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::{warn, LevelFilter};

use cli::{Cli, Commands};
use config::Config;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level_filter(cli.verbose))
        .init();

    std::process::exit(exit_code(run(cli)));
}

fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            // The whole chain: what aborted, and why
            eprintln!("Error: {:#}", e);
            2
        }
    }
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// Returns:
//   Ok(0) = every link is sound
//   Ok(1) = validation failures found
//   Err = the check could not run to completion
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check { root, verify_lines } => handle_check(&root, verify_lines),
        Commands::Expectations => {
            handle_expectations();
            Ok(0)
        }
    }
}

fn handle_check(root: &Path, verify_lines: bool) -> Result<i32> {
    let config = Config::default().with_verify_lines(verify_lines);
    check(&config, root, &mut io::stdout().lock())
}

fn check<W: Write>(config: &Config, root: &Path, out: &mut W) -> Result<i32> {
    if !root.exists() {
        warn!("{} does not exist, nothing to check", root.display());
    }
    writeln!(out, "🔍 Checking documentation links under {}", root.display())?;

    let report = report::run_check(config, root)
        .with_context(|| format!("documentation check of {} aborted", root.display()))?;

    report.write_to(out)?;

    if report.passed() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn handle_expectations() {
    let config = Config::default();
    for (title, line) in &config.line_expectations {
        println!("{:<40} {}", title, line);
    }
}
