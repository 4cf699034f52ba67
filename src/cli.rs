// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "doc-links",
    version,
    about = "Check the links in a project's markdown documentation",
    long_about = "doc-links walks a documentation tree and checks every markdown link against a few \
                  soundness rules: links into this repository must be relative, and GitHub line \
                  anchors must carry a title registered with the source text they point at. \
                  No network requests are made."
)]
pub struct Cli {
    /// Print more diagnostics (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every markdown file under a path
    ///
    /// Example: doc-links check docs/ --verify-lines
    Check {
        /// Directory (or single markdown file) to check
        #[arg(default_value = "docs")]
        root: PathBuf,

        /// Also open the files that line anchors point at and compare the
        /// anchored line with the registered source text
        #[arg(long)]
        verify_lines: bool,
    },

    /// List the registered line-anchor titles and the source text they expect
    Expectations,
}
