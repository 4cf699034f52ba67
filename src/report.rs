// src/report.rs
// =============================================================================
// This module runs a documentation check and reports the result.
//
// `run_check` is the harness: it builds the walker from the configuration,
// walks the root, and wraps the per-file outcomes in a Report. The Report
// prints every failure as
//
//   [<file-path>] <reason>: <offending-value>
//
// followed by a short summary. The run passes only with zero failures.
// =============================================================================

use std::io::{self, Write};
use std::path::Path;

use crate::checker::{FileOutcome, ValidationFailure};
use crate::config::Config;
use crate::error::Result;
use crate::walk::TreeWalker;

/// Walks `root` with `config` and collects everything that was found.
pub fn run_check(config: &Config, root: &Path) -> Result<Report> {
    let walker = TreeWalker::new(config)?;
    let outcomes = walker.walk(root)?;
    Ok(Report::new(outcomes))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<FileOutcome>,
}

impl Report {
    pub fn new(outcomes: Vec<FileOutcome>) -> Self {
        Self { outcomes }
    }

    /// All failures, file by file in walk order.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.outcomes.iter().flat_map(|o| o.failures.iter())
    }

    pub fn files_checked(&self) -> usize {
        self.outcomes.len()
    }

    pub fn links_checked(&self) -> usize {
        self.outcomes.iter().map(|o| o.links_checked).sum()
    }

    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Prints failures and a summary.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for failure in self.failures() {
            writeln!(out, "{}", failure)?;
        }
        if !self.passed() {
            writeln!(out)?;
        }

        writeln!(out, "📊 Summary:")?;
        writeln!(out, "   📄 Files: {}", self.files_checked())?;
        writeln!(out, "   🔗 Links: {}", self.links_checked())?;
        writeln!(out, "   ❌ Failures: {}", self.failures().count())?;
        Ok(())
    }
}
