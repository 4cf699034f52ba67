// src/error.rs
// =============================================================================
// Errors that abort the whole documentation check.
//
// Anything in here means the run cannot be trusted: the ignore patterns are
// broken, a built-in expression failed to compile, or a markdown file we were
// supposed to check could not be read. Per-link problems are NOT errors; they
// are collected as ValidationFailure values (see checker/link.rs) and the walk
// keeps going.
// =============================================================================

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An ignore or eligibility glob could not be compiled.
    #[error("invalid glob pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A built-in regular expression failed to compile.
    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    /// An eligible markdown file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
