// src/checker/lines.rs
// =============================================================================
// Opt-in check that a line anchor still points at the code it describes.
//
// The link title names an entry in the expectation table; the table holds a
// literal piece of source text (e.g. "type ContainerInfo struct {"). Here we
// open the file the relative link points at and make sure the anchored line
// contains that text. Only enabled with --verify-lines.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use super::link::FailureReason;

/// Compares line `line` (1-based) of the file `href` points at, relative to
/// `doc`, against `expected`.
pub fn verify(doc: &Path, href: &str, line: usize, expected: &str) -> Result<(), FailureReason> {
    let target = resolve(doc, href)?;

    let contents = fs::read_to_string(&target).map_err(|e| FailureReason::LineTargetUnreadable {
        path: target.clone(),
        reason: e.to_string(),
    })?;

    let found = line
        .checked_sub(1)
        .and_then(|index| contents.lines().nth(index))
        .ok_or_else(|| FailureReason::LineOutOfRange {
            path: target.clone(),
            line,
        })?;

    if found.contains(expected.trim()) {
        Ok(())
    } else {
        Err(FailureReason::LineMismatch {
            path: target,
            line,
            expected: expected.to_string(),
            found: found.trim().to_string(),
        })
    }
}

// Resolves `href` against the document the same way a browser would
// resolve it against the rendered page.
fn resolve(doc: &Path, href: &str) -> Result<PathBuf, FailureReason> {
    let unreadable = |reason: String| FailureReason::LineTargetUnreadable {
        path: doc.to_path_buf(),
        reason,
    };

    let absolute = fs::canonicalize(doc).map_err(|e| unreadable(e.to_string()))?;
    let base = Url::from_file_path(&absolute)
        .map_err(|()| unreadable("not an absolute file path".to_string()))?;
    let target = base.join(href).map_err(|e| unreadable(e.to_string()))?;
    target
        .to_file_path()
        .map_err(|()| unreadable(format!("{target} is not a local file")))
}
