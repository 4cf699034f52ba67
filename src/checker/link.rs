// src/checker/link.rs
// =============================================================================
// This module decides whether a single markdown link is sound.
//
// Rules, in order:
// 1. The href must parse as a URL (relative references are fine).
// 2. Absolute links into this project's own repository on the hosting
//    domain must be written as relative links instead. Any other absolute
//    link (other hosts, other repositories on the hosting domain) is
//    external and is not checked further.
// 3. A GitHub line anchor (#L42, #L42&foo, #x&L42) must carry a link title,
//    and that title must be registered in the line expectation table with
//    the source text the anchor is meant to point at.
//
// A link can fail more than one rule (an absolute self-link with an
// untitled line anchor fails both 2 and 3). No failure stops the walk.
// =============================================================================

use std::fmt;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use regex::Regex;
use url::{ParseError, Url};

use super::lines;
use crate::config::Config;

// Fragment of a GitHub link to one line, possibly among other parameters.
const LINE_ANCHOR: &str = r"^(?:.*&)?L([0-9]+)(?:&.*)?$";

// Relative references are resolved against this so that the url crate
// still splits out their path and fragment.
const RELATIVE_BASE: &str = "file:///";

/// Why a link failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("malformed URL ({0})")]
    MalformedUrl(ParseError),

    #[error("should be relative")]
    ShouldBeRelative,

    #[error("github line links must have a descriptive title")]
    UntitledLineAnchor,

    #[error("no expectation registered for title {title:?}")]
    NoExpectation { title: String },

    #[error("invalid line number ({0})")]
    InvalidLineNumber(ParseIntError),

    #[error("cannot read line anchor target {} ({reason})", path.display())]
    LineTargetUnreadable { path: PathBuf, reason: String },

    #[error("line {line} is past the end of {}", path.display())]
    LineOutOfRange { path: PathBuf, line: usize },

    #[error("line {line} of {} does not contain {expected:?} (found {found:?})", path.display())]
    LineMismatch {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },
}

/// One failed link, attributed to the document it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub path: PathBuf,
    pub reason: FailureReason,
    /// The offending href, as written in the document.
    pub value: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.path.display(), self.reason, self.value)
    }
}

/// An href split into the parts the rules look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHref {
    /// True when the href carries its own scheme.
    pub absolute: bool,
    pub host: Option<String>,
    pub path: String,
    pub fragment: Option<String>,
}

impl ParsedHref {
    pub fn parse(href: &str) -> Result<Self, ParseError> {
        match Url::parse(href) {
            Ok(url) => Ok(Self::from_url(&url, true)),
            Err(ParseError::RelativeUrlWithoutBase) => {
                let url = Url::parse(RELATIVE_BASE)?.join(href)?;
                Ok(Self::from_url(&url, false))
            }
            Err(err) => Err(err),
        }
    }

    fn from_url(url: &Url, absolute: bool) -> Self {
        Self {
            absolute,
            host: url.host_str().map(str::to_string),
            path: url.path().to_string(),
            fragment: url.fragment().map(str::to_string),
        }
    }
}

pub struct LinkValidator<'c> {
    config: &'c Config,
    line_anchor: Regex,
}

impl<'c> LinkValidator<'c> {
    pub fn new(config: &'c Config) -> crate::error::Result<Self> {
        Ok(Self {
            config,
            line_anchor: Regex::new(LINE_ANCHOR)?,
        })
    }

    /// Checks one link found in `doc`.
    ///
    /// Returns every rule the link breaks; an empty Vec means the link is fine.
    pub fn check_link(&self, doc: &Path, text: &str, title: &str, href: &str) -> Vec<ValidationFailure> {
        debug!("[{}] checking link {:?} -> {:?}", doc.display(), text, href);

        let mut failures = Vec::new();
        let fail = |reason| ValidationFailure {
            path: doc.to_path_buf(),
            reason,
            value: href.to_string(),
        };

        let parsed = match ParsedHref::parse(href) {
            Ok(parsed) => parsed,
            Err(err) => {
                failures.push(fail(FailureReason::MalformedUrl(err)));
                return failures;
            }
        };

        if parsed.absolute {
            if parsed.host.as_deref() != Some(self.config.hosting_domain.as_str()) {
                trace!("[{}] not {}: {:?}", doc.display(), self.config.hosting_domain, parsed.host);
                return failures;
            }
            if !parsed.path.starts_with(&self.config.project_prefix) {
                trace!("[{}] outside {}: {}", doc.display(), self.config.project_prefix, parsed.path);
                return failures;
            }
            // Links into our own repository go stale when it moves
            failures.push(fail(FailureReason::ShouldBeRelative));
        }

        let Some(digits) = self.line_anchor_digits(&parsed) else {
            trace!("[{}] no line anchor: {:?}", doc.display(), parsed.fragment);
            return failures;
        };

        if title.is_empty() {
            failures.push(fail(FailureReason::UntitledLineAnchor));
            return failures;
        }

        let Some(expected) = self.config.line_expectations.get(title) else {
            failures.push(fail(FailureReason::NoExpectation {
                title: title.to_string(),
            }));
            return failures;
        };

        let line: usize = match digits.parse() {
            Ok(line) => line,
            Err(err) => {
                failures.push(fail(FailureReason::InvalidLineNumber(err)));
                return failures;
            }
        };

        // Absolute anchors point at another checkout; only local files are compared
        if self.config.verify_lines && !parsed.absolute {
            if let Err(reason) = lines::verify(doc, href, line, expected) {
                failures.push(fail(reason));
            }
        }

        failures
    }

    fn line_anchor_digits<'h>(&self, parsed: &'h ParsedHref) -> Option<&'h str> {
        let fragment = parsed.fragment.as_deref()?;
        let captures = self.line_anchor.captures(fragment)?;
        captures.get(1).map(|m| m.as_str())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Some(x) = value else { return ...; };` binds x when the pattern
//      matches and runs the else block (which must diverge) when it doesn't
//    - It keeps the happy path flat instead of nesting match arms
//
// 2. Why return a Vec instead of Result<(), ValidationFailure>?
//    - One link can break two rules at once (absolute self-link AND an
//      untitled line anchor), and we want to report both
//
// 3. Why does the validator take the document path?
//    - Every failure must say which file it came from
//    - Building the failure here, with the path, means it can't be forgotten
// -----------------------------------------------------------------------------
