// src/walk/filter.rs
// =============================================================================
// Decides which directory entries the walk checks, skips, or descends into.
//
// Patterns use shell-style globs matched against the entry's name only:
//   *        any run of characters except '/'
//   ?        any single character except '/'
//   [a-z]    character class, [^...] or [!...] negates it
//   \x       the literal character x
//
// Each glob is translated once into an anchored regex. A malformed glob is a
// configuration error and stops the run before anything is walked.
// =============================================================================

use std::iter::Peekable;
use std::str::Chars;

use regex::Regex;

use crate::config::Config;
use crate::error::{Error, Result};

/// What to do with one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Ignored file.
    SkipFile,
    /// Ignored directory: do not enter it at all.
    SkipDirectory,
    /// Directory to walk into; it is not a document itself.
    Descend,
    /// Eligible markdown file.
    Check,
}

#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    regex: Regex,
}

impl Glob {
    pub fn new(pattern: &str) -> Result<Self> {
        let source = translate(pattern).map_err(|reason| Error::Pattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Regex::new(&source)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

pub struct FileFilter {
    ignore: Vec<Glob>,
    markdown: Glob,
}

impl FileFilter {
    pub fn new(config: &Config) -> Result<Self> {
        let ignore = config
            .ignore_patterns
            .iter()
            .map(|p| Glob::new(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ignore,
            markdown: Glob::new(&config.markdown_pattern)?,
        })
    }

    pub fn decide(&self, name: &str, is_dir: bool) -> Decision {
        if let Some(glob) = self.ignore.iter().find(|g| g.is_match(name)) {
            log::trace!("{name} matches ignore pattern {}", glob.as_str());
            return if is_dir {
                Decision::SkipDirectory
            } else {
                Decision::SkipFile
            };
        }
        self.decide_root(name, is_dir)
    }

    /// Like `decide`, minus the ignore patterns: the walk root was asked for
    /// by name, so it is entered (or checked) even if it looks hidden.
    pub fn decide_root(&self, name: &str, is_dir: bool) -> Decision {
        if is_dir {
            Decision::Descend
        } else if self.markdown.is_match(name) {
            Decision::Check
        } else {
            Decision::SkipFile
        }
    }
}

fn translate(pattern: &str) -> std::result::Result<String, &'static str> {
    let mut re = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            '\\' => {
                let escaped = chars.next().ok_or("trailing backslash")?;
                push_literal(&mut re, escaped);
            }
            '[' => translate_class(&mut chars, &mut re)?,
            c => push_literal(&mut re, c),
        }
    }
    re.push('$');
    Ok(re)
}

// Consumes a class body up to and including the closing ']'.
fn translate_class(chars: &mut Peekable<Chars<'_>>, re: &mut String) -> std::result::Result<(), &'static str> {
    re.push('[');
    if matches!(chars.peek(), Some('^' | '!')) {
        chars.next();
        re.push('^');
    }

    let mut ranges = 0;
    loop {
        let lo = match chars.next() {
            None => return Err("unterminated character class"),
            Some(']') if ranges > 0 => break,
            Some(']') => return Err("empty character class"),
            Some('-') => return Err("range without a start"),
            Some('\\') => chars.next().ok_or("trailing backslash")?,
            Some(c) => c,
        };

        let hi = if chars.peek() == Some(&'-') {
            chars.next();
            match chars.next() {
                None => return Err("unterminated character class"),
                Some(']' | '-') => return Err("range without an end"),
                Some('\\') => chars.next().ok_or("trailing backslash")?,
                Some(c) => c,
            }
        } else {
            lo
        };
        if hi < lo {
            return Err("reversed range");
        }

        push_literal(re, lo);
        if hi != lo {
            re.push('-');
            push_literal(re, hi);
        }
        ranges += 1;
    }

    re.push(']');
    Ok(())
}

fn push_literal(re: &mut String, c: char) {
    re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}
