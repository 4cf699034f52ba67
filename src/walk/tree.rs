// src/walk/tree.rs
// =============================================================================
// This module walks a documentation tree and checks every eligible file.
//
// How it works:
// 1. Visit entries depth-first, a directory before its children, with the
//    names at each level in sorted order so repeated runs agree
// 2. Ask the FileFilter what to do with each entry (the root itself is
//    exempt from the ignore patterns)
// 3. Read each eligible markdown file and render it with a fresh
//    DocumentVisitor bound to that file's path
//
// Errors:
// - An entry we cannot stat or list is skipped
// - An eligible file we cannot read aborts the walk
// =============================================================================

use std::fs;
use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use super::filter::{Decision, FileFilter};
use crate::checker::{DocumentVisitor, FileOutcome, LinkValidator};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::markdown::{Extensions, Markdown};

pub struct TreeWalker<'c> {
    filter: FileFilter,
    markdown: Markdown,
    validator: LinkValidator<'c>,
}

impl<'c> TreeWalker<'c> {
    pub fn new(config: &'c Config) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(config)?,
            markdown: Markdown::new(Extensions::DOCS)?,
            validator: LinkValidator::new(config)?,
        })
    }

    /// Checks every eligible file under `root`, in walk order.
    pub fn walk(&self, root: &Path) -> Result<Vec<FileOutcome>> {
        let mut outcomes = Vec::new();
        let mut entries = WalkDir::new(root).sort_by_file_name().into_iter();

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("Skipping entry: {}", err);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy();
            let is_dir = entry.file_type().is_dir();
            let decision = if entry.depth() == 0 {
                self.filter.decide_root(&name, is_dir)
            } else {
                self.filter.decide(&name, is_dir)
            };
            match decision {
                Decision::SkipDirectory => {
                    debug!("Skipping directory {}", entry.path().display());
                    entries.skip_current_dir();
                }
                Decision::SkipFile | Decision::Descend => {}
                Decision::Check => outcomes.push(self.check_file(entry.path())?),
            }
        }

        Ok(outcomes)
    }

    /// Reads and checks one markdown file.
    pub fn check_file(&self, path: &Path) -> Result<FileOutcome> {
        let input = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Checking {}", path.display());
        let text = String::from_utf8_lossy(&input);
        let mut visitor = DocumentVisitor::new(path, &self.validator);
        self.markdown.render(&text, &mut visitor);
        Ok(visitor.finish())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `while let` instead of `for entry in entries`?
//    - A for loop borrows the iterator for the whole loop
//    - We need `entries.skip_current_dir()` in the middle of the loop,
//      which needs its own mutable borrow
//    - `while let Some(x) = it.next()` only borrows for each next() call
//
// 2. What does to_string_lossy() return?
//    - A Cow<str>: borrowed when the file name is valid UTF-8, owned (with
//      replacement characters) when it is not
//    - Either way we can pass &name where a &str is expected
//
// 3. Why does the walker own the validator and the parser setup?
//    - They are built once per run and reused for every file
//    - Each file still gets its own DocumentVisitor, so nothing leaks
//      from one document into the next
// -----------------------------------------------------------------------------
