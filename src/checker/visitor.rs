// src/checker/visitor.rs
// =============================================================================
// The renderer that walks one markdown document and checks its links.
//
// It is built fresh for every file and bound to that file's path, so every
// failure it records is attributed to the right document. Per callback it
// does one of three things:
//
// - forward: plain text is copied into the output buffer
// - validate: explicit links go through the LinkValidator
// - discard: everything else renders nothing
//
// Headers, paragraphs, lists and the footnote list get their children lazily
// and always go through `advance`, which rolls the buffer back when the
// children turn out to be empty. Some markdown parsers emit stray bytes for
// empty block containers; the rollback keeps them out of the output.
// =============================================================================

use std::path::{Path, PathBuf};

use log::{debug, trace};

use super::link::{LinkValidator, ValidationFailure};
use crate::markdown::{Alignment, AutolinkKind, Children, ListFlags, Renderer};

/// What checking one document produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Explicit `[text](href)` links seen in the document.
    pub links_checked: usize,
    pub failures: Vec<ValidationFailure>,
}

pub struct DocumentVisitor<'v> {
    path: &'v Path,
    validator: &'v LinkValidator<'v>,
    links_checked: usize,
    failures: Vec<ValidationFailure>,
}

impl<'v> DocumentVisitor<'v> {
    pub fn new(path: &'v Path, validator: &'v LinkValidator<'v>) -> Self {
        Self {
            path,
            validator,
            links_checked: 0,
            failures: Vec::new(),
        }
    }

    pub fn finish(self) -> FileOutcome {
        FileOutcome {
            path: self.path.to_path_buf(),
            links_checked: self.links_checked,
            failures: self.failures,
        }
    }

    fn advance(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
        let marker = out.len();
        if !text.render(self, out) {
            out.truncate(marker);
        }
    }
}

impl Renderer for DocumentVisitor<'_> {
    fn block_code(&mut self, _out: &mut Vec<u8>, _text: &[u8], _lang: &str) {}
    fn block_quote(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn block_html(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}

    fn header(&mut self, out: &mut Vec<u8>, text: Children<'_>, _level: usize, _id: Option<&str>) {
        self.advance(out, text);
    }

    fn hrule(&mut self, _out: &mut Vec<u8>) {}

    fn list(&mut self, out: &mut Vec<u8>, text: Children<'_>, flags: ListFlags) {
        trace!("[{}] list (ordered: {})", self.path.display(), flags.ordered);
        self.advance(out, text);
    }

    fn list_item(&mut self, _out: &mut Vec<u8>, _text: &[u8], _flags: ListFlags) {}

    fn paragraph(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
        self.advance(out, text);
    }

    fn table(&mut self, _out: &mut Vec<u8>, _header: &[u8], _body: &[u8], _columns: &[Alignment]) {}
    fn table_row(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn table_header_cell(&mut self, _out: &mut Vec<u8>, _text: &[u8], _align: Alignment) {}
    fn table_cell(&mut self, _out: &mut Vec<u8>, _text: &[u8], _align: Alignment) {}

    fn footnotes(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
        self.advance(out, text);
    }

    fn footnote_item(&mut self, _out: &mut Vec<u8>, _name: &str, _text: &[u8]) {}
    fn title_block(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}

    fn autolink(&mut self, _out: &mut Vec<u8>, link: &str, _kind: AutolinkKind) {
        // Bare URLs are not validated
        trace!("[{}] found autolink: {}", self.path.display(), link);
    }

    fn code_span(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn double_emphasis(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn emphasis(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn triple_emphasis(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn strikethrough(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {}
    fn image(&mut self, _out: &mut Vec<u8>, _link: &str, _title: &str, _alt: &[u8]) {}
    fn line_break(&mut self, _out: &mut Vec<u8>) {}

    fn link(&mut self, _out: &mut Vec<u8>, link: &str, title: &str, content: &[u8]) {
        debug!("[{}] found link: {:?}", self.path.display(), link);
        self.links_checked += 1;
        let text = String::from_utf8_lossy(content);
        let failures = self.validator.check_link(self.path, &text, title, link);
        self.failures.extend(failures);
    }

    fn raw_html_tag(&mut self, _out: &mut Vec<u8>, _tag: &[u8]) {}
    fn footnote_ref(&mut self, _out: &mut Vec<u8>, _name: &str, _id: usize) {}

    fn normal_text(&mut self, out: &mut Vec<u8>, text: &[u8]) {
        trace!("[{}] found text: {}", self.path.display(), String::from_utf8_lossy(text));
        out.extend_from_slice(text);
    }

    fn document_header(&mut self, _out: &mut Vec<u8>) {}
    fn document_footer(&mut self, _out: &mut Vec<u8>) {}
}
