// src/markdown/render.rs
// =============================================================================
// Callback-driven rendering on top of pulldown-cmark.
//
// pulldown-cmark hands out a flat stream of events (Start(tag) ... End(tag)).
// Link checking is easier to express as a renderer with one callback per
// element kind, so this module replays the event stream as callbacks:
//
// - Containers whose children are inline text (headers, paragraphs, lists,
//   the footnote list) receive a lazy `Children` continuation. The callback
//   decides whether to render it and what to do with the output.
// - Every other container gets its children rendered first into a scratch
//   buffer and receives the finished bytes. That way a link nested in a
//   table cell or a block quote still reaches the `link` callback even when
//   the table or quote throws its own output away.
//
// Rust concepts:
// - Traits with generic callers: `render` works for any `R: Renderer`
// - Slices of events: children are just sub-slices between Start and End
// =============================================================================

use std::collections::HashMap;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, LinkType, Options, Parser, Tag};
use regex::Regex;

use crate::error::Result;

// Bare URLs for the autolink extension. The last character may not be
// trailing punctuation so "see https://example.com." links without the dot.
const BARE_URL: &str = r#"\b(?:https?://|www\.)[^\s<>]*[^\s<>.,:;!?"')\]]"#;

/// Optional parser behavior.
///
/// Fenced code blocks and block elements that start without a blank line
/// before them are part of CommonMark, so they are always on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extensions {
    /// Turn bare URLs in text into `autolink` callbacks.
    pub autolink: bool,
    /// Treat leading `%` lines as a title block.
    pub title_block: bool,
}

impl Extensions {
    /// What the documentation check parses with.
    pub const DOCS: Extensions = Extensions {
        autolink: true,
        title_block: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutolinkKind {
    Normal,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListFlags {
    pub ordered: bool,
}

/// One callback per markdown element kind.
///
/// `out` is the buffer the current region renders into. Callbacks that get a
/// `Children` decide themselves whether the nested content is rendered.
pub trait Renderer {
    // Block-level callbacks
    fn block_code(&mut self, out: &mut Vec<u8>, text: &[u8], lang: &str);
    fn block_quote(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn block_html(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn header(&mut self, out: &mut Vec<u8>, text: Children<'_>, level: usize, id: Option<&str>);
    fn hrule(&mut self, out: &mut Vec<u8>);
    fn list(&mut self, out: &mut Vec<u8>, text: Children<'_>, flags: ListFlags);
    fn list_item(&mut self, out: &mut Vec<u8>, text: &[u8], flags: ListFlags);
    fn paragraph(&mut self, out: &mut Vec<u8>, text: Children<'_>);
    fn table(&mut self, out: &mut Vec<u8>, header: &[u8], body: &[u8], columns: &[Alignment]);
    fn table_row(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn table_header_cell(&mut self, out: &mut Vec<u8>, text: &[u8], align: Alignment);
    fn table_cell(&mut self, out: &mut Vec<u8>, text: &[u8], align: Alignment);
    fn footnotes(&mut self, out: &mut Vec<u8>, text: Children<'_>);
    fn footnote_item(&mut self, out: &mut Vec<u8>, name: &str, text: &[u8]);
    fn title_block(&mut self, out: &mut Vec<u8>, text: &[u8]);

    // Span-level callbacks
    fn autolink(&mut self, out: &mut Vec<u8>, link: &str, kind: AutolinkKind);
    fn code_span(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn double_emphasis(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn emphasis(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn triple_emphasis(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn strikethrough(&mut self, out: &mut Vec<u8>, text: &[u8]);
    fn image(&mut self, out: &mut Vec<u8>, link: &str, title: &str, alt: &[u8]);
    fn line_break(&mut self, out: &mut Vec<u8>);
    fn link(&mut self, out: &mut Vec<u8>, link: &str, title: &str, content: &[u8]);
    fn raw_html_tag(&mut self, out: &mut Vec<u8>, tag: &[u8]);
    fn footnote_ref(&mut self, out: &mut Vec<u8>, name: &str, id: usize);

    // Low-level callbacks
    fn normal_text(&mut self, out: &mut Vec<u8>, text: &[u8]);

    // Document boundaries
    fn document_header(&mut self, out: &mut Vec<u8>);
    fn document_footer(&mut self, out: &mut Vec<u8>);
}

/// The not-yet-rendered content of a container.
pub struct Children<'a> {
    events: &'a [Event<'a>],
    ctx: &'a Context<'a>,
    scope: Scope,
    footnotes: bool,
}

impl Children<'_> {
    /// Renders the nested content into `out`.
    ///
    /// Returns false when the region wrote nothing at all.
    pub fn render<R: Renderer + ?Sized>(self, renderer: &mut R, out: &mut Vec<u8>) -> bool {
        let start = out.len();
        if self.footnotes {
            render_footnote_items(self.events, renderer, out, self.ctx);
        } else {
            render_events(self.events, renderer, out, self.ctx, self.scope);
        }
        out.len() > start
    }
}

/// A configured markdown pipeline. Build once, render many documents.
pub struct Markdown {
    extensions: Extensions,
    bare_url: Regex,
}

impl Markdown {
    pub fn new(extensions: Extensions) -> Result<Self> {
        Ok(Self {
            extensions,
            bare_url: Regex::new(BARE_URL)?,
        })
    }

    /// Parses `input` and replays it as callbacks on `renderer`.
    ///
    /// Returns whatever the renderer wrote to the top-level buffer.
    pub fn render<R: Renderer + ?Sized>(&self, input: &str, renderer: &mut R) -> Vec<u8> {
        let mut out = Vec::new();
        renderer.document_header(&mut out);

        let (title, body) = if self.extensions.title_block {
            split_title_block(input)
        } else {
            (None, input)
        };
        if let Some(title) = title {
            renderer.title_block(&mut out, title.as_bytes());
        }

        let events: Vec<Event<'_>> = Parser::new_ext(body, parser_options()).collect();
        let ctx = Context {
            bare_url: self.extensions.autolink.then_some(&self.bare_url),
            footnote_ids: number_footnotes(&events),
        };

        render_events(&events, renderer, &mut out, &ctx, Scope::default());

        let has_footnotes = events
            .iter()
            .any(|e| matches!(e, Event::Start(Tag::FootnoteDefinition(_))));
        if has_footnotes {
            let children = Children {
                events: &events,
                ctx: &ctx,
                scope: Scope::default(),
                footnotes: true,
            };
            renderer.footnotes(&mut out, children);
        }

        renderer.document_footer(&mut out);
        out
    }
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

// Shared, read-only state for one document.
struct Context<'a> {
    bare_url: Option<&'a Regex>,
    // Footnote name -> number, in order of first reference
    footnote_ids: HashMap<String, usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    inline: bool,
    in_link: bool,
    list: ListFlags,
}

impl Scope {
    fn inline(self) -> Self {
        Scope { inline: true, ..self }
    }

    fn link(self) -> Self {
        Scope {
            inline: true,
            in_link: true,
            ..self
        }
    }

    fn block(self) -> Self {
        Scope {
            inline: false,
            ..self
        }
    }
}

fn split_title_block(input: &str) -> (Option<String>, &str) {
    let mut title = Vec::new();
    let mut rest = input;
    while rest.starts_with('%') {
        let (line, tail) = rest.split_once('\n').unwrap_or((rest, ""));
        title.push(line.trim_start_matches('%').trim());
        rest = tail;
    }
    if title.is_empty() {
        (None, input)
    } else {
        (Some(title.join("\n")), rest)
    }
}

fn number_footnotes(events: &[Event<'_>]) -> HashMap<String, usize> {
    let mut ids = HashMap::new();
    for event in events {
        if let Event::FootnoteReference(name) = event {
            let next = ids.len() + 1;
            ids.entry(name.to_string()).or_insert(next);
        }
    }
    ids
}

// Index of the End event closing the Start at `start`.
fn matching_end(events: &[Event<'_>], start: usize) -> usize {
    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate().skip(start) {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    events.len()
}

// Top-level (tag, children) pairs of a region, skipping loose events.
fn child_tags<'e, 'a>(events: &'e [Event<'a>]) -> Vec<(&'e Tag<'a>, &'e [Event<'a>])> {
    let mut children = Vec::new();
    let mut i = 0;
    while i < events.len() {
        if let Event::Start(tag) = &events[i] {
            let close = matching_end(events, i);
            children.push((tag, &events[i + 1..close.min(events.len())]));
            i = close;
        }
        i += 1;
    }
    children
}

fn render_nested<R: Renderer + ?Sized>(
    events: &[Event<'_>],
    renderer: &mut R,
    ctx: &Context<'_>,
    scope: Scope,
) -> Vec<u8> {
    let mut buf = Vec::new();
    render_events(events, renderer, &mut buf, ctx, scope);
    buf
}

fn render_events<R: Renderer + ?Sized>(
    events: &[Event<'_>],
    renderer: &mut R,
    out: &mut Vec<u8>,
    ctx: &Context<'_>,
    scope: Scope,
) {
    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(tag) => {
                let close = matching_end(events, i);
                render_tag(tag, &events[i + 1..close.min(events.len())], renderer, out, ctx, scope);
                i = close;
            }
            // Only reachable with unbalanced input
            Event::End(_) => {}
            Event::Text(text) => render_text(text, renderer, out, ctx, scope),
            Event::Code(code) => renderer.code_span(out, code.as_bytes()),
            Event::Html(html) => {
                if scope.inline {
                    renderer.raw_html_tag(out, html.as_bytes());
                } else {
                    renderer.block_html(out, html.as_bytes());
                }
            }
            Event::FootnoteReference(name) => {
                let id = ctx.footnote_ids.get(&**name).copied().unwrap_or_default();
                renderer.footnote_ref(out, name, id);
            }
            Event::SoftBreak => renderer.normal_text(out, b"\n"),
            Event::HardBreak => renderer.line_break(out),
            Event::Rule => renderer.hrule(out),
            Event::TaskListMarker(_) => {}
        }
        i += 1;
    }
}

fn render_tag<'a, R: Renderer + ?Sized>(
    tag: &Tag<'_>,
    inner: &'a [Event<'a>],
    renderer: &mut R,
    out: &mut Vec<u8>,
    ctx: &'a Context<'a>,
    scope: Scope,
) {
    let children = |scope: Scope| Children {
        events: inner,
        ctx,
        scope,
        footnotes: false,
    };

    match tag {
        Tag::Paragraph => renderer.paragraph(out, children(scope.inline())),
        Tag::Heading(level, id, _classes) => {
            renderer.header(out, children(scope.inline()), *level as usize, *id)
        }
        Tag::BlockQuote => {
            let text = render_nested(inner, renderer, ctx, scope.block());
            renderer.block_quote(out, &text);
        }
        Tag::CodeBlock(kind) => {
            let lang = match kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
                CodeBlockKind::Indented => "",
            };
            let mut text = Vec::new();
            for event in inner {
                if let Event::Text(t) = event {
                    text.extend_from_slice(t.as_bytes());
                }
            }
            renderer.block_code(out, &text, lang);
        }
        Tag::List(start) => {
            let flags = ListFlags {
                ordered: start.is_some(),
            };
            let scope = Scope {
                list: flags,
                ..scope.block()
            };
            renderer.list(out, children(scope), flags);
        }
        Tag::Item => {
            let text = render_nested(inner, renderer, ctx, scope.block());
            renderer.list_item(out, &text, scope.list);
        }
        // Definitions are replayed once, through `footnotes`, after the body
        Tag::FootnoteDefinition(_) => {}
        Tag::Table(columns) => render_table(columns, inner, renderer, out, ctx),
        Tag::TableHead | Tag::TableRow | Tag::TableCell => {
            render_events(inner, renderer, out, ctx, scope.inline())
        }
        Tag::Emphasis => match child_tags(inner).as_slice() {
            // *__text__* covers the whole span: one triple emphasis
            [(Tag::Strong, strong)] if strong.len() + 2 == inner.len() => {
                let text = render_nested(strong, renderer, ctx, scope.inline());
                renderer.triple_emphasis(out, &text);
            }
            _ => {
                let text = render_nested(inner, renderer, ctx, scope.inline());
                renderer.emphasis(out, &text);
            }
        },
        Tag::Strong => {
            let text = render_nested(inner, renderer, ctx, scope.inline());
            renderer.double_emphasis(out, &text);
        }
        Tag::Strikethrough => {
            let text = render_nested(inner, renderer, ctx, scope.inline());
            renderer.strikethrough(out, &text);
        }
        Tag::Link(LinkType::Autolink, dest, _) => renderer.autolink(out, dest, AutolinkKind::Normal),
        Tag::Link(LinkType::Email, dest, _) => renderer.autolink(out, dest, AutolinkKind::Email),
        Tag::Link(_, dest, title) => {
            let content = render_nested(inner, renderer, ctx, scope.link());
            renderer.link(out, dest, title, &content);
        }
        Tag::Image(_, dest, title) => {
            let alt = render_nested(inner, renderer, ctx, scope.link());
            renderer.image(out, dest, title, &alt);
        }
    }
}

fn render_table<R: Renderer + ?Sized>(
    columns: &[Alignment],
    inner: &[Event<'_>],
    renderer: &mut R,
    out: &mut Vec<u8>,
    ctx: &Context<'_>,
) {
    let mut header = Vec::new();
    let mut body = Vec::new();
    for (tag, cells) in child_tags(inner) {
        match tag {
            Tag::TableHead => {
                let row = render_row(cells, true, columns, renderer, ctx);
                renderer.table_row(&mut header, &row);
            }
            Tag::TableRow => {
                let row = render_row(cells, false, columns, renderer, ctx);
                renderer.table_row(&mut body, &row);
            }
            _ => {}
        }
    }
    renderer.table(out, &header, &body, columns);
}

fn render_row<R: Renderer + ?Sized>(
    cells: &[Event<'_>],
    is_header: bool,
    columns: &[Alignment],
    renderer: &mut R,
    ctx: &Context<'_>,
) -> Vec<u8> {
    let mut row = Vec::new();
    for (column, (_, cell)) in child_tags(cells).into_iter().enumerate() {
        let align = columns.get(column).copied().unwrap_or(Alignment::None);
        let text = render_nested(cell, renderer, ctx, Scope::default().inline());
        if is_header {
            renderer.table_header_cell(&mut row, &text, align);
        } else {
            renderer.table_cell(&mut row, &text, align);
        }
    }
    row
}

fn render_footnote_items<R: Renderer + ?Sized>(
    events: &[Event<'_>],
    renderer: &mut R,
    out: &mut Vec<u8>,
    ctx: &Context<'_>,
) {
    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::FootnoteDefinition(name)) = &events[i] {
            let close = matching_end(events, i);
            let inner = &events[i + 1..close.min(events.len())];
            let text = render_nested(inner, renderer, ctx, Scope::default());
            renderer.footnote_item(out, name, &text);
            i = close;
        }
        i += 1;
    }
}

fn render_text<R: Renderer + ?Sized>(
    text: &str,
    renderer: &mut R,
    out: &mut Vec<u8>,
    ctx: &Context<'_>,
    scope: Scope,
) {
    let bare_url = match ctx.bare_url {
        Some(re) if !scope.in_link => re,
        _ => {
            renderer.normal_text(out, text.as_bytes());
            return;
        }
    };

    let mut last = 0;
    for m in bare_url.find_iter(text) {
        if m.start() > last {
            renderer.normal_text(out, text[last..m.start()].as_bytes());
        }
        renderer.autolink(out, m.as_str(), AutolinkKind::Normal);
        last = m.end();
    }
    if last < text.len() {
        renderer.normal_text(out, text[last..].as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Records every callback as a line; renders children everywhere.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Recorder {
        fn push(&mut self, call: impl Into<String>) {
            self.calls.push(call.into());
        }
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    impl Renderer for Recorder {
        fn block_code(&mut self, _out: &mut Vec<u8>, text_: &[u8], lang: &str) {
            self.push(format!("block_code({lang}) {}", text(text_)));
        }
        fn block_quote(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("block_quote {}", text(text_)));
        }
        fn block_html(&mut self, _out: &mut Vec<u8>, _text: &[u8]) {
            self.push("block_html");
        }
        fn header(&mut self, out: &mut Vec<u8>, text: Children<'_>, level: usize, _id: Option<&str>) {
            self.push(format!("header {level}"));
            text.render(self, out);
        }
        fn hrule(&mut self, _out: &mut Vec<u8>) {
            self.push("hrule");
        }
        fn list(&mut self, out: &mut Vec<u8>, text: Children<'_>, flags: ListFlags) {
            self.push(format!("list ordered={}", flags.ordered));
            text.render(self, out);
        }
        fn list_item(&mut self, _out: &mut Vec<u8>, text_: &[u8], _flags: ListFlags) {
            self.push(format!("list_item {}", text(text_)));
        }
        fn paragraph(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
            self.push("paragraph");
            text.render(self, out);
        }
        fn table(&mut self, _out: &mut Vec<u8>, header: &[u8], body: &[u8], columns: &[Alignment]) {
            self.push(format!("table {} | {} | {}", text(header), text(body), columns.len()));
        }
        fn table_row(&mut self, out: &mut Vec<u8>, text: &[u8]) {
            out.extend_from_slice(text);
            out.push(b';');
        }
        fn table_header_cell(&mut self, out: &mut Vec<u8>, text: &[u8], _align: Alignment) {
            out.extend_from_slice(text);
            out.push(b',');
        }
        fn table_cell(&mut self, out: &mut Vec<u8>, text: &[u8], _align: Alignment) {
            out.extend_from_slice(text);
            out.push(b',');
        }
        fn footnotes(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
            self.push("footnotes");
            text.render(self, out);
        }
        fn footnote_item(&mut self, _out: &mut Vec<u8>, name: &str, _text: &[u8]) {
            self.push(format!("footnote_item {name}"));
        }
        fn title_block(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("title_block {}", text(text_)));
        }
        fn autolink(&mut self, _out: &mut Vec<u8>, link: &str, kind: AutolinkKind) {
            self.push(format!("autolink {link} {kind:?}"));
        }
        fn code_span(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("code_span {}", text(text_)));
        }
        fn double_emphasis(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("double_emphasis {}", text(text_)));
        }
        fn emphasis(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("emphasis {}", text(text_)));
        }
        fn triple_emphasis(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("triple_emphasis {}", text(text_)));
        }
        fn strikethrough(&mut self, _out: &mut Vec<u8>, text_: &[u8]) {
            self.push(format!("strikethrough {}", text(text_)));
        }
        fn image(&mut self, _out: &mut Vec<u8>, link: &str, _title: &str, _alt: &[u8]) {
            self.push(format!("image {link}"));
        }
        fn line_break(&mut self, _out: &mut Vec<u8>) {
            self.push("line_break");
        }
        fn link(&mut self, _out: &mut Vec<u8>, link: &str, title: &str, content: &[u8]) {
            self.push(format!("link {link} {title:?} {}", text(content)));
        }
        fn raw_html_tag(&mut self, _out: &mut Vec<u8>, tag: &[u8]) {
            self.push(format!("raw_html_tag {}", text(tag)));
        }
        fn footnote_ref(&mut self, _out: &mut Vec<u8>, name: &str, id: usize) {
            self.push(format!("footnote_ref {name} {id}"));
        }
        fn normal_text(&mut self, out: &mut Vec<u8>, text: &[u8]) {
            out.extend_from_slice(text);
        }
        fn document_header(&mut self, _out: &mut Vec<u8>) {
            self.push("document_header");
        }
        fn document_footer(&mut self, _out: &mut Vec<u8>) {
            self.push("document_footer");
        }
    }

    fn record(input: &str, extensions: Extensions) -> (Vec<String>, String) {
        let markdown = Markdown::new(extensions).unwrap();
        let mut recorder = Recorder::default();
        let out = markdown.render(input, &mut recorder);
        (recorder.calls, text(&out))
    }

    #[test]
    fn test_document_boundaries_wrap_everything() {
        let (calls, _) = record("hello", Extensions::DOCS);
        assert_eq!(calls.first().map(String::as_str), Some("document_header"));
        assert_eq!(calls.last().map(String::as_str), Some("document_footer"));
    }

    #[test]
    fn test_link_content_and_title() {
        let (calls, out) = record(r#"See [the docs](../a.md "Docs title") now."#, Extensions::DOCS);
        assert!(calls.contains(&r#"link ../a.md "Docs title" the docs"#.to_string()));
        assert_eq!(out, "See  now.");
    }

    #[test]
    fn test_header_level_and_text() {
        let (calls, out) = record("## Getting started\n", Extensions::DOCS);
        assert!(calls.contains(&"header 2".to_string()));
        assert_eq!(out, "Getting started");
    }

    #[test]
    fn test_links_inside_nested_containers_are_reported() {
        let input = "\
> quoted [q](q.md)

- item [i](i.md)

| a | b |
|---|---|
| [c](c.md) | d |
";
        let (calls, _) = record(input, Extensions::DOCS);
        assert!(calls.contains(&r#"link q.md "" q"#.to_string()));
        assert!(calls.contains(&r#"link i.md "" i"#.to_string()));
        assert!(calls.contains(&r#"link c.md "" c"#.to_string()));
        assert!(calls.iter().any(|c| c.starts_with("table ") && c.ends_with("| 2")));
    }

    #[test]
    fn test_bare_urls_become_autolinks() {
        let (calls, out) = record("Visit https://example.com/x. Or www.rust-lang.org", Extensions::DOCS);
        assert!(calls.contains(&"autolink https://example.com/x Normal".to_string()));
        assert!(calls.contains(&"autolink www.rust-lang.org Normal".to_string()));
        assert_eq!(out, "Visit . Or ");
    }

    #[test]
    fn test_bare_urls_left_alone_without_extension() {
        let (calls, out) = record("Visit https://example.com", Extensions::default());
        assert!(!calls.iter().any(|c| c.starts_with("autolink")));
        assert_eq!(out, "Visit https://example.com");
    }

    #[test]
    fn test_angle_autolinks_and_emails() {
        let (calls, _) = record("<https://example.com> <me@example.com>", Extensions::DOCS);
        assert!(calls.contains(&"autolink https://example.com Normal".to_string()));
        assert!(calls.contains(&"autolink me@example.com Email".to_string()));
    }

    #[test]
    fn test_urls_in_link_text_are_not_autolinked() {
        let (calls, _) = record("[https://example.com](https://example.com)", Extensions::DOCS);
        assert!(!calls.iter().any(|c| c.starts_with("autolink")));
        assert!(calls.iter().any(|c| c.starts_with("link https://example.com")));
    }

    #[test]
    fn test_fenced_code_is_one_block() {
        let (calls, _) = record("```go\ntype X struct {}\n[not](a link)\n```\n", Extensions::DOCS);
        assert!(calls.contains(&"block_code(go) type X struct {}\n[not](a link)\n".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("link")));
    }

    #[test]
    fn test_emphasis_variants() {
        let (calls, _) = record("*a* **b** ***c*** ~~d~~ `e`", Extensions::DOCS);
        assert!(calls.contains(&"emphasis a".to_string()));
        assert!(calls.contains(&"double_emphasis b".to_string()));
        assert!(calls.contains(&"triple_emphasis c".to_string()));
        assert!(calls.contains(&"strikethrough d".to_string()));
        assert!(calls.contains(&"code_span e".to_string()));
    }

    #[test]
    fn test_footnotes_numbered_by_first_reference() {
        let input = "First[^b] then[^a].\n\n[^a]: A [link](a.md).\n\n[^b]: B.\n";
        let (calls, _) = record(input, Extensions::DOCS);
        assert!(calls.contains(&"footnote_ref b 1".to_string()));
        assert!(calls.contains(&"footnote_ref a 2".to_string()));
        assert!(calls.contains(&"footnotes".to_string()));
        assert!(calls.contains(&"footnote_item a".to_string()));
        assert!(calls.contains(&r#"link a.md "" link"#.to_string()));
    }

    #[test]
    fn test_block_and_inline_html() {
        let (calls, _) = record("<div>\nblock\n</div>\n\ntext <b>bold</b>\n", Extensions::DOCS);
        assert!(calls.contains(&"block_html".to_string()));
        assert!(calls.contains(&"raw_html_tag <b>".to_string()));
    }

    #[test]
    fn test_title_block_extension() {
        let ext = Extensions {
            title_block: true,
            ..Extensions::DOCS
        };
        let (calls, _) = record("% Title\n% Author\n\nBody\n", ext);
        assert!(calls.contains(&"title_block Title\nAuthor".to_string()));

        // Off for documentation runs: the line is ordinary text
        let (calls, out) = record("% Title\n\nBody\n", Extensions::DOCS);
        assert!(!calls.iter().any(|c| c.starts_with("title_block")));
        assert!(out.starts_with("% Title"));
    }

    #[test]
    fn test_children_report_empty_regions() {
        struct Tracker(Vec<bool>);
        impl Tracker {
            fn note(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
                let produced = text.render(self, out);
                self.0.push(produced);
            }
        }
        impl Renderer for Tracker {
            fn block_code(&mut self, _: &mut Vec<u8>, _: &[u8], _: &str) {}
            fn block_quote(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn block_html(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn header(&mut self, out: &mut Vec<u8>, text: Children<'_>, _: usize, _: Option<&str>) {
                self.note(out, text);
            }
            fn hrule(&mut self, _: &mut Vec<u8>) {}
            fn list(&mut self, out: &mut Vec<u8>, text: Children<'_>, _: ListFlags) {
                self.note(out, text);
            }
            fn list_item(&mut self, _: &mut Vec<u8>, _: &[u8], _: ListFlags) {}
            fn paragraph(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
                self.note(out, text);
            }
            fn table(&mut self, _: &mut Vec<u8>, _: &[u8], _: &[u8], _: &[Alignment]) {}
            fn table_row(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn table_header_cell(&mut self, _: &mut Vec<u8>, _: &[u8], _: Alignment) {}
            fn table_cell(&mut self, _: &mut Vec<u8>, _: &[u8], _: Alignment) {}
            fn footnotes(&mut self, out: &mut Vec<u8>, text: Children<'_>) {
                self.note(out, text);
            }
            fn footnote_item(&mut self, _: &mut Vec<u8>, _: &str, _: &[u8]) {}
            fn title_block(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn autolink(&mut self, _: &mut Vec<u8>, _: &str, _: AutolinkKind) {}
            fn code_span(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn double_emphasis(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn emphasis(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn triple_emphasis(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn strikethrough(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn image(&mut self, _: &mut Vec<u8>, _: &str, _: &str, _: &[u8]) {}
            fn line_break(&mut self, _: &mut Vec<u8>) {}
            fn link(&mut self, _: &mut Vec<u8>, _: &str, _: &str, _: &[u8]) {}
            fn raw_html_tag(&mut self, _: &mut Vec<u8>, _: &[u8]) {}
            fn footnote_ref(&mut self, _: &mut Vec<u8>, _: &str, _: usize) {}
            fn normal_text(&mut self, out: &mut Vec<u8>, text: &[u8]) {
                out.extend_from_slice(text);
            }
            fn document_header(&mut self, _: &mut Vec<u8>) {}
            fn document_footer(&mut self, _: &mut Vec<u8>) {}
        }

        let markdown = Markdown::new(Extensions::DOCS).unwrap();
        let mut tracker = Tracker(Vec::new());
        // The paragraph holds only a code span, which writes nothing
        markdown.render("`code`\n\nwords\n", &mut tracker);
        assert_eq!(tracker.0, vec![false, true]);

        // A soft break is forwarded as "\n", so the region is not empty
        let mut tracker = Tracker(Vec::new());
        markdown.render("`a`\n`b`\n", &mut tracker);
        assert_eq!(tracker.0, vec![true]);
    }
}
