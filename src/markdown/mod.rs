// src/markdown/mod.rs
// =============================================================================
// This module adapts the pulldown-cmark parser to a callback renderer.
//
// Submodules:
// - render: the Renderer trait, the lazy Children continuation, and the
//   driver that replays parser events as callbacks
//
// The rest of the crate only sees `Markdown`, `Renderer`, and the small
// value types passed to callbacks; pulldown-cmark stays an implementation
// detail apart from the table `Alignment` it already defines.
// =============================================================================

mod render;

pub use pulldown_cmark::Alignment;
pub use render::{AutolinkKind, Children, Extensions, ListFlags, Markdown, Renderer};
