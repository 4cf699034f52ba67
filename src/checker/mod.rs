// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - link: Decides whether a single link is sound (the rules live here)
// - lines: Optional comparison of line anchors against the source they cite
// - visitor: Renderer that walks one document and feeds links to the rules
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod lines;
mod link;
mod visitor;

pub use link::{LinkValidator, ValidationFailure};
pub use visitor::{DocumentVisitor, FileOutcome};
