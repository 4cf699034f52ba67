// src/walk/mod.rs
// =============================================================================
// This module finds the markdown files to check.
//
// Submodules:
// - filter: glob-based skip/descend/check decisions for one entry
// - tree: the sorted, depth-first walk that runs the checker on each file
// =============================================================================

mod filter;
mod tree;

pub use tree::TreeWalker;
