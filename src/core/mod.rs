//! Core reveal engine – viewport latches, stagger timing, the per-item state
//! machine, tree-list formatting and the content catalog.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in as an [`std::time::Instant`], so every transition is
//! deterministic under test.

pub mod catalog;
pub mod error;
pub mod reveal;
pub mod stagger;
pub mod tree_list;
pub mod tween;
pub mod viewport;
