//! Output encodings for the collected tree.
//!
//! This module turns the in-memory hierarchy into its two snapshot forms:
//! - [`json`] - Pretty-printed JSON document
//! - [`dot`] - Graphviz DOT description with per-type icon nodes
//!
//! Both encoders are pure functions of the tree.

mod dot;
mod json;

pub use dot::render_dot;
pub use json::render_json;
