//! The markdown syntax tree the rewriter works on.
//!
//!     nodes.rs holds the mdast-shaped `Node` enum, serialized with the same `type` tags and
//!     camelCase fields as the JavaScript mdast, so trees can be exchanged as JSON.
//!     markdown.rs builds such a tree from markdown source through comrak.

pub mod markdown;
pub mod nodes;

pub use markdown::parse_markdown;
pub use nodes::{Math, MathDisplay, Node};
