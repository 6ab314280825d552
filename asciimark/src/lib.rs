//! ASCII-math escapes for markdown syntax trees
//!
//!     This crate finds ASCII-math written inside code in a markdown tree and replaces it with
//!     math nodes carrying TeX markup and the hints an HTML renderer needs (element name, CSS
//!     classes and text content).
//!
//!     Two escapes are recognized:
//!         - Fenced code blocks whose info string is one of the configured prefixes (`am`, `asciimath`).
//!         - Code spans wrapped in the inline markers, `` `$x^2$` `` by default.
//!
//!     Block escapes become `div.math.math-display`, inline ones `span.math.math-inline`.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs        # ConversionError
//!     ├── options.rs      # Options and their normalization (prefixes, delimiters, engine options)
//!     ├── mdast           # Node tree and the markdown → tree adapter
//!     ├── engine          # MathEngine seam and the built-in ASCII-math → TeX engine
//!     └── rewrite.rs      # Matcher, math node builders and the Rewriter pass
//!
//!     The rewriter is built once from Options, then applied to any number of trees. It owns no
//!     state between passes, mutates the tree in place and reports how many nodes it replaced.
//!     The conversion engine is a trait so hosts can plug a different renderer; the built-in
//!     one is a small symbol-table driven ASCII-math parser.
//!
//!     This is a pure lib: no printing, no env vars, no files. The asciimark-cli crate is the shell.
//!
//! Usage
//!
//!     let options = Options::default();
//!     let mut tree = parse_markdown("`$x^2$`");
//!     let replaced = Rewriter::build(&options).rewrite(&mut tree)?;
//!
pub mod engine;
pub mod error;
pub mod mdast;
pub mod options;
pub mod rewrite;

pub use engine::{AsciiMath, MathEngine};
pub use error::ConversionError;
pub use mdast::{parse_markdown, Node};
pub use options::{EngineOptions, EscapeConfig, Options, Prefixes};
pub use rewrite::{math_block, math_inline, Matcher, Rewriter};

/// Parses markdown and rewrites its ASCII-math escapes with the built-in engine.
pub fn rewrite_markdown(source: &str, options: &Options) -> Result<Node, ConversionError> {
    Rewriter::build(options).transform(parse_markdown(source))
}
