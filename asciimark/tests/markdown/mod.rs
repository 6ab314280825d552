//! Markdown tests
//!
//! Markdown source is parsed with comrak, then rewritten with the built-in engine.

mod escapes;
mod import;
mod rewrite;

use asciimark::Options;

/// Options used by most tests: plain (non display) TeX output.
pub(crate) fn inline_style() -> Options {
    Options::default().with_display(false)
}
