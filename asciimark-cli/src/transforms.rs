//! CLI-specific transforms
//!
//! A transform is a view on a document at one processing stage:
//!
//! 1. **Parsing** - markdown (or mdast JSON) → node tree
//!    - `mdast-json`: the tree as parsed, before rewriting
//!
//! 2. **Rewriting** - node tree → node tree with math nodes
//!    - `rewrite-json`: the tree after rewriting
//!    - `math-summary`: one line per math node (display kind, source, TeX)
//!
//! Example: `asciimark inspect notes.md math-summary`

use asciimark::mdast::{parse_markdown, MathDisplay, Node};
use asciimark::{Options, Rewriter};
use std::path::Path;

pub use crate::cli::{AVAILABLE_TRANSFORMS, INPUT_FORMATS};

/// Guess the input format from a file name: `.json` is an mdast tree, anything else markdown.
pub fn detect_input_format(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => "json",
        _ => "markdown",
    }
}

/// Build the node tree for `source` in the given input format.
pub fn load_tree(source: &str, from: &str) -> Result<Node, String> {
    match from {
        "markdown" | "md" => Ok(parse_markdown(source)),
        "json" => serde_json::from_str(source).map_err(|e| format!("Invalid mdast JSON: {e}")),
        other => Err(format!("Unknown input format: {other}")),
    }
}

/// Rewrite the ASCII-math of `tree` with the built-in engine.
pub fn rewrite_tree(tree: Node, options: &Options) -> Result<Node, String> {
    Rewriter::build(options)
        .transform(tree)
        .map_err(|e| format!("Conversion failed: {e}"))
}

/// Serialize a tree as JSON.
pub fn tree_to_json(tree: &Node, pretty: bool) -> Result<String, String> {
    let json = if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    };
    json.map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Execute a named transform on a source document.
pub fn execute_transform(
    source: &str,
    from: &str,
    transform_name: &str,
    options: &Options,
) -> Result<String, String> {
    let tree = load_tree(source, from)?;

    match transform_name {
        "mdast-json" => tree_to_json(&tree, true),
        "rewrite-json" => tree_to_json(&rewrite_tree(tree, options)?, true),
        "math-summary" => Ok(math_summary(&rewrite_tree(tree, options)?)),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

/// One `kind<TAB>source<TAB>markup` line per math node, in document order.
pub fn math_summary(tree: &Node) -> String {
    let mut output = String::new();
    tree.walk(&mut |node| {
        if let Node::Math(math) = node {
            let kind = match math.display() {
                MathDisplay::Block => "block",
                MathDisplay::Inline => "inline",
            };
            output.push_str(&format!(
                "{kind}\t{}\t{}\n",
                single_line(&math.value),
                single_line(math.markup().unwrap_or_default())
            ));
        }
    });
    output
}

fn single_line(text: &str) -> String {
    text.replace('\n', "\\n")
}
