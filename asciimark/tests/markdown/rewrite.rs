//! End-to-end rewriting of markdown documents.

use super::inline_style;
use asciimark::mdast::{parse_markdown, MathDisplay};
use asciimark::{rewrite_markdown, Node, Options, Rewriter};
use insta::assert_snapshot;
use serde_json::json;

fn only_math(tree: &Node) -> asciimark::mdast::Math {
    let mut found = Vec::new();
    tree.walk(&mut |node| {
        if let Node::Math(math) = node {
            found.push(math.clone());
        }
    });
    assert_eq!(found.len(), 1, "expected exactly one math node");
    found.remove(0)
}

#[test]
fn test_formula_document() {
    let source = "\nHere is a formula\n\n```am\nint\n```\n\n`$\"e\"$`\n";
    let mut tree = parse_markdown(source);

    let replaced = Rewriter::build(&inline_style()).rewrite(&mut tree).unwrap();
    assert_eq!(replaced, 2);

    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "type": "root",
            "children": [
                {
                    "type": "paragraph",
                    "children": [{ "type": "text", "value": "Here is a formula" }]
                },
                {
                    "type": "math",
                    "meta": null,
                    "value": "int",
                    "data": {
                        "hName": "div",
                        "hProperties": { "className": ["math", "math-display"] },
                        "hChildren": [{ "type": "text", "value": "\\int" }]
                    }
                },
                {
                    "type": "paragraph",
                    "children": [{
                        "type": "math",
                        "meta": null,
                        "value": "\"e\"",
                        "data": {
                            "hName": "span",
                            "hProperties": { "className": ["math", "math-inline"] },
                            "hChildren": [{ "type": "text", "value": "\\text{e}" }]
                        }
                    }]
                }
            ]
        })
    );
}

#[test]
fn test_limit_block() {
    let source = "\n```am\nlim_(n->oo)(1+1/n)^n=\"e\"\n```";
    let tree = rewrite_markdown(source, &inline_style()).unwrap();

    let math = only_math(&tree);
    assert_eq!(math.display(), MathDisplay::Block);
    assert_eq!(math.value, "lim_(n->oo)(1+1/n)^n=\"e\"");
    assert_snapshot!(
        math.markup().unwrap(),
        @r"\lim _{ n \to \infty } \left( 1 + \frac{ 1 }{ n } \right) ^{ n } = \text{e}"
    );
}

#[test]
fn test_integral_inline() {
    let source = "`$int_0^(+oo)\"e\"^-x dx$`";
    let tree = rewrite_markdown(source, &inline_style()).unwrap();

    let math = only_math(&tree);
    assert_eq!(math.display(), MathDisplay::Inline);
    assert_eq!(math.value, "int_0^(+oo)\"e\"^-x dx");
    assert_snapshot!(
        math.markup().unwrap(),
        @r"\int _{ 0 } ^{ + \infty } \text{e} ^{ {-x} } {\text{d}x}"
    );
}

#[test]
fn test_display_style_by_default() {
    let tree = rewrite_markdown("```asciimath\nsum\n```\n", &Options::default()).unwrap();
    let math = only_math(&tree);
    assert_eq!(math.markup(), Some("\\displaystyle \\sum"));
}

#[test]
fn test_other_code_is_left_alone() {
    let source = "```rust\nfn main() {}\n```\n\n`plain code` and `$x`\n";
    let before = parse_markdown(source);

    let tree = rewrite_markdown(source, &inline_style()).unwrap();
    assert_eq!(tree, before);
}

#[test]
fn test_math_deep_in_the_tree() {
    let source = "> 1. see `$x^2$`\n>\n>    ```am\n>    y\n>    ```\n";
    let mut tree = parse_markdown(source);

    let replaced = Rewriter::build(&inline_style()).rewrite(&mut tree).unwrap();
    assert_eq!(replaced, 2);

    let mut displays = Vec::new();
    tree.walk(&mut |node| {
        if let Node::Math(math) = node {
            displays.push((math.display(), math.markup().unwrap_or_default().to_string()));
        }
    });
    assert_eq!(
        displays,
        vec![
            (MathDisplay::Inline, "x ^{ 2 }".to_string()),
            (MathDisplay::Block, "y".to_string()),
        ]
    );
}

#[test]
fn test_conversion_error_is_reported() {
    let result = rewrite_markdown("`$\"open$`", &inline_style());
    assert!(result.is_err());
}
