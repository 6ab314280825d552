//! Custom prefixes and inline markers applied to parsed markdown.

use super::inline_style;
use asciimark::mdast::parse_markdown;
use asciimark::{Node, Rewriter};

fn math_values(tree: &Node) -> Vec<String> {
    let mut values = Vec::new();
    tree.walk(&mut |node| {
        if let Node::Math(math) = node {
            values.push(math.value.clone());
        }
    });
    values
}

#[test]
fn test_custom_prefix_replaces_defaults() {
    let options = inline_style().with_prefixes("mathjax");
    let source = "```mathjax\na\n```\n\n```am\nb\n```\n";

    let tree = Rewriter::build(&options)
        .transform(parse_markdown(source))
        .unwrap();
    assert_eq!(math_values(&tree), vec!["a"]);
}

#[test]
fn test_empty_prefix_list_disables_blocks() {
    let options = inline_style().with_prefixes(Vec::<String>::new());
    let source = "```am\nb\n```\n\n`$c$`\n";

    let tree = Rewriter::build(&options)
        .transform(parse_markdown(source))
        .unwrap();
    assert_eq!(math_values(&tree), vec!["c"]);
}

#[test]
fn test_prefix_is_case_sensitive() {
    let tree = Rewriter::build(&inline_style())
        .transform(parse_markdown("```AM\nx\n```\n"))
        .unwrap();
    assert!(math_values(&tree).is_empty());
}

#[test]
fn test_bracket_markers() {
    let options = inline_style().with_inline_markers("`\\(", "\\)`");
    let source = "`\\(a/b\\)` but not `$c$`\n";

    let tree = Rewriter::build(&options)
        .transform(parse_markdown(source))
        .unwrap();
    assert_eq!(math_values(&tree), vec!["a/b"]);
}

#[test]
fn test_single_dollar_span_becomes_empty_math() {
    let tree = Rewriter::build(&inline_style())
        .transform(parse_markdown("`$`\n"))
        .unwrap();
    assert_eq!(math_values(&tree), vec![""]);
}

#[test]
fn test_backtick_only_markers_match_every_span() {
    let options = inline_style().with_inline_markers("`", "`");
    let source = "`x` and `y`\n";

    let mut tree = parse_markdown(source);
    let replaced = Rewriter::build(&options).rewrite(&mut tree).unwrap();

    // an empty closing marker slices to nothing
    assert_eq!(replaced, 2);
    assert_eq!(math_values(&tree), vec!["", ""]);
}
