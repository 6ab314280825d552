//! Import tests: markdown source to the node tree, before any rewriting.

use asciimark::mdast::parse_markdown;
use serde_json::json;

const FORMULA_DOC: &str = "
Here is a formula

```am
int
```

`$\"e\"$`
";

#[test]
fn test_escapes_survive_parsing_untouched() {
    let tree = parse_markdown(FORMULA_DOC);

    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "type": "root",
            "children": [
                {
                    "type": "paragraph",
                    "children": [{ "type": "text", "value": "Here is a formula" }]
                },
                { "type": "code", "lang": "am", "meta": null, "value": "int" },
                {
                    "type": "paragraph",
                    "children": [{ "type": "inlineCode", "value": "$\"e\"$" }]
                }
            ]
        })
    );
}

#[test]
fn test_nested_code_span_is_reachable() {
    let tree = parse_markdown("> - item with `$x$`\n");

    let mut spans = Vec::new();
    tree.walk(&mut |node| {
        if node.kind() == "inlineCode" {
            spans.push(node.clone());
        }
    });
    assert_eq!(spans, vec![asciimark::Node::inline_code("$x$")]);
}
