//! Markdown parsing (Markdown → document tree)
//!
//! The markdown itself is parsed by comrak; this module only adapts the comrak
//! AST into [`Node`]s. Pipeline: Markdown string → Comrak AST → Node tree

use super::nodes::{
    AlignKind, Code, Heading, Image, Link, List, ListItem, Literal, Node, Parent, Table,
};
use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a markdown string into a `root` node.
pub fn parse_markdown(source: &str) -> Node {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    Node::root(convert_children(root))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    node.children().filter_map(convert_node).collect()
}

/// Convert one comrak node, `None` for node kinds with no mdast counterpart here.
fn convert_node<'a>(node: &'a AstNode<'a>) -> Option<Node> {
    let data = node.data.borrow();

    let converted = match &data.value {
        NodeValue::Document => Node::root(convert_children(node)),
        NodeValue::Paragraph => Node::paragraph(convert_children(node)),
        NodeValue::Heading(heading) => Node::Heading(Heading {
            depth: heading.level,
            children: convert_children(node),
        }),
        NodeValue::ThematicBreak => Node::ThematicBreak,
        NodeValue::BlockQuote => Node::Blockquote(Parent {
            children: convert_children(node),
        }),
        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            Node::List(List {
                ordered,
                start: ordered.then_some(list.start as u32),
                spread: !list.tight,
                children: convert_children(node),
            })
        }
        NodeValue::Item(item) => Node::ListItem(ListItem {
            checked: None,
            spread: !item.tight,
            children: convert_children(node),
        }),
        NodeValue::CodeBlock(code_block) => {
            let (lang, meta) = split_info_string(&code_block.info);
            let value = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal)
                .to_string();
            Node::Code(Code { lang, meta, value })
        }
        NodeValue::HtmlBlock(html) => Node::Html(Literal {
            value: html.literal.trim_end_matches('\n').to_string(),
        }),
        NodeValue::HtmlInline(html) => Node::Html(Literal {
            value: html.clone(),
        }),
        NodeValue::Text(text) => Node::text(text.clone()),
        NodeValue::SoftBreak => Node::text("\n"),
        NodeValue::LineBreak => Node::Break,
        NodeValue::Code(code) => Node::inline_code(code.literal.clone()),
        NodeValue::Emph => Node::Emphasis(Parent {
            children: convert_children(node),
        }),
        NodeValue::Strong => Node::Strong(Parent {
            children: convert_children(node),
        }),
        NodeValue::Strikethrough => Node::Delete(Parent {
            children: convert_children(node),
        }),
        NodeValue::Link(link) => Node::Link(Link {
            url: link.url.clone(),
            title: non_empty(&link.title),
            children: convert_children(node),
        }),
        NodeValue::Image(link) => Node::Image(Image {
            url: link.url.clone(),
            title: non_empty(&link.title),
            alt: Some(collect_text_from_children(node)),
        }),
        NodeValue::Table(table) => Node::Table(Table {
            align: table
                .alignments
                .iter()
                .map(|alignment| match alignment {
                    TableAlignment::Left => Some(AlignKind::Left),
                    TableAlignment::Center => Some(AlignKind::Center),
                    TableAlignment::Right => Some(AlignKind::Right),
                    TableAlignment::None => None,
                })
                .collect(),
            children: convert_children(node),
        }),
        NodeValue::TableRow(_) => Node::TableRow(Parent {
            children: convert_children(node),
        }),
        NodeValue::TableCell => Node::TableCell(Parent {
            children: convert_children(node),
        }),
        _ => return None,
    };

    Some(converted)
}

/// Split a fence info string into language (first word) and meta (the rest).
fn split_info_string(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (Some(lang.to_string()), non_empty(meta.trim())),
        None => (Some(info.to_string()), None),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Collect text content from a node (image alt text)
fn collect_text_from_children<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        collect_text_content(child, &mut text);
    }
    text
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_block() {
        let tree = parse_markdown("```am\nint\n```\n");
        assert_eq!(tree, Node::root(vec![Node::code(Some("am"), "int")]));
    }

    #[test]
    fn test_info_string_meta() {
        let tree = parse_markdown("```am title=\"limits\"\nx\n```\n");
        match &tree.children().unwrap()[0] {
            Node::Code(code) => {
                assert_eq!(code.lang.as_deref(), Some("am"));
                assert_eq!(code.meta.as_deref(), Some("title=\"limits\""));
            }
            other => panic!("Expected code block, found {other:?}"),
        }
    }

    #[test]
    fn test_indented_code_has_no_lang() {
        let tree = parse_markdown("    indented\n");
        assert_eq!(tree, Node::root(vec![Node::code(None, "indented")]));
    }

    #[test]
    fn test_code_span_keeps_dollar_markers() {
        let tree = parse_markdown("`$\"e\"$`\n");
        assert_eq!(
            tree,
            Node::root(vec![Node::paragraph(vec![Node::inline_code("$\"e\"$")])])
        );
    }

    #[test]
    fn test_heading_and_emphasis() {
        let tree = parse_markdown("## Title *x*\n");
        match &tree.children().unwrap()[0] {
            Node::Heading(heading) => {
                assert_eq!(heading.depth, 2);
                assert_eq!(heading.children.len(), 2);
                assert!(matches!(heading.children[1], Node::Emphasis(_)));
            }
            other => panic!("Expected heading, found {other:?}"),
        }
    }

    #[test]
    fn test_table_alignment() {
        let tree = parse_markdown("|A|B|\n|:-|-:|\n|`$x$`|2|\n");
        match &tree.children().unwrap()[0] {
            Node::Table(table) => {
                assert_eq!(table.align, vec![Some(AlignKind::Left), Some(AlignKind::Right)]);
                assert_eq!(table.children.len(), 2);
            }
            other => panic!("Expected table, found {other:?}"),
        }
    }

    #[test]
    fn test_ordered_list_start() {
        let tree = parse_markdown("3. a\n4. b\n");
        match &tree.children().unwrap()[0] {
            Node::List(list) => {
                assert!(list.ordered);
                assert_eq!(list.start, Some(3));
                assert_eq!(list.children.len(), 2);
            }
            other => panic!("Expected list, found {other:?}"),
        }
    }
}
