//! Core data structures for the markdown document tree.
//!
//! The shapes follow the mdast schema so trees produced by other markdown
//! tooling can be loaded from JSON and handed back in the same form.
//! Node types outside the modelled set (`definition`, `yaml`,
//! `footnoteDefinition`, ...) load as [`OtherNode`] and round-trip untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of the document tree.
///
/// Serialized as an internally tagged object, e.g. `{"type": "inlineCode", "value": "x"}`.
/// Objects that do not fit a modelled variant fall back to [`Node::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Parent),
    Paragraph(Parent),
    Heading(Heading),
    ThematicBreak,
    Blockquote(Parent),
    List(List),
    ListItem(ListItem),
    Html(Literal),
    Code(Code),
    Math(Math),
    Text(Literal),
    Emphasis(Parent),
    Strong(Parent),
    Delete(Parent),
    InlineCode(Literal),
    Break,
    Link(Link),
    Image(Image),
    Table(Table),
    TableRow(Parent),
    TableCell(Parent),
    #[serde(untagged)]
    Other(OtherNode),
}

impl Node {
    /// The `type` tag this node serializes with.
    pub fn kind(&self) -> &str {
        match self {
            Node::Root(_) => "root",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::ThematicBreak => "thematicBreak",
            Node::Blockquote(_) => "blockquote",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::Html(_) => "html",
            Node::Code(_) => "code",
            Node::Math(_) => "math",
            Node::Text(_) => "text",
            Node::Emphasis(_) => "emphasis",
            Node::Strong(_) => "strong",
            Node::Delete(_) => "delete",
            Node::InlineCode(_) => "inlineCode",
            Node::Break => "break",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::Other(other) => &other.kind,
        }
    }

    /// Ordered children of parent nodes, `None` for leaves.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(p)
            | Node::Paragraph(p)
            | Node::Blockquote(p)
            | Node::Emphasis(p)
            | Node::Strong(p)
            | Node::Delete(p)
            | Node::TableRow(p)
            | Node::TableCell(p) => Some(&p.children),
            Node::Heading(h) => Some(&h.children),
            Node::List(l) => Some(&l.children),
            Node::ListItem(i) => Some(&i.children),
            Node::Link(l) => Some(&l.children),
            Node::Table(t) => Some(&t.children),
            Node::Other(o) => o.children.as_ref(),
            Node::ThematicBreak
            | Node::Html(_)
            | Node::Code(_)
            | Node::Math(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break
            | Node::Image(_) => None,
        }
    }

    /// Mutable access to the ordered children of parent nodes.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(p)
            | Node::Paragraph(p)
            | Node::Blockquote(p)
            | Node::Emphasis(p)
            | Node::Strong(p)
            | Node::Delete(p)
            | Node::TableRow(p)
            | Node::TableCell(p) => Some(&mut p.children),
            Node::Heading(h) => Some(&mut h.children),
            Node::List(l) => Some(&mut l.children),
            Node::ListItem(i) => Some(&mut i.children),
            Node::Link(l) => Some(&mut l.children),
            Node::Table(t) => Some(&mut t.children),
            Node::Other(o) => o.children.as_mut(),
            Node::ThematicBreak
            | Node::Html(_)
            | Node::Code(_)
            | Node::Math(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break
            | Node::Image(_) => None,
        }
    }

    /// Visits this node and every descendant, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        if let Some(children) = self.children() {
            for child in children {
                child.walk(visit);
            }
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Parent { children })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Parent { children })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Literal {
            value: value.into(),
        })
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(Literal {
            value: value.into(),
        })
    }

    pub fn code(lang: Option<&str>, value: impl Into<String>) -> Self {
        Node::Code(Code {
            lang: lang.map(str::to_string),
            meta: None,
            value: value.into(),
        })
    }
}

/// Any node outside the modelled set, kept as loaded.
///
/// `children`, when present, is traversed like any other parent's; every
/// other field is carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A node whose only content is its ordered children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A leaf carrying raw text (`text`, `inlineCode`, `html`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
}

/// Represents a heading with a specific depth (1-6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Represents a fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub align: Vec<Option<AlignKind>>,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignKind {
    Left,
    Center,
    Right,
}

/// Rendered math, with host markup hints for the downstream renderer.
///
/// `value` keeps the ASCII-math source; `data` tells the renderer which tag,
/// classes and pre-rendered children to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Math {
    pub meta: Option<String>,
    pub value: String,
    pub data: MathData,
}

impl Math {
    /// Whether this node renders as a block or inline.
    pub fn display(&self) -> MathDisplay {
        if self.data.h_name == MathDisplay::Block.tag_name() {
            MathDisplay::Block
        } else {
            MathDisplay::Inline
        }
    }

    /// The converted markup carried by the first text hint child.
    pub fn markup(&self) -> Option<&str> {
        self.data.h_children.iter().find_map(|child| match child {
            Node::Text(text) => Some(text.value.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathData {
    pub h_name: String,
    pub h_properties: HProperties,
    pub h_children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HProperties {
    pub class_name: Vec<String>,
}

/// Block (display) or inline math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    Block,
    Inline,
}

impl MathDisplay {
    /// Host tag the renderer should emit.
    pub fn tag_name(self) -> &'static str {
        match self {
            MathDisplay::Block => "div",
            MathDisplay::Inline => "span",
        }
    }

    /// Class list attached to the host tag.
    pub fn class_names(self) -> [&'static str; 2] {
        match self {
            MathDisplay::Block => ["math", "math-display"],
            MathDisplay::Inline => ["math", "math-inline"],
        }
    }
}
