//! Replaces ASCII-math code with math nodes.
//!
//! Two kinds of nodes are candidates:
//!
//!     - `code` blocks whose `lang` is one of the configured prefixes
//!     - `inlineCode` spans whose value starts with the opening marker and ends with the closing one
//!
//! Each candidate is converted by a [`MathEngine`] and replaced, at the same
//! index of its parent, by a `math` node carrying the source and the host
//! markup hints (`div`/`span`, `math math-display`/`math math-inline`, and the
//! converted markup as a text child).
//!
//! The pass is depth first and visits every node once. Replacement nodes are
//! not descended into. A node without a parent (the root itself) is never
//! replaced. A conversion error stops the pass immediately: nodes replaced
//! before the failure stay replaced, later ones are left untouched.

use crate::engine::{AsciiMath, MathEngine};
use crate::error::ConversionError;
use crate::mdast::nodes::{HProperties, Math, MathData, MathDisplay, Node};
use crate::options::{Delimiters, EscapeConfig, Options};

/// A matched node: what it becomes and the math source it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub display: MathDisplay,
    pub content: &'a str,
}

/// Decides which nodes hold ASCII-math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    prefixes: Vec<String>,
    delimiters: Delimiters,
}

impl Matcher {
    pub fn new(escape: &EscapeConfig) -> Self {
        Matcher {
            prefixes: escape.prefixes.clone(),
            delimiters: escape.delimiters(),
        }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn matches(&self, node: &Node) -> bool {
        match node {
            Node::Code(code) => code
                .lang
                .as_deref()
                .is_some_and(|lang| !lang.is_empty() && self.prefixes.iter().any(|p| p == lang)),
            Node::InlineCode(code) => {
                code.value.starts_with(&self.delimiters.opening)
                    && code.value.ends_with(&self.delimiters.closing)
            }
            _ => false,
        }
    }

    /// The candidate for `node`, with inline markers already stripped.
    pub fn candidate<'a>(&self, node: &'a Node) -> Option<Candidate<'a>> {
        if !self.matches(node) {
            return None;
        }
        match node {
            Node::Code(code) => Some(Candidate {
                display: MathDisplay::Block,
                content: &code.value,
            }),
            Node::InlineCode(code) => Some(Candidate {
                display: MathDisplay::Inline,
                content: strip_markers(
                    &code.value,
                    self.delimiters.opening.len(),
                    self.delimiters.closing.len(),
                ),
            }),
            _ => None,
        }
    }
}

/// Cuts `open_len` bytes from the front and `close_len` from the back.
///
/// Mirrors `value.slice(open_len, -close_len)`: a zero `close_len` means an
/// end index of 0, and a range that ends before it starts is empty. Both
/// cases yield `""` rather than an error.
pub fn strip_markers(value: &str, open_len: usize, close_len: usize) -> &str {
    let start = open_len.min(value.len());
    let end = if close_len == 0 {
        0
    } else {
        value.len().saturating_sub(close_len)
    };
    if end <= start {
        return "";
    }
    value.get(start..end).unwrap_or("")
}

/// Math node rendered as a block (`div.math.math-display`).
pub fn math_block(content: &str, markup: String) -> Math {
    math_node(MathDisplay::Block, content, markup)
}

/// Math node rendered inline (`span.math.math-inline`).
pub fn math_inline(content: &str, markup: String) -> Math {
    math_node(MathDisplay::Inline, content, markup)
}

fn math_node(display: MathDisplay, content: &str, markup: String) -> Math {
    Math {
        meta: None,
        value: content.to_string(),
        data: MathData {
            h_name: display.tag_name().to_string(),
            h_properties: HProperties {
                class_name: display
                    .class_names()
                    .iter()
                    .map(|class| class.to_string())
                    .collect(),
            },
            h_children: vec![Node::text(markup)],
        },
    }
}

/// A configuration-bound rewriter.
///
/// Built once with [`Rewriter::build`], then applied to any number of trees.
/// It keeps no state between passes.
#[derive(Debug, Clone)]
pub struct Rewriter<E = AsciiMath> {
    matcher: Matcher,
    engine: E,
}

impl Rewriter<AsciiMath> {
    /// Rewriter using the built-in engine configured from `options`.
    pub fn build(options: &Options) -> Self {
        let engine = AsciiMath::new(&options.engine());
        Rewriter::with_engine(options, engine)
    }
}

impl Default for Rewriter<AsciiMath> {
    fn default() -> Self {
        Rewriter::build(&Options::default())
    }
}

impl<E: MathEngine> Rewriter<E> {
    /// Rewriter using a caller-supplied engine. Engine options in `options` are ignored.
    pub fn with_engine(options: &Options, engine: E) -> Self {
        Rewriter {
            matcher: Matcher::new(&options.escape()),
            engine,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Rewrite `tree` in place, returning how many nodes were replaced.
    pub fn rewrite(&self, tree: &mut Node) -> Result<usize, ConversionError> {
        let mut replaced = 0;
        if let Some(children) = tree.children_mut() {
            self.rewrite_children(children, &mut replaced)?;
        }
        log::debug!("replaced {replaced} ascii-math node(s)");
        Ok(replaced)
    }

    /// Rewrite an owned tree and hand it back.
    pub fn transform(&self, mut tree: Node) -> Result<Node, ConversionError> {
        self.rewrite(&mut tree)?;
        Ok(tree)
    }

    /// Continuation form of [`Rewriter::transform`] for callback-driven hosts.
    ///
    /// `aux` is passed through to `next` untouched.
    pub fn transform_with<A, R>(
        &self,
        tree: Node,
        aux: A,
        next: impl FnOnce(Result<Node, ConversionError>, A) -> R,
    ) -> R {
        next(self.transform(tree), aux)
    }

    /// Build the replacement for a candidate.
    pub fn convert(&self, candidate: Candidate<'_>) -> Result<Math, ConversionError> {
        let markup = self.engine.to_tex(candidate.content)?;
        Ok(match candidate.display {
            MathDisplay::Block => math_block(candidate.content, markup),
            MathDisplay::Inline => math_inline(candidate.content, markup),
        })
    }

    fn rewrite_children(
        &self,
        children: &mut [Node],
        replaced: &mut usize,
    ) -> Result<(), ConversionError> {
        for child in children.iter_mut() {
            let replacement = match self.matcher.candidate(child) {
                Some(candidate) => Some(self.convert(candidate)?),
                None => None,
            };

            if let Some(math) = replacement {
                log::trace!("{} -> math ({:?})", child.kind(), math.display());
                *child = Node::Math(math);
                *replaced += 1;
            } else if let Some(grandchildren) = child.children_mut() {
                self.rewrite_children(grandchildren, replaced)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(source: &str) -> Result<String, ConversionError> {
        Ok(format!("<{source}>"))
    }

    #[test]
    fn test_strip_markers_like_slice() {
        assert_eq!(strip_markers("$x$", 1, 1), "x");
        assert_eq!(strip_markers("$$", 1, 1), "");
        assert_eq!(strip_markers("$", 1, 1), "");
        assert_eq!(strip_markers("abc", 0, 1), "ab");
        assert_eq!(strip_markers("abc", 1, 0), "");
        assert_eq!(strip_markers("\\(x\\)", 2, 2), "x");
    }

    #[test]
    fn test_block_builder_shape() {
        let math = math_block("int", "\\int".to_string());
        assert_eq!(math.meta, None);
        assert_eq!(math.value, "int");
        assert_eq!(math.data.h_name, "div");
        assert_eq!(math.data.h_properties.class_name, vec!["math", "math-display"]);
        assert_eq!(math.data.h_children, vec![Node::text("\\int")]);
        assert_eq!(math.display(), MathDisplay::Block);
    }

    #[test]
    fn test_inline_builder_shape() {
        let math = math_inline("x", "x".to_string());
        assert_eq!(math.data.h_name, "span");
        assert_eq!(math.data.h_properties.class_name, vec!["math", "math-inline"]);
        assert_eq!(math.markup(), Some("x"));
        assert_eq!(math.display(), MathDisplay::Inline);
    }

    #[test]
    fn test_matcher_requires_listed_lang() {
        let matcher = Matcher::new(&EscapeConfig::default());
        assert!(matcher.matches(&Node::code(Some("am"), "x")));
        assert!(matcher.matches(&Node::code(Some("asciimath"), "x")));
        assert!(!matcher.matches(&Node::code(Some("amath"), "x")));
        assert!(!matcher.matches(&Node::code(Some("AM"), "x")));
        assert!(!matcher.matches(&Node::code(None, "x")));
        assert!(!matcher.matches(&Node::text("$x$")));
    }

    #[test]
    fn test_empty_lang_never_matches() {
        let options = Options::default().with_prefixes(vec![String::new()]);
        let matcher = Matcher::new(&options.escape());
        assert!(!matcher.matches(&Node::code(Some(""), "x")));
    }

    #[test]
    fn test_matcher_checks_both_markers() {
        let matcher = Matcher::new(&EscapeConfig::default());
        assert!(matcher.matches(&Node::inline_code("$x$")));
        assert!(!matcher.matches(&Node::inline_code("$x")));
        assert!(!matcher.matches(&Node::inline_code("x$")));
        assert!(matcher.matches(&Node::inline_code("$")));
    }

    #[test]
    fn test_candidate_strips_inline_markers_only() {
        let matcher = Matcher::new(&EscapeConfig::default());
        let inline = Node::inline_code("$a+b$");
        assert_eq!(
            matcher.candidate(&inline),
            Some(Candidate {
                display: MathDisplay::Inline,
                content: "a+b"
            })
        );
        let block = Node::code(Some("am"), "$a+b$");
        assert_eq!(
            matcher.candidate(&block),
            Some(Candidate {
                display: MathDisplay::Block,
                content: "$a+b$"
            })
        );
    }

    #[test]
    fn test_rewrite_replaces_in_place() {
        let rewriter = Rewriter::with_engine(&Options::default(), echo);
        let mut tree = Node::root(vec![
            Node::paragraph(vec![
                Node::text("before "),
                Node::inline_code("$x$"),
                Node::text(" after"),
            ]),
            Node::code(Some("am"), "y"),
        ]);

        let replaced = rewriter.rewrite(&mut tree).unwrap();
        assert_eq!(replaced, 2);
        assert_eq!(
            tree,
            Node::root(vec![
                Node::paragraph(vec![
                    Node::text("before "),
                    Node::Math(math_inline("x", "<x>".to_string())),
                    Node::text(" after"),
                ]),
                Node::Math(math_block("y", "<y>".to_string())),
            ])
        );
    }

    #[test]
    fn test_matching_root_is_left_alone() {
        let rewriter = Rewriter::with_engine(&Options::default(), echo);
        let mut tree = Node::code(Some("am"), "x");
        assert_eq!(rewriter.rewrite(&mut tree).unwrap(), 0);
        assert_eq!(tree, Node::code(Some("am"), "x"));
    }

    #[test]
    fn test_failure_keeps_earlier_replacements() {
        let failing = |source: &str| {
            if source == "bad" {
                Err(ConversionError::Engine("bad input".to_string()))
            } else {
                Ok(source.to_string())
            }
        };
        let rewriter = Rewriter::with_engine(&Options::default(), failing);
        let mut tree = Node::root(vec![
            Node::code(Some("am"), "good"),
            Node::code(Some("am"), "bad"),
            Node::code(Some("am"), "later"),
        ]);

        let err = rewriter.rewrite(&mut tree).unwrap_err();
        assert_eq!(err, ConversionError::Engine("bad input".to_string()));
        let children = tree.children().unwrap();
        assert!(matches!(children[0], Node::Math(_)));
        assert_eq!(children[1], Node::code(Some("am"), "bad"));
        assert_eq!(children[2], Node::code(Some("am"), "later"));
    }

    #[test]
    fn test_transform_with_passes_aux_through() {
        let rewriter = Rewriter::with_engine(&Options::default(), echo);
        let tree = Node::root(vec![Node::code(Some("am"), "x")]);
        let (result, aux) = rewriter.transform_with(tree, "file.md", |result, aux| (result, aux));
        assert_eq!(aux, "file.md");
        let tree = result.unwrap();
        assert!(matches!(tree.children().unwrap()[0], Node::Math(_)));
    }
}
