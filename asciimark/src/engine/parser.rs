//! Parser and TeX emitter for ASCII-math tokens.
//!
//! Grammar:
//!
//!     S ::= constant | l E r | unary S | binary S S
//!     I ::= S | S_S | S^S | S_S^S
//!     E ::= I E | I/I E
//!
//! Pieces are emitted separated by one space. Bracket groups lose their outer
//! brackets when they are the argument of a script, fraction or operator.

use super::lexer::{Token, TokenKind};
use super::symbols::BinaryKind;
use crate::error::ConversionError;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Ready-made TeX
    Atom(String),
    Text(String),
    Group {
        open: &'static str,
        /// `None` when the input ended before the closing bracket
        close: Option<&'static str>,
        body: Vec<Expr>,
    },
    Scripted {
        base: Box<Expr>,
        sub: Option<Box<Expr>>,
        sup: Option<Box<Expr>>,
    },
    Frac(Box<Expr>, Box<Expr>),
    Command(&'static str, Box<Expr>),
    Fence(&'static str, &'static str, Box<Expr>),
    Root(Box<Expr>, Box<Expr>),
    Over {
        command: &'static str,
        over: Box<Expr>,
        base: Box<Expr>,
    },
    Color(String, Box<Expr>),
    /// A minus sign bound to a script argument, `x^-1`
    Negated(Box<Expr>),
}

/// Deepest nesting of simple expressions (groups, operator arguments) accepted.
pub const MAX_NESTING: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Vec<Expr>, ConversionError> {
        let (body, _) = self.expressions(false)?;
        Ok(body)
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// `E`, up to the end of input or, inside a group, the closing bracket.
    fn expressions(
        &mut self,
        in_group: bool,
    ) -> Result<(Vec<Expr>, Option<&'static str>), ConversionError> {
        let mut body = Vec::new();
        loop {
            match self.peek() {
                None => return Ok((body, None)),
                Some(TokenKind::RightBracket(close)) if in_group => {
                    let close = *close;
                    self.pos += 1;
                    return Ok((body, Some(close)));
                }
                Some(_) => {
                    let mut item = self.intermediate()?;
                    while let Some(TokenKind::Divide) = self.peek() {
                        let slash = self.next();
                        let denominator = self.operand_intermediate(slash)?;
                        item = Expr::Frac(Box::new(item), Box::new(denominator));
                    }
                    body.push(item);
                }
            }
        }
    }

    /// `I`: a simple expression with optional subscript and superscript.
    fn intermediate(&mut self) -> Result<Expr, ConversionError> {
        let base = self.simple()?;
        let mut sub = None;
        let mut sup = None;

        loop {
            match self.peek() {
                Some(TokenKind::Sub) if sub.is_none() => {
                    let mark = self.next();
                    sub = Some(Box::new(self.script(mark)?));
                }
                Some(TokenKind::Sup) if sup.is_none() => {
                    let mark = self.next();
                    sup = Some(Box::new(self.script(mark)?));
                }
                _ => break,
            }
        }

        if sub.is_none() && sup.is_none() {
            Ok(base)
        } else {
            Ok(Expr::Scripted {
                base: Box::new(base),
                sub,
                sup,
            })
        }
    }

    fn operand_intermediate(&mut self, operator: Option<Token>) -> Result<Expr, ConversionError> {
        if self.peek().is_none() {
            return Err(missing_operand(operator));
        }
        self.intermediate()
    }

    /// Script argument; a leading minus binds to the following simple expression.
    fn script(&mut self, mark: Option<Token>) -> Result<Expr, ConversionError> {
        if let Some(TokenKind::Const(tex)) = self.peek() {
            if tex == "-" {
                let minus = self.next();
                return Ok(Expr::Negated(Box::new(self.operand(minus)?)));
            }
        }
        self.operand(mark)
    }

    /// A simple expression that `operator` requires.
    fn operand(&mut self, operator: Option<Token>) -> Result<Expr, ConversionError> {
        if self.peek().is_none() {
            return Err(missing_operand(operator));
        }
        self.simple()
    }

    /// `S`
    fn simple(&mut self) -> Result<Expr, ConversionError> {
        if self.depth >= MAX_NESTING {
            let offset = self.tokens.get(self.pos).map_or(0, |t| t.offset);
            return Err(ConversionError::NestingTooDeep { offset });
        }
        self.depth += 1;
        let expr = self.simple_unguarded();
        self.depth -= 1;
        expr
    }

    fn simple_unguarded(&mut self) -> Result<Expr, ConversionError> {
        let Some(token) = self.next() else {
            return Err(ConversionError::MissingOperand {
                symbol: String::new(),
                offset: 0,
            });
        };

        let expr = match token.kind.clone() {
            TokenKind::Const(tex) => Expr::Atom(tex),
            TokenKind::Number(text) | TokenKind::Ident(text) => Expr::Atom(text),
            TokenKind::Text(text) | TokenKind::Raw(text) => Expr::Text(text),
            TokenKind::LeftBracket(open) => {
                let (body, close) = self.expressions(true)?;
                Expr::Group { open, close, body }
            }
            TokenKind::RightBracket(close) => Expr::Atom(close.to_string()),
            TokenKind::Command(command) => {
                Expr::Command(command, Box::new(self.operand(Some(token))?))
            }
            TokenKind::Fence(left, right) => {
                Expr::Fence(left, right, Box::new(self.operand(Some(token))?))
            }
            TokenKind::Binary(kind) => self.binary(kind, token)?,
            TokenKind::Sub => Expr::Atom("\\_".to_string()),
            TokenKind::Sup => Expr::Atom("\\hat{}".to_string()),
            TokenKind::Divide => Expr::Atom("/".to_string()),
        };
        Ok(expr)
    }

    fn binary(&mut self, kind: BinaryKind, token: Token) -> Result<Expr, ConversionError> {
        if kind == BinaryKind::Color {
            let color = match self.next() {
                Some(Token {
                    kind: TokenKind::Raw(color),
                    ..
                }) => color,
                _ => return Err(missing_operand(Some(token))),
            };
            return Ok(Expr::Color(color, Box::new(self.operand(Some(token))?)));
        }

        let first = Box::new(self.operand(Some(token.clone()))?);
        let second = Box::new(self.operand(Some(token))?);
        let expr = match kind {
            BinaryKind::Frac => Expr::Frac(first, second),
            BinaryKind::Root => Expr::Root(first, second),
            BinaryKind::Stackrel => Expr::Over {
                command: "\\stackrel",
                over: first,
                base: second,
            },
            BinaryKind::Overset => Expr::Over {
                command: "\\overset",
                over: first,
                base: second,
            },
            BinaryKind::Underset => Expr::Over {
                command: "\\underset",
                over: first,
                base: second,
            },
            BinaryKind::Color => unreachable!("color is handled above"),
        };
        Ok(expr)
    }
}

fn missing_operand(operator: Option<Token>) -> ConversionError {
    match operator {
        Some(token) => ConversionError::MissingOperand {
            symbol: token.symbol,
            offset: token.offset,
        },
        None => ConversionError::MissingOperand {
            symbol: String::new(),
            offset: 0,
        },
    }
}

/// Emit a sequence of expressions as TeX.
pub fn render_list(body: &[Expr]) -> String {
    body.iter().map(render).collect::<Vec<_>>().join(" ")
}

pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Atom(tex) => tex.clone(),
        Expr::Text(text) => format!("\\text{{{text}}}"),
        Expr::Group { open, close, body } => {
            let inner = render_list(body);
            let close = close.unwrap_or(".");
            if *open == "." && close == "." {
                braced(&inner)
            } else if inner.is_empty() {
                format!("\\left{open} \\right{close}")
            } else {
                format!("\\left{open} {inner} \\right{close}")
            }
        }
        Expr::Scripted { base, sub, sup } => {
            let mut out = render(base);
            if let Some(sub) = sub {
                out.push_str(" _");
                out.push_str(&braced(&argument(sub)));
            }
            if let Some(sup) = sup {
                out.push_str(" ^");
                out.push_str(&braced(&argument(sup)));
            }
            out
        }
        Expr::Frac(numerator, denominator) => format!(
            "\\frac{}{}",
            braced(&argument(numerator)),
            braced(&argument(denominator))
        ),
        Expr::Command(command, arg) => format!("{command}{}", braced(&argument(arg))),
        Expr::Fence(left, right, arg) => {
            format!("\\left{left} {} \\right{right}", argument(arg))
        }
        Expr::Root(index, radicand) => format!(
            "\\sqrt[ {} ]{}",
            argument(index),
            braced(&argument(radicand))
        ),
        Expr::Over {
            command,
            over,
            base,
        } => format!(
            "{command}{}{}",
            braced(&argument(over)),
            braced(&argument(base))
        ),
        Expr::Color(color, arg) => format!("{{\\color{{{color}}} {}}}", argument(arg)),
        Expr::Negated(arg) => format!("{{-{}}}", render(arg)),
    }
}

/// Render an argument, dropping the outer brackets of a group.
fn argument(expr: &Expr) -> String {
    match expr {
        Expr::Group { body, .. } => render_list(body),
        other => render(other),
    }
}

fn braced(inner: &str) -> String {
    if inner.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {inner} }}")
    }
}
