//! Tokenizer for ASCII-math source.
//!
//! Whitespace only separates tokens. At each position the lexer tries, in
//! order: quoted text, a number, the longest symbol spelling (user constants
//! first, then the built-in table), a single letter, and finally any single
//! character as a literal.

use super::symbols::{self, BinaryKind, SymbolKind, MAX_SYMBOL_LEN};
use crate::error::ConversionError;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Ready-made TeX
    Const(String),
    Number(String),
    Ident(String),
    /// Quoted text or the argument of `text(...)`
    Text(String),
    /// Raw parenthesised argument, e.g. the color of `color(red)`
    Raw(String),
    LeftBracket(&'static str),
    RightBracket(&'static str),
    Command(&'static str),
    Fence(&'static str, &'static str),
    Binary(BinaryKind),
    Sub,
    Sup,
    Divide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source spelling
    pub symbol: String,
    /// Byte offset of the spelling
    pub offset: usize,
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    ext_const: &'a HashMap<String, String>,
    max_len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, ext_const: &'a HashMap<String, String>) -> Self {
        let ext_max = ext_const.keys().map(String::len).max().unwrap_or(0);
        Lexer {
            source,
            pos: 0,
            ext_const,
            max_len: ext_max.max(*MAX_SYMBOL_LEN),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ConversionError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn next_token(&mut self) -> Result<Option<Token>, ConversionError> {
        self.skip_whitespace();
        let rest = self.rest();
        let offset = self.pos;
        let Some(first) = rest.chars().next() else {
            return Ok(None);
        };

        if first == '"' {
            return self.quoted_text(offset).map(Some);
        }

        if first.is_ascii_digit() {
            let len = number_len(rest);
            self.pos += len;
            return Ok(Some(Token {
                kind: TokenKind::Number(rest[..len].to_string()),
                symbol: rest[..len].to_string(),
                offset,
            }));
        }

        if let Some(token) = self.symbol(offset)? {
            return Ok(Some(token));
        }

        self.pos += first.len_utf8();
        let symbol = first.to_string();
        let kind = if first.is_alphabetic() {
            TokenKind::Ident(symbol.clone())
        } else {
            TokenKind::Const(symbol.clone())
        };
        Ok(Some(Token {
            kind,
            symbol,
            offset,
        }))
    }

    fn quoted_text(&mut self, offset: usize) -> Result<Token, ConversionError> {
        let body = &self.source[offset + 1..];
        let end = body
            .find('"')
            .ok_or(ConversionError::UnterminatedText { offset })?;
        self.pos = offset + 1 + end + 1;
        Ok(Token {
            kind: TokenKind::Text(body[..end].to_string()),
            symbol: "\"".to_string(),
            offset,
        })
    }

    /// Longest symbol spelling at the current position.
    fn symbol(&mut self, offset: usize) -> Result<Option<Token>, ConversionError> {
        let rest = self.rest();
        for len in (1..=self.max_len.min(rest.len())).rev() {
            let Some(candidate) = rest.get(..len) else {
                continue;
            };

            if let Some(tex) = self.ext_const.get(candidate) {
                self.pos += len;
                return Ok(Some(Token {
                    kind: TokenKind::Const(tex.clone()),
                    symbol: candidate.to_string(),
                    offset,
                }));
            }

            let Some(symbol) = symbols::lookup(candidate) else {
                continue;
            };
            self.pos += len;

            let kind = match symbol.kind {
                SymbolKind::Const => TokenKind::Const(symbol.tex.to_string()),
                SymbolKind::LeftBracket => TokenKind::LeftBracket(symbol.tex),
                SymbolKind::RightBracket => TokenKind::RightBracket(symbol.tex),
                SymbolKind::Command => TokenKind::Command(symbol.tex),
                SymbolKind::Fence(left, right) => TokenKind::Fence(left, right),
                SymbolKind::Text => TokenKind::Text(self.raw_argument(candidate, offset)?),
                SymbolKind::Binary(kind) => TokenKind::Binary(kind),
                SymbolKind::Sub => TokenKind::Sub,
                SymbolKind::Sup => TokenKind::Sup,
                SymbolKind::Divide => TokenKind::Divide,
            };
            return Ok(Some(Token {
                kind,
                symbol: candidate.to_string(),
                offset,
            }));
        }
        Ok(None)
    }

    /// Reads `( ... )` verbatim after `text`, `mbox` or `color`, honoring nesting.
    fn raw_argument(&mut self, symbol: &str, offset: usize) -> Result<String, ConversionError> {
        self.skip_whitespace();
        let rest = self.rest();
        if !rest.starts_with('(') {
            return Err(ConversionError::MissingOperand {
                symbol: symbol.to_string(),
                offset,
            });
        }

        let mut depth = 0usize;
        for (index, ch) in rest.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += index + 1;
                        return Ok(rest[1..index].to_string());
                    }
                }
                _ => {}
            }
        }

        Err(ConversionError::UnterminatedArgument {
            symbol: symbol.to_string(),
            offset,
        })
    }
}

/// Digits with at most one decimal point followed by more digits.
fn number_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).is_some_and(u8::is_ascii_digit) {
        len += 1;
        len += bytes[len..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    len
}

/// Tokenize with the built-in table plus `ext_const`.
pub fn tokenize(
    source: &str,
    ext_const: &HashMap<String, String>,
) -> Result<Vec<Token>, ConversionError> {
    let mut tokens = Lexer::new(source, ext_const).tokenize()?;

    // `color` takes its first argument raw, like `text`
    let mut index = 0;
    while index < tokens.len() {
        if tokens[index].kind == TokenKind::Binary(BinaryKind::Color) {
            let (raw, consumed) = color_argument(source, &tokens, index)?;
            let offset = tokens[index + 1].offset;
            let tail = tokens.split_off(index + 1 + consumed);
            tokens.truncate(index + 1);
            tokens.push(Token {
                kind: TokenKind::Raw(raw),
                symbol: "(".to_string(),
                offset,
            });
            tokens.extend(tail);
        }
        index += 1;
    }

    Ok(tokens)
}

/// Raw text of the bracket group following `color`, and how many tokens it spans.
fn color_argument(
    source: &str,
    tokens: &[Token],
    color_index: usize,
) -> Result<(String, usize), ConversionError> {
    let color = &tokens[color_index];
    let missing = || ConversionError::MissingOperand {
        symbol: color.symbol.clone(),
        offset: color.offset,
    };

    let open = tokens.get(color_index + 1).ok_or_else(missing)?;
    if open.kind != TokenKind::LeftBracket("(") {
        return Err(missing());
    }

    let mut depth = 0usize;
    for (consumed, token) in tokens[color_index + 1..].iter().enumerate() {
        match token.kind {
            TokenKind::LeftBracket(_) => depth += 1,
            TokenKind::RightBracket(_) => {
                depth -= 1;
                if depth == 0 {
                    let raw = &source[open.offset + 1..token.offset];
                    return Ok((raw.trim().to_string(), consumed + 1));
                }
            }
            _ => {}
        }
    }

    Err(ConversionError::UnterminatedArgument {
        symbol: color.symbol.clone(),
        offset: color.offset,
    })
}
