//! Error types for math conversion

use std::fmt;

/// Errors raised while converting ASCII-math source to TeX
///
/// Offsets are byte offsets into the source after `replaceBeforeTokenizing`
/// substitutions have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A `"` opened quoted text that never closes
    UnterminatedText { offset: usize },
    /// A raw argument such as `text(` or `color(` that never closes
    UnterminatedArgument { symbol: String, offset: usize },
    /// A unary or binary operator reached the end of input without its operand
    MissingOperand { symbol: String, offset: usize },
    /// Brackets or operator arguments nested beyond the parser's limit
    NestingTooDeep { offset: usize },
    /// Failure reported by a caller-supplied engine
    Engine(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::UnterminatedText { offset } => {
                write!(f, "Unterminated quoted text starting at offset {offset}")
            }
            ConversionError::UnterminatedArgument { symbol, offset } => {
                write!(f, "Unterminated argument for '{symbol}' at offset {offset}")
            }
            ConversionError::MissingOperand { symbol, offset } => {
                write!(f, "Missing operand for '{symbol}' at offset {offset}")
            }
            ConversionError::NestingTooDeep { offset } => {
                write!(f, "Expression nested too deeply at offset {offset}")
            }
            ConversionError::Engine(msg) => write!(f, "Engine error: {msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}
