//! ASCII-math to TeX conversion.
//!
//! The rewriter only needs something that turns ASCII-math source into markup;
//! that seam is [`MathEngine`]. [`AsciiMath`] is the built-in implementation:
//!
//!     source → replaceBeforeTokenizing → tokens (lexer.rs) → expressions (parser.rs) → TeX
//!
//! The engine options are opaque to the rewriter, which forwards them as
//! [`EngineOptions`] without looking at them.

pub mod lexer;
pub mod parser;
pub mod symbols;

use crate::error::ConversionError;
use crate::options::EngineOptions;
use std::collections::HashMap;

/// Converts ASCII-math source into math markup.
pub trait MathEngine {
    fn to_tex(&self, source: &str) -> Result<String, ConversionError>;
}

impl<F> MathEngine for F
where
    F: Fn(&str) -> Result<String, ConversionError>,
{
    fn to_tex(&self, source: &str) -> Result<String, ConversionError> {
        self(source)
    }
}

/// The built-in ASCII-math engine.
#[derive(Debug, Clone)]
pub struct AsciiMath {
    display: bool,
    ext_const: HashMap<String, String>,
    replacements: Vec<(String, String)>,
}

impl AsciiMath {
    pub fn new(options: &EngineOptions) -> Self {
        AsciiMath {
            display: options.display.unwrap_or(true),
            ext_const: options.ext_const.iter().cloned().collect(),
            replacements: options.replace_before_tokenizing.clone(),
        }
    }

    /// Whether output is prefixed with `\displaystyle`.
    pub fn display(&self) -> bool {
        self.display
    }

    fn substitute(&self, source: &str) -> String {
        self.replacements
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .fold(source.to_string(), |text, (from, to)| text.replace(from, to))
    }
}

impl Default for AsciiMath {
    fn default() -> Self {
        AsciiMath::new(&EngineOptions::default())
    }
}

impl MathEngine for AsciiMath {
    fn to_tex(&self, source: &str) -> Result<String, ConversionError> {
        let source = self.substitute(source);
        let tokens = lexer::tokenize(&source, &self.ext_const)?;
        log::trace!("tokenized {:?} into {} tokens", source, tokens.len());

        let body = parser::Parser::new(tokens).parse()?;
        let tex = parser::render_list(&body);

        if self.display && !tex.is_empty() {
            Ok(format!("\\displaystyle {tex}"))
        } else {
            Ok(tex)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline_engine() -> AsciiMath {
        AsciiMath::new(&EngineOptions {
            display: Some(false),
            ..Default::default()
        })
    }

    #[test]
    fn test_limit_definition_of_e() {
        let tex = inline_engine().to_tex("lim_(n->oo)(1+1/n)^n=\"e\"").unwrap();
        assert_eq!(
            tex,
            "\\lim _{ n \\to \\infty } \\left( 1 + \\frac{ 1 }{ n } \\right) ^{ n } = \\text{e}"
        );
    }

    #[test]
    fn test_improper_integral() {
        let tex = inline_engine().to_tex("int_0^(+oo)\"e\"^-x dx").unwrap();
        assert_eq!(
            tex,
            "\\int _{ 0 } ^{ + \\infty } \\text{e} ^{ {-x} } {\\text{d}x}"
        );
    }

    #[test]
    fn test_display_defaults_on() {
        let engine = AsciiMath::default();
        assert!(engine.display());
        assert_eq!(engine.to_tex("int").unwrap(), "\\displaystyle \\int");
        assert_eq!(engine.to_tex("").unwrap(), "");
    }

    #[test]
    fn test_replace_before_tokenizing_runs_in_order() {
        let engine = AsciiMath::new(&EngineOptions {
            display: Some(false),
            replace_before_tokenizing: vec![
                ("**".to_string(), "^".to_string()),
                ("^2".to_string(), "^3".to_string()),
                (String::new(), "ignored".to_string()),
            ],
            ..Default::default()
        });
        assert_eq!(engine.to_tex("x**2").unwrap(), "x ^{ 3 }");
    }

    #[test]
    fn test_ext_const_extends_symbols() {
        let engine = AsciiMath::new(&EngineOptions {
            display: Some(false),
            ext_const: vec![("ii".to_string(), "\\mathrm{i}".to_string())],
            ..Default::default()
        });
        assert_eq!(engine.to_tex("e^(ii pi)").unwrap(), "e ^{ \\mathrm{i} \\pi }");
    }

    #[test]
    fn test_invalid_source_is_an_error() {
        let err = inline_engine().to_tex("\"unterminated").unwrap_err();
        assert_eq!(err, ConversionError::UnterminatedText { offset: 0 });
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let source = "(".repeat(100_000);
        assert!(matches!(
            inline_engine().to_tex(&source),
            Err(ConversionError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn test_closures_are_engines() {
        let engine = |source: &str| Ok::<_, ConversionError>(source.to_uppercase());
        assert_eq!(engine.to_tex("abc").unwrap(), "ABC");
    }
}
