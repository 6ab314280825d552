//! Rewriter options and their normalization.
//!
//! [`Options`] is what callers hand in: every field may be absent. It is split
//! into the escape settings the matcher needs ([`EscapeConfig`], then
//! [`Delimiters`]) and the math-domain subset forwarded untouched to the
//! engine ([`EngineOptions`]). Nothing here validates input; absent or empty
//! values fall back to defaults and everything else passes through.

use serde::{Deserialize, Serialize};

/// Code block languages recognized when no prefixes are configured.
pub const DEFAULT_PREFIXES: [&str; 2] = ["am", "asciimath"];

/// Opening marker of inline math as written in configuration.
pub const DEFAULT_INLINE_OPEN: &str = "`$";

/// Closing marker of inline math as written in configuration.
pub const DEFAULT_INLINE_CLOSE: &str = "$`";

/// Code block languages, given either as one string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prefixes {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Prefixes {
    fn from(prefix: &str) -> Self {
        Prefixes::One(prefix.to_string())
    }
}

impl From<Vec<String>> for Prefixes {
    fn from(prefixes: Vec<String>) -> Self {
        Prefixes::Many(prefixes)
    }
}

/// Caller-facing configuration of the rewriter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub prefixes: Option<Prefixes>,
    pub inline_open: Option<String>,
    pub inline_close: Option<String>,
    /// Render in display style. The engine treats `None` as `true`.
    pub display: Option<bool>,
    /// Extra `[symbol, tex]` constants for the engine's symbol table.
    pub ext_const: Vec<(String, String)>,
    /// `[from, to]` text substitutions applied, in order, before tokenizing.
    pub replace_before_tokenizing: Vec<(String, String)>,
}

impl Options {
    pub fn with_prefixes(mut self, prefixes: impl Into<Prefixes>) -> Self {
        self.prefixes = Some(prefixes.into());
        self
    }

    pub fn with_inline_markers(mut self, open: &str, close: &str) -> Self {
        self.inline_open = Some(open.to_string());
        self.inline_close = Some(close.to_string());
        self
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = Some(display);
        self
    }

    /// The escape settings with defaults applied.
    pub fn escape(&self) -> EscapeConfig {
        EscapeConfig::from_options(self)
    }

    /// The math-domain subset handed to the engine.
    pub fn engine(&self) -> EngineOptions {
        EngineOptions {
            display: self.display,
            ext_const: self.ext_const.clone(),
            replace_before_tokenizing: self.replace_before_tokenizing.clone(),
        }
    }
}

/// Canonical prefix list.
///
/// A single string becomes a one-element list, a list passes through as is
/// (no trimming, no deduplication) and absence yields [`DEFAULT_PREFIXES`].
pub fn normalize_prefixes(prefixes: Option<&Prefixes>) -> Vec<String> {
    match prefixes {
        Some(Prefixes::One(prefix)) => vec![prefix.clone()],
        Some(Prefixes::Many(prefixes)) => prefixes.clone(),
        None => DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
    }
}

/// Escape settings after defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeConfig {
    pub prefixes: Vec<String>,
    pub inline_open: String,
    pub inline_close: String,
}

impl EscapeConfig {
    pub fn from_options(options: &Options) -> Self {
        EscapeConfig {
            prefixes: normalize_prefixes(options.prefixes.as_ref()),
            inline_open: or_default(options.inline_open.as_deref(), DEFAULT_INLINE_OPEN),
            inline_close: or_default(options.inline_close.as_deref(), DEFAULT_INLINE_CLOSE),
        }
    }

    pub fn delimiters(&self) -> Delimiters {
        Delimiters::resolve(&self.inline_open, &self.inline_close)
    }
}

impl Default for EscapeConfig {
    fn default() -> Self {
        EscapeConfig::from_options(&Options::default())
    }
}

// Empty strings count as absent.
fn or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// Bare markers matched against inline code values.
///
/// Inline code values never contain the backtick fence, so the fence is
/// stripped: leading backticks from the opening marker, trailing backticks
/// from the closing marker. Either marker may end up empty, in which case it
/// matches every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub opening: String,
    pub closing: String,
}

impl Delimiters {
    pub fn resolve(inline_open: &str, inline_close: &str) -> Self {
        Delimiters {
            opening: inline_open.trim_start_matches('`').to_string(),
            closing: inline_close.trim_end_matches('`').to_string(),
        }
    }
}

/// Options forwarded verbatim to the conversion engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub display: Option<bool>,
    pub ext_const: Vec<(String, String)>,
    pub replace_before_tokenizing: Vec<(String, String)>,
}
