//! Shared configuration loader for the asciimark toolchain.
//!
//! `defaults/asciimark.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AsciiMarkConfig`],
//! which converts into the rewriter's [`Options`].

use asciimark::{Options, Prefixes};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/asciimark.default.toml");

/// Top-level configuration consumed by asciimark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AsciiMarkConfig {
    pub escape: EscapeSection,
    pub engine: EngineSection,
    pub output: OutputSection,
}

/// Which code is treated as ASCII-math.
#[derive(Debug, Clone, Deserialize)]
pub struct EscapeSection {
    pub prefixes: Option<Prefixes>,
    #[serde(default)]
    pub inline_open: Option<String>,
    #[serde(default)]
    pub inline_close: Option<String>,
}

/// Options handed to the conversion engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    pub display: Option<bool>,
    #[serde(default)]
    pub ext_const: Vec<ExtConst>,
    #[serde(default)]
    pub replace_before_tokenizing: Vec<Replacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtConst {
    pub symbol: String,
    pub tex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    pub pretty: bool,
}

impl From<&AsciiMarkConfig> for Options {
    fn from(config: &AsciiMarkConfig) -> Self {
        Options {
            prefixes: config.escape.prefixes.clone(),
            inline_open: config.escape.inline_open.clone(),
            inline_close: config.escape.inline_close.clone(),
            display: config.engine.display,
            ext_const: config
                .engine
                .ext_const
                .iter()
                .map(|c| (c.symbol.clone(), c.tex.clone()))
                .collect(),
            replace_before_tokenizing: config
                .engine
                .replace_before_tokenizing
                .iter()
                .map(|r| (r.from.clone(), r.to.clone()))
                .collect(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AsciiMarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AsciiMarkConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(
            config.escape.prefixes,
            Some(Prefixes::Many(vec!["am".into(), "asciimath".into()]))
        );
        assert_eq!(config.escape.inline_open.as_deref(), Some("`$"));
        assert_eq!(config.escape.inline_close.as_deref(), Some("$`"));
        assert_eq!(config.engine.display, Some(true));
        assert!(config.engine.ext_const.is_empty());
        assert!(config.output.pretty);
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        let options = Options::from(&config);
        assert_eq!(options.escape(), Options::default().escape());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("escape.prefixes", "mathjax")
            .expect("override to apply")
            .set_override("output.pretty", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.escape.prefixes, Some(Prefixes::One("mathjax".into())));
        assert!(!config.output.pretty);

        let options = Options::from(&config);
        assert_eq!(options.escape().prefixes, vec!["mathjax".to_string()]);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            r#"
[escape]
inline_open = "`\\("
inline_close = "\\)`"

[engine]
display = false

[[engine.ext_const]]
symbol = "ii"
tex = "\\mathrm{{i}}"

[[engine.replace_before_tokenizing]]
from = "**"
to = "^"
"#
        )
        .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let options = Options::from(&config);

        assert_eq!(options.display, Some(false));
        assert_eq!(options.ext_const, vec![("ii".into(), "\\mathrm{i}".into())]);
        assert_eq!(
            options.replace_before_tokenizing,
            vec![("**".into(), "^".into())]
        );
        let delimiters = options.escape().delimiters();
        assert_eq!(delimiters.opening, "\\(");
        assert_eq!(delimiters.closing, "\\)");
        // untouched keys keep their defaults
        assert_eq!(options.escape().prefixes, vec!["am", "asciimath"]);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("does/not/exist.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("does/not/exist.toml")
            .build()
            .expect("config to build");
        assert!(config.output.pretty);
    }
}
