//! Command line processing API
//!
//! [`CommandLineProcessor`] is the front door of the crate: it owns a path
//! normalizer and a depth limit, and answers the usual questions about a raw
//! command line (its normalized form, its flags, the paths it touches).
//!
//! Queries taking `include_nested` flatten nested commands depth-first: the
//! results of a quoted sub-command are spliced in at the position of the token
//! that holds it.
//!
//! ```rust,ignore
//! use wincmd::{Architecture, CommandLineProcessor};
//!
//! let processor = CommandLineProcessor::new(Architecture::X86_64);
//! let normalized = processor.normalize(r"C:\Windows\System32\cmd.exe /c whoami")?;
//! assert_eq!(normalized, r#"?sys64\cmd.exe /c "whoami""#);
//! ```

use crate::wincmd::ast::{Category, Document, Token};
use crate::wincmd::config::WincmdConfig;
use crate::wincmd::error::{ConfigError, Error, LexError};
use crate::wincmd::stemming::{Architecture, PathNormalizer};
use crate::wincmd::tagging::{Classifier, DEFAULT_MAX_DEPTH};
use serde::Deserialize;
use std::fmt::Write as _;
use std::str::FromStr;
use tracing::{debug, debug_span};

/// How a parsed command line is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// The normalized command line.
    #[default]
    Simple,
    /// One token per line, as split by the lexer.
    Tokens,
    /// Indented token tree with categories and stems.
    Tree,
    /// The full document as pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Tokens => "tokens",
            OutputFormat::Tree => "tree",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(OutputFormat::Simple),
            "tokens" => Ok(OutputFormat::Tokens),
            "tree" => Ok(OutputFormat::Tree),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidOutputFormat(other.to_string())),
        }
    }
}

/// Parses and normalizes Windows command lines for one architecture.
#[derive(Debug, Clone)]
pub struct CommandLineProcessor {
    normalizer: PathNormalizer,
    max_depth: usize,
}

impl CommandLineProcessor {
    pub fn new(architecture: Architecture) -> Self {
        CommandLineProcessor {
            normalizer: PathNormalizer::for_architecture(architecture),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Build a processor from loaded configuration.
    pub fn from_config(config: &WincmdConfig) -> Result<Self, ConfigError> {
        let architecture = config.normalizer.architecture()?;
        Ok(Self::new(architecture).with_max_depth(config.normalizer.max_depth))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn architecture(&self) -> Architecture {
        self.normalizer.architecture()
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    /// Lex and classify a raw command line.
    pub fn parse(&self, raw: &str) -> Result<Document, LexError> {
        let span = debug_span!("parse", arch = %self.architecture());
        let _guard = span.enter();

        let result = Classifier::new(&self.normalizer)
            .with_max_depth(self.max_depth)
            .parse(raw);
        match &result {
            Ok(doc) => debug!(tokens = doc.len(), depth = doc.depth(), "parsed command line"),
            Err(err) => debug!(error = %err, input = raw, "failed to parse command line"),
        }
        result
    }

    /// The fully normalized command line.
    pub fn normalize(&self, raw: &str) -> Result<String, LexError> {
        Ok(self.parse(raw)?.normalize())
    }

    /// Flag tokens, e.g. `/d` or `--file`.
    pub fn args(&self, raw: &str, include_nested: bool) -> Result<Vec<String>, LexError> {
        let doc = self.parse(raw)?;
        Ok(collect(&doc, include_nested, &|t: &Token| {
            t.is_arg().then(|| t.text().to_string())
        }))
    }

    /// Path tokens as written.
    pub fn paths(&self, raw: &str, include_nested: bool) -> Result<Vec<String>, LexError> {
        let doc = self.parse(raw)?;
        Ok(collect(&doc, include_nested, &|t: &Token| {
            t.is_path().then(|| t.text().to_string())
        }))
    }

    /// Path tokens in their canonical alias form.
    pub fn normalized_paths(
        &self,
        raw: &str,
        include_nested: bool,
    ) -> Result<Vec<String>, LexError> {
        let doc = self.parse(raw)?;
        Ok(collect(&doc, include_nested, &|t: &Token| {
            t.is_path().then(|| t.stem().to_string())
        }))
    }

    /// Stems of tokens in value position. A nested command counts as a value
    /// itself, and its own values follow it when `include_nested` is set.
    pub fn values(&self, raw: &str, include_nested: bool) -> Result<Vec<String>, LexError> {
        let doc = self.parse(raw)?;
        Ok(collect(&doc, include_nested, &|t: &Token| {
            t.is_value().then(|| t.stem().to_string())
        }))
    }

    /// Parse `raw` and print it in the requested format.
    pub fn process(&self, raw: &str, format: OutputFormat) -> Result<String, Error> {
        let doc = self.parse(raw)?;
        render(&doc, format)
    }
}

impl Default for CommandLineProcessor {
    fn default() -> Self {
        Self::new(Architecture::X86_64)
    }
}

fn collect(
    doc: &Document,
    include_nested: bool,
    pick: &dyn Fn(&Token) -> Option<String>,
) -> Vec<String> {
    let mut out = Vec::new();
    collect_into(doc, include_nested, pick, &mut out);
    out
}

fn collect_into(
    doc: &Document,
    include_nested: bool,
    pick: &dyn Fn(&Token) -> Option<String>,
    out: &mut Vec<String>,
) {
    for token in doc {
        out.extend(pick(token));
        if include_nested {
            if let Some(sub) = token.sub_command() {
                collect_into(sub, include_nested, pick, out);
            }
        }
    }
}

/// Print a parsed document.
pub fn render(doc: &Document, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Simple => Ok(doc.normalize()),
        OutputFormat::Tokens => Ok(doc.tokens().join("\n")),
        OutputFormat::Tree => {
            let mut out = String::new();
            write_tree(doc, 0, &mut out);
            Ok(out.trim_end().to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
    }
}

fn write_tree(doc: &Document, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    for (index, token) in doc.iter().enumerate() {
        let kind = match token.category() {
            Category::Path => "path",
            Category::Argument => "arg",
            Category::Command(_) => "command",
            Category::None => "text",
        };
        let role = if token.is_value() { " value" } else { "" };
        let _ = write!(out, "{pad}{index}: {kind}{role} {}", token.text());
        if token.is_path() {
            let _ = write!(out, " => {}", token.stem());
        }
        out.push('\n');
        if let Some(sub) = token.sub_command() {
            write_tree(sub, indent + 1, out);
        }
    }
}
