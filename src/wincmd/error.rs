//! Error types
//!
//! Lexing is the only fallible step of the pipeline: classification, path
//! normalization and reassembly are total over well-formed input. Configuration
//! errors surface once, when a normalizer is constructed.

use thiserror::Error;

/// Errors raised while splitting a command line into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The input reached the lexer's fallback alternative: a quote that opens
    /// nothing, or a quote that closes a run that was never opened.
    #[error("malformed command line at byte {offset}: unexpected {fragment:?}")]
    MalformedInput { offset: usize, fragment: String },

    /// Nested quoted commands go deeper than the classifier is willing to follow.
    #[error("nested commands exceed the maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },
}

/// Errors raised while building a normalizer or loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid architecture {0:?}: expected \"x86\" or \"x86_64\"")]
    InvalidArchitecture(String),

    #[error("invalid output format {0:?}: expected simple, tokens, tree or json")]
    InvalidOutputFormat(String),

    #[error("failed to load configuration: {0}")]
    Load(String),
}

/// Umbrella error for the processor and the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
