//! Tagging
//!
//! Labels each token of a command line and builds the nested command tree.
//!
//! Shape precedence for one token, first match wins:
//!
//! 1. path: an NT device prefix (`\??\`, `\?\`) followed by non-space, a
//!    quoted string that starts with a drive letter (spaces are allowed only
//!    between backslash-separated segments), or an unquoted `X:...` / `:...`
//! 2. command: a fully double-quoted string; its interior is lexed and
//!    classified again, one level deeper
//! 3. argument: `/`, `-` or `--` followed by non-space only
//!
//! Independently of its shape, every token after the first whose text does not
//! start with a flag prefix is a value. The first token is the program and is
//! never a value.

use crate::wincmd::ast::{Category, Document, Token};
use crate::wincmd::error::LexError;
use crate::wincmd::lexing::tokenize;
use crate::wincmd::stemming::PathNormalizer;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Nesting depth followed before parsing gives up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

static PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(\\\?\?\\[^ ]+|\\\?\\[^ ]+)|("(([a-zA-Z]:)|([a-zA-Z]:\\Program Files \(x86\)))([^"\s])+(\s((\S+\\)+\S*))*"|^[a-zA-Z]?:[^ ]+)"#,
    )
    .unwrap()
});

static ARG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(/|-|--)\S*$").unwrap());

static VALUE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^(/|\-| )]+").unwrap());

pub fn is_path_shaped(text: &str) -> bool {
    PATH_REGEX.is_match(text)
}

pub fn is_arg_shaped(text: &str) -> bool {
    ARG_REGEX.is_match(text)
}

pub fn is_value_shaped(text: &str) -> bool {
    VALUE_REGEX.is_match(text)
}

/// The interior of a fully double-quoted token.
pub fn command_interior(text: &str) -> Option<&str> {
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Classifies token sequences against one path normalizer.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'n> {
    normalizer: &'n PathNormalizer,
    max_depth: usize,
}

impl<'n> Classifier<'n> {
    pub fn new(normalizer: &'n PathNormalizer) -> Self {
        Classifier {
            normalizer,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn normalizer(&self) -> &'n PathNormalizer {
        self.normalizer
    }

    /// Lex and classify a raw command line.
    pub fn parse(&self, raw: &str) -> Result<Document, LexError> {
        self.parse_at(raw, 0)
    }

    /// Classify an already tokenized command line.
    pub fn classify(&self, tokens: Vec<String>) -> Result<Document, LexError> {
        self.classify_at(tokens, 0)
    }

    fn parse_at(&self, raw: &str, depth: usize) -> Result<Document, LexError> {
        if depth > self.max_depth {
            return Err(LexError::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }
        let tokens = tokenize(raw)?;
        debug!(depth, tokens = tokens.len(), "tokenized command line");
        self.classify_at(tokens, depth)
    }

    fn classify_at(&self, tokens: Vec<String>, depth: usize) -> Result<Document, LexError> {
        tokens
            .into_iter()
            .enumerate()
            .map(|(index, text)| self.tag(index, text, depth))
            .collect::<Result<Vec<_>, _>>()
            .map(Document::new)
    }

    fn tag(&self, index: usize, text: String, depth: usize) -> Result<Token, LexError> {
        let is_value = index > 0 && is_value_shaped(&text);

        if is_path_shaped(&text) {
            let stem = self.normalizer.normalize_path(&text);
            return Ok(Token::new(text, Category::Path, is_value, stem));
        }

        let category = match command_interior(&text) {
            Some(interior) => Category::Command(self.parse_at(interior, depth + 1)?),
            None if is_arg_shaped(&text) => Category::Argument,
            None => Category::None,
        };
        let stem = text.clone();
        Ok(Token::new(text, category, is_value, stem))
    }
}

/// Classify an already tokenized command line with the default depth limit.
pub fn classify(tokens: Vec<String>, normalizer: &PathNormalizer) -> Result<Document, LexError> {
    Classifier::new(normalizer).classify(tokens)
}

/// Lex and classify a raw command line with the default depth limit.
pub fn parse_and_classify(raw: &str, normalizer: &PathNormalizer) -> Result<Document, LexError> {
    Classifier::new(normalizer).parse(raw)
}
