//! Token
//!
//! The shape of a token is exclusive: path, argument, command or nothing in
//! particular. Being a value is a separate, positional role: any token after
//! the first whose text does not start with a flag prefix is a value, so a
//! path or a nested command can also be a value.

use super::Document;
use serde::Serialize;

/// What a token looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "sub_command", rename_all = "snake_case")]
pub enum Category {
    /// A filesystem path; its stem is the canonical alias form.
    Path,
    /// A flag such as `/d`, `-f` or `--file`.
    Argument,
    /// A fully double-quoted string, parsed again as a command line.
    Command(Document),
    None,
}

/// One argument of a command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    text: String,
    category: Category,
    is_value: bool,
    stem: String,
}

impl Token {
    pub fn new(text: String, category: Category, is_value: bool, stem: String) -> Self {
        Token {
            text,
            category,
            is_value,
            stem,
        }
    }

    /// The argument as it appeared on the command line, quotes included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Normalized text: the canonical form for paths, the text itself otherwise.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn is_path(&self) -> bool {
        matches!(self.category, Category::Path)
    }

    pub fn is_arg(&self) -> bool {
        matches!(self.category, Category::Argument)
    }

    pub fn is_command(&self) -> bool {
        matches!(self.category, Category::Command(_))
    }

    pub fn is_value(&self) -> bool {
        self.is_value
    }

    /// The document parsed from a command token's unquoted interior.
    pub fn sub_command(&self) -> Option<&Document> {
        match &self.category {
            Category::Command(sub) => Some(sub),
            _ => None,
        }
    }

    /// The token's contribution to the normalized command line. Commands are
    /// normalized recursively and quoted again.
    pub fn normalized(&self) -> String {
        match &self.category {
            Category::Command(sub) => format!("\"{}\"", sub.normalize()),
            _ => self.stem.clone(),
        }
    }
}
