//! Document
//!
//! An ordered sequence of tokens for one command line, top-level or nested.
//! Accessors return `(index, ...)` tuples whose index is the token's position
//! in this document, not in the enclosing one.

use super::Token;
use serde::Serialize;
use std::ops::Index;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    pub fn new(tokens: Vec<Token>) -> Self {
        Document { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token texts in order.
    pub fn tokens(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::text).collect()
    }

    /// Token stems in order.
    pub fn stems(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::stem).collect()
    }

    /// `(index, text, stem)` of every path token.
    pub fn paths(&self) -> Vec<(usize, &str, &str)> {
        self.enumerate(Token::is_path)
            .map(|(i, t)| (i, t.text(), t.stem()))
            .collect()
    }

    /// `(index, text)` of every argument token.
    pub fn args(&self) -> Vec<(usize, &str)> {
        self.enumerate(Token::is_arg)
            .map(|(i, t)| (i, t.text()))
            .collect()
    }

    /// `(index, text, stem)` of every token in a value position.
    pub fn values(&self) -> Vec<(usize, &str, &str)> {
        self.enumerate(Token::is_value)
            .map(|(i, t)| (i, t.text(), t.stem()))
            .collect()
    }

    /// `(index, text, sub_document)` of every nested command.
    pub fn commands(&self) -> Vec<(usize, &str, &Document)> {
        self.tokens
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.sub_command().map(|sub| (i, t.text(), sub)))
            .collect()
    }

    pub fn has_paths(&self) -> bool {
        self.tokens.iter().any(Token::is_path)
    }

    pub fn has_args(&self) -> bool {
        self.tokens.iter().any(Token::is_arg)
    }

    pub fn has_values(&self) -> bool {
        self.tokens.iter().any(Token::is_value)
    }

    pub fn has_commands(&self) -> bool {
        self.tokens.iter().any(Token::is_command)
    }

    /// How deep nested commands go below this document; 0 when there are none.
    pub fn depth(&self) -> usize {
        self.tokens
            .iter()
            .filter_map(Token::sub_command)
            .map(|sub| sub.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Join every token's normalized form with single spaces.
    pub fn normalize(&self) -> String {
        self.tokens
            .iter()
            .map(Token::normalized)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn enumerate<'a>(
        &'a self,
        pred: impl Fn(&Token) -> bool + 'a,
    ) -> impl Iterator<Item = (usize, &'a Token)> + 'a {
        self.tokens.iter().enumerate().filter(move |&(_, t)| pred(t))
    }
}

impl Index<usize> for Document {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
