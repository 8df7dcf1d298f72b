//! Lexer
//!
//! Splits a raw Windows command line into argument strings.
//!
//! The pipeline consists of:
//! 1. The `cmd.exe /c` special case: `<...>cmd.exe <flag> <rest>` is split into
//!    exactly three arguments with the rest forced into quotes, bypassing the
//!    general grammar. Flags are `/c`, `/k`, `-c` and `-k`.
//! 2. Raw tokenization with logos ([`tokens::Token`]).
//! 3. Argument assembly: a quote-depth counter decides whether whitespace and
//!    control operators end an argument or are part of a quoted one.
//!
//! Quote depth rules:
//!
//!     Opening a quote increments the depth, closing one decrements it. While
//!     the depth is above zero everything is appended to the current argument.
//!     Closing the outermost quote emits the argument including its quotes.
//!     At depth zero whitespace ends the current argument, and a control
//!     operator ends it and is emitted as an argument of its own.
//!
//! A closing quote at depth zero and an opening double quote with nothing to
//! enclose are both reported as [`LexError::MalformedInput`].

pub mod tokens;

use crate::wincmd::error::LexError;
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
pub use tokens::{Backslash, QuoteEdge, Token};

/// `<prefix>cmd.exe <flag> <rest>`; the greedy prefix picks the last match.
static CMD_EXE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*cmd\.exe|.*cmd\.EXE)\s(/c|/k|-c|-k)\s(.*)$").unwrap());

/// Tokenize a command line into argument strings.
pub fn tokenize(source: &str) -> Result<Vec<String>, LexError> {
    Ok(tokenize_spanned(source)?
        .into_iter()
        .map(|(text, _)| text)
        .collect())
}

/// Tokenize a command line, pairing each argument with the byte range of the
/// source it was assembled from.
///
/// The text can differ from the source slice: escapes are resolved, and the
/// rest of a `cmd.exe /c` line is wrapped in quotes.
pub fn tokenize_spanned(source: &str) -> Result<Vec<(String, Range<usize>)>, LexError> {
    if let Some(split) = split_cmd_exe(source) {
        return Ok(split);
    }

    let mut lexer = Token::lexer(source);
    let mut args = Vec::new();
    let mut accu = Accumulator::default();
    let mut depth = 0usize;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = result.map_err(|_| malformed(source, &span))?;

        match token {
            Token::Word | Token::Quote(QuoteEdge::Literal) | Token::Backslash(Backslash::Literal) => {
                accu.push(slice, &span)
            }
            Token::Backslash(Backslash::Escaped(c)) => accu.push_char(c, &span),
            Token::Quote(QuoteEdge::Open) => {
                depth += 1;
                accu.push(slice, &span);
            }
            Token::Quote(QuoteEdge::Close) => {
                if depth == 0 {
                    return Err(malformed(source, &span));
                }
                depth -= 1;
                accu.push(slice, &span);
                if depth == 0 {
                    args.push(accu.take());
                }
            }
            Token::Whitespace | Token::Control => {
                if depth > 0 {
                    accu.push(slice, &span);
                    continue;
                }
                if !accu.is_empty() {
                    args.push(accu.take());
                }
                if token == Token::Control {
                    args.push((slice.to_string(), span));
                }
            }
        }
    }

    // An unterminated quote is flushed as-is.
    if !accu.is_empty() {
        args.push(accu.take());
    }
    Ok(args)
}

/// Apply the `cmd.exe /c` special case, if the source has that shape.
fn split_cmd_exe(source: &str) -> Option<Vec<(String, Range<usize>)>> {
    let caps = CMD_EXE_REGEX.captures(source)?;
    let prefix = caps.get(1)?;
    let flag = caps.get(2)?;
    let rest = caps.get(3)?;

    let text = rest.as_str();
    let quoted = text.len() >= 2 && text.starts_with('"') && text.ends_with('"');
    let rest_text = if quoted {
        text.to_string()
    } else {
        format!("\"{}\"", text)
    };

    Some(vec![
        (prefix.as_str().to_string(), prefix.range()),
        (flag.as_str().to_string(), flag.range()),
        (rest_text, rest.range()),
    ])
}

fn malformed(source: &str, span: &Range<usize>) -> LexError {
    LexError::MalformedInput {
        offset: span.start,
        fragment: source[span.clone()].to_string(),
    }
}

/// Collects the pieces of one argument and the source range they cover.
#[derive(Debug, Default)]
struct Accumulator {
    text: String,
    span: Option<Range<usize>>,
}

impl Accumulator {
    fn push(&mut self, piece: &str, span: &Range<usize>) {
        self.text.push_str(piece);
        self.extend(span);
    }

    fn push_char(&mut self, c: char, span: &Range<usize>) {
        self.text.push(c);
        self.extend(span);
    }

    fn extend(&mut self, span: &Range<usize>) {
        self.span = Some(match self.span.take() {
            Some(current) => current.start..span.end,
            None => span.clone(),
        });
    }

    /// True when nothing has been collected, not even an empty quoted run.
    fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    fn take(&mut self) -> (String, Range<usize>) {
        let span = self.span.take().unwrap_or_default();
        (std::mem::take(&mut self.text), span)
    }
}
