//! Raw token definitions for Windows command lines
//!
//! The raw tokens are produced by a logos lexer. Most of the grammar is
//! context free, but three decisions need to look around the current position,
//! which a regular automaton cannot do:
//!
//! - whether a quote opens or closes a run depends on the character before it
//!   (start of input counts as whitespace);
//! - an opening quote swallows everything up to the next quote of the same kind;
//! - a backslash is an escape only when a quote follows it.
//!
//! Those are resolved in callbacks that inspect the source around the span and
//! bump the lexer forward. Quote depth is not tracked here, that is the job of
//! [`super::tokenize`].

use logos::{Lexer, Logos};

/// How a quote character behaves at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEdge {
    /// The quote opened a run; the span covers the quote and the run up to,
    /// but not including, the next quote of the same kind.
    Open,
    /// The quote follows non-whitespace and closes a run.
    Close,
    /// A single quote with nothing to enclose. The span covers it and any
    /// word characters after it, and is treated as ordinary text.
    Literal,
}

/// How a backslash behaves at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backslash {
    /// `\"` or `\\` before a quote: contributes the escaped character only.
    Escaped(char),
    /// Any other backslash starts an ordinary word; the span covers the word.
    Literal,
}

/// All raw tokens of a command line
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("\"", |lex| quote_edge(lex, '"'))]
    #[token("'", |lex| quote_edge(lex, '\''))]
    Quote(QuoteEdge),

    #[token("\\", backslash)]
    Backslash(Backslash),

    // &, &&, |, ||, <, > and 2> style redirects
    #[regex(r"&&?|\|\|?|[0-9]?>|<")]
    Control,

    #[regex(r#"[^\s"'\\&|<>][^\s"&|<>]*"#)]
    Word,

    #[regex(r"\s+")]
    Whitespace,
}

/// Characters that end an ordinary word.
fn ends_word(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '&' | '|' | '<' | '>')
}

/// Length in bytes of the word at the start of `rest`.
fn word_len(rest: &str) -> usize {
    rest.find(ends_word).unwrap_or(rest.len())
}

fn quote_edge(lex: &mut Lexer<Token>, quote: char) -> Option<QuoteEdge> {
    let start = lex.span().start;
    let after_space = lex.source()[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    if !after_space {
        return Some(QuoteEdge::Close);
    }

    let rest = lex.remainder();
    let run = rest.find(quote).unwrap_or(rest.len());
    if run > 0 {
        lex.bump(run);
        return Some(QuoteEdge::Open);
    }

    // An empty double-quoted run has no fallback and fails the lexer. A lone
    // single quote is still a legal word character.
    if quote == '\'' {
        let word = word_len(rest);
        lex.bump(word);
        return Some(QuoteEdge::Literal);
    }
    None
}

fn backslash(lex: &mut Lexer<Token>) -> Backslash {
    let rest = lex.remainder();
    if rest.starts_with('"') {
        lex.bump(1);
        return Backslash::Escaped('"');
    }
    if rest.starts_with('\\') && rest.trim_start_matches('\\').starts_with('"') {
        lex.bump(1);
        return Backslash::Escaped('\\');
    }
    let word = word_len(rest);
    lex.bump(word);
    Backslash::Literal
}
