//! Main module for wincmd library functionality
//!
//! The pipeline runs in three stages:
//!
//!     raw command line -> lexing -> tagging (+ stemming) -> ast::Document
//!
//! Nested quoted commands loop back into lexing one level deeper.

pub mod ast;
pub mod config;
pub mod error;
pub mod lexing;
pub mod processor;
pub mod stemming;
pub mod tagging;

pub use ast::{Category, Document, Token};
pub use error::{ConfigError, Error, LexError};
pub use lexing::{tokenize, tokenize_spanned};
pub use processor::{render, CommandLineProcessor, OutputFormat};
pub use stemming::{Architecture, PathNormalizer};
pub use tagging::{classify, parse_and_classify, Classifier};
