//! # wincmd
//!
//! Tokenizer and normalizer for Windows command lines.
//!
//! A command line is split the way `CommandLineToArgvW` and `cmd.exe` would
//! roughly see it, every token is tagged as a path, a flag or a nested quoted
//! command, and paths are rewritten into architecture-aware aliases
//! (`?sys64`, `?pf86`, `?usrtmp\`, ...). Two command lines that only differ by
//! user name, drive prefix or GUID normalize to the same string.
//!
//! ```rust,ignore
//! use wincmd::CommandLineProcessor;
//!
//! let processor = CommandLineProcessor::default();
//! let normalized = processor.normalize(r"C:\Users\Alice\AppData\Local\Temp\x.exe /s")?;
//! assert_eq!(normalized, r"?usrtmp\x.exe /s");
//! ```

pub mod wincmd;

pub use wincmd::{
    classify, parse_and_classify, render, tokenize, tokenize_spanned, Architecture, Category,
    Classifier, CommandLineProcessor, ConfigError, Document, Error, LexError, OutputFormat,
    PathNormalizer, Token,
};
