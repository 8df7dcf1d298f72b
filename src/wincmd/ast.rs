//! Classified command lines
//!
//! A [`Document`] is one command line as an ordered list of [`Token`]s. Each
//! token knows its shape ([`Category`]), whether it sits in a value position,
//! and its normalized stem. A command token owns the document parsed from its
//! unquoted interior, so nested commands form a tree.

pub mod document;
pub mod token;

pub use document::Document;
pub use token::{Category, Token};
