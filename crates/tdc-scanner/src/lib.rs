//! Tokenizer for the tdc type-definition schema language.
//!
//! `Cursor` turns a source buffer into a stream of [`Token`]s with one-token
//! lookahead. It has no knowledge of the grammar above the lexical level —
//! that lives in `tdc-parser`.

mod cursor;
mod error;
mod token;

pub use cursor::Cursor;
pub use error::{ExpectError, LexError, ScanError};
pub use token::{Token, TokenKind};
