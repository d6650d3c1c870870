//! Lexical and expectation errors.

use std::fmt;

use tdc_common::SourceLocation;

use crate::token::{Token, TokenKind};

/// Errors raised while scanning raw characters into tokens.
///
/// Distinct from [`ExpectError`], which is raised by the parser-facing
/// `expect`/`expect_one_of` helpers after a token has already been produced.
///
/// Integer-literal overflow is deliberately *not* a variant here: per the
/// error handling design, overflowing `u64` while decoding an unsigned
/// integer literal is a fatal condition and aborts rather than returning a
/// value — see `Cursor`'s integer-literal scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    UnterminatedString { location: SourceLocation },
    UnknownCharacter { ch: char, location: SourceLocation },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString { location } => {
                write!(f, "{location}: unterminated string literal")
            }
            LexError::UnknownCharacter { ch, location } => {
                write!(f, "{location}: unexpected character '{ch}'")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Raised by `Cursor::expect`/`expect_one_of` when the next token does not
/// match one of the expected kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectError {
    pub expected: Vec<TokenKind>,
    pub actual: Option<Token>,
    pub location: SourceLocation,
}

impl fmt::Display for ExpectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = self
            .expected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        match &self.actual {
            Some(token) => write!(f, "{}: expected {expected}, found {:?}", self.location, token),
            None => write!(f, "{}: expected {expected}, found end of input", self.location),
        }
    }
}

impl std::error::Error for ExpectError {}

/// Union of the two error kinds a cursor operation can fail with. The parser
/// crate folds this into its own `ParsingError` via `From`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    Lex(LexError),
    Expect(ExpectError),
}

impl From<LexError> for ScanError {
    fn from(err: LexError) -> Self {
        ScanError::Lex(err)
    }
}

impl From<ExpectError> for ScanError {
    fn from(err: ExpectError) -> Self {
        ScanError::Expect(err)
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Lex(err) => err.fmt(f),
            ScanError::Expect(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ScanError {}
