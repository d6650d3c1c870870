//! The error type surfaced by the parser (and, since it is reused rather
//! than duplicated, by the multi-module resolver too).

use std::fmt;

use tdc_common::SourceLocation;
use tdc_scanner::{ExpectError, LexError, ScanError};

use crate::ast::Definition;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsingError {
    Lex(LexError),
    Expect(ExpectError),
    UnknownModule {
        name: String,
        location: SourceLocation,
    },
    UnknownReference {
        name: String,
        location: SourceLocation,
    },
    DuplicateDefinition {
        existing: Box<Definition>,
        definition: Box<Definition>,
        location: SourceLocation,
    },
    /// Two input files derive the same module name. Reported before either
    /// file is parsed against the other, per the resolved open question on
    /// module-name collisions (there is no single offending location, since
    /// the conflict is between files rather than within one).
    DuplicateModule {
        name: String,
    },
    InvalidPayload {
        location: SourceLocation,
    },
    AppliedNameCount {
        expected: usize,
        actual: usize,
        location: SourceLocation,
    },
    /// An ambient safety limit (see `tdc_common::limits`) was exceeded by
    /// the input, e.g. a `Type` nested deeper than
    /// `MAX_TYPE_NESTING_DEPTH` or a generic definition with more than
    /// `MAX_OPEN_NAMES` parameters.
    LimitExceeded {
        what: &'static str,
        location: SourceLocation,
    },
}

impl From<LexError> for ParsingError {
    fn from(err: LexError) -> Self {
        ParsingError::Lex(err)
    }
}

impl From<ExpectError> for ParsingError {
    fn from(err: ExpectError) -> Self {
        ParsingError::Expect(err)
    }
}

impl From<ScanError> for ParsingError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Lex(e) => ParsingError::Lex(e),
            ScanError::Expect(e) => ParsingError::Expect(e),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingError::Lex(err) => err.fmt(f),
            ParsingError::Expect(err) => err.fmt(f),
            ParsingError::UnknownModule { name, location } => {
                write!(f, "{location}: unknown module '{name}'")
            }
            ParsingError::UnknownReference { name, location } => {
                write!(f, "{location}: unknown reference '{name}'")
            }
            ParsingError::DuplicateDefinition { definition, location, .. } => {
                write!(
                    f,
                    "{location}: duplicate definition '{}'",
                    definition.binding_name()
                )
            }
            ParsingError::DuplicateModule { name } => {
                write!(f, "duplicate module name '{name}'")
            }
            ParsingError::InvalidPayload { location } => {
                write!(f, "{location}: invalid embedded-union payload")
            }
            ParsingError::AppliedNameCount {
                expected,
                actual,
                location,
            } => write!(
                f,
                "{location}: expected {expected} type argument(s), found {actual}"
            ),
            ParsingError::LimitExceeded { what, location } => {
                write!(f, "{location}: exceeded limit: {what}")
            }
        }
    }
}

impl std::error::Error for ParsingError {}
