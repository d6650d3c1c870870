//! Source coordinates attached to tokens, definitions, and errors.

use std::fmt;

/// A 1-indexed line/column position within a named source file.
///
/// Lines are 1-indexed for user display. Columns are 1-indexed and count the
/// column at which the identifying token *starts*, not where the cursor
/// currently sits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    #[must_use]
    pub fn new(filename: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}
