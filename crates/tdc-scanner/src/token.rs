//! Token and token-kind definitions.

use std::fmt;

/// A single lexical token produced by the [`crate::Cursor`].
///
/// Tokens carry no span of their own — per the design, source coordinates are
/// tracked by the cursor and attached to a token only at the point a caller
/// asks for them (`Cursor::location`). This keeps the common case (peeking
/// ahead to disambiguate a grammar rule) allocation- and copy-free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftAngle,
    RightAngle,
    /// `(`, opening a `union(...)` option list. Not part of the distilled
    /// token table in the data model section, but the grammar's union
    /// option syntax is unparseable without it — see the scanner's
    /// module doc for the resolved gap this closes.
    LeftParen,
    RightParen,
    Semicolon,
    Comma,
    Colon,
    Newline,
    Space,
    QuestionMark,
    Asterisk,
    Equals,
    Period,
    Name(String),
    Symbol(String),
    UnsignedInteger(u64),
    String(String),
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::LeftBracket => TokenKind::LeftBracket,
            Token::RightBracket => TokenKind::RightBracket,
            Token::LeftAngle => TokenKind::LeftAngle,
            Token::RightAngle => TokenKind::RightAngle,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Comma => TokenKind::Comma,
            Token::Colon => TokenKind::Colon,
            Token::Newline => TokenKind::Newline,
            Token::Space => TokenKind::Space,
            Token::QuestionMark => TokenKind::QuestionMark,
            Token::Asterisk => TokenKind::Asterisk,
            Token::Equals => TokenKind::Equals,
            Token::Period => TokenKind::Period,
            Token::Name(_) => TokenKind::Name,
            Token::Symbol(_) => TokenKind::Symbol,
            Token::UnsignedInteger(_) => TokenKind::UnsignedInteger,
            Token::String(_) => TokenKind::String,
        }
    }

}

/// The tag of a [`Token`], without its payload. Used by `expect`/`expect_one_of`
/// to describe what the parser is looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftAngle,
    RightAngle,
    LeftParen,
    RightParen,
    Semicolon,
    Comma,
    Colon,
    Newline,
    Space,
    QuestionMark,
    Asterisk,
    Equals,
    Period,
    Name,
    Symbol,
    UnsignedInteger,
    String,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftAngle => "'<'",
            TokenKind::RightAngle => "'>'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Newline => "newline",
            TokenKind::Space => "space",
            TokenKind::QuestionMark => "'?'",
            TokenKind::Asterisk => "'*'",
            TokenKind::Equals => "'='",
            TokenKind::Period => "'.'",
            TokenKind::Name => "a capitalized name",
            TokenKind::Symbol => "a lowercase symbol",
            TokenKind::UnsignedInteger => "an unsigned integer",
            TokenKind::String => "a string literal",
        };
        f.write_str(label)
    }
}
