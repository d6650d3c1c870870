//! The tokenizer: a context-free lexical scanner over UTF-8 text.
//!
//! `Cursor` is pure and stateless across calls except for its own position —
//! calling `next`/`peek` repeatedly on the same buffer always yields the same
//! sequence of tokens, and `peek` never mutates position.
//!
//! `(` and `)` are lexed as dedicated `LeftParen`/`RightParen` tokens even
//! though they are absent from the distilled token table: the union option
//! clause (`union(tag = kind) ...`) is unparseable without them, so this
//! closes that gap the same way the grammar's `\r\n` and duplicate-module
//! questions were resolved rather than left ambiguous.

use std::rc::Rc;

use tdc_common::SourceLocation;

use crate::error::{ExpectError, LexError, ScanError};
use crate::token::{Token, TokenKind};

/// Bytes that terminate a `Name`, `Symbol`, or `UnsignedInteger` run.
///
/// `\r` is included even though it never starts a token of its own (the
/// whitespace-equivalent skip at the top of `lex_one` only runs between
/// tokens): without it here, a `\r` immediately following an identifier
/// would be swallowed into that identifier's run instead of being treated
/// as trailing `\r\n` whitespace.
const DELIMITERS: &[u8] = b";:\" \t\r\n{}[]<>,=.()";

#[inline]
fn is_delimiter(byte: u8) -> bool {
    DELIMITERS.contains(&byte)
}

pub struct Cursor<'a> {
    filename: Rc<str>,
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    /// One-token lookahead buffer, populated by `peek`.
    peeked: Option<(Token, SourceLocation)>,
    /// Location of the most recently consumed token, for callers that want
    /// to attach a span to something they just parsed.
    last_location: SourceLocation,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(filename: impl Into<Rc<str>>, source: &'a str) -> Self {
        let filename = filename.into();
        let start = SourceLocation::new(filename.to_string(), 1, 1);
        Cursor {
            filename,
            source,
            pos: 0,
            line: 1,
            column: 1,
            peeked: None,
            last_location: start,
        }
    }

    /// Location of the most recently returned token (via `next` or a
    /// consumed `peek`). Before the first token is consumed this is the
    /// start of the buffer.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.last_location.clone()
    }

    /// Location of the token that `peek`/the next `next()` call will return,
    /// without consuming it.
    pub fn peek_location(&mut self) -> Result<SourceLocation, LexError> {
        self.fill_peek()?;
        match &self.peeked {
            Some((_, location)) => Ok(location.clone()),
            None => Ok(self.current_location()),
        }
    }

    /// Advance the cursor by one token, updating line/column. Returns `None`
    /// at end of buffer.
    pub fn next(&mut self) -> Result<Option<Token>, LexError> {
        self.fill_peek()?;
        match self.peeked.take() {
            Some((token, location)) => {
                self.last_location = location;
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }

    /// Return the next token without advancing.
    pub fn peek(&mut self) -> Result<Option<&Token>, LexError> {
        self.fill_peek()?;
        Ok(self.peeked.as_ref().map(|(token, _)| token))
    }

    /// Consume the next token if its kind matches `kind`; otherwise produce
    /// an `ExpectError` carrying the expectation, the actual token, and its
    /// position.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ScanError> {
        self.expect_one_of(&[kind])
    }

    /// Same as `expect`, accepting any of several kinds.
    pub fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, ScanError> {
        let location = self.peek_location()?;
        match self.next()? {
            Some(token) if kinds.contains(&token.kind()) => Ok(token),
            actual => Err(ScanError::Expect(ExpectError {
                expected: kinds.to_vec(),
                actual,
                location,
            })),
        }
    }

    /// Consume exactly `n` tokens of `kind` in sequence, erroring on the
    /// first mismatch.
    pub fn skip_many(&mut self, kind: TokenKind, n: usize) -> Result<(), ScanError> {
        for _ in 0..n {
            self.expect(kind)?;
        }
        Ok(())
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.filename.to_string(), self.line, self.column)
    }

    fn fill_peek(&mut self) -> Result<(), LexError> {
        if self.peeked.is_some() {
            return Ok(());
        }
        self.peeked = self.lex_one()?;
        Ok(())
    }

    /// Scan exactly one token from the current position, advancing `pos`,
    /// `line`, and `column`. Returns `None` at end of buffer.
    fn lex_one(&mut self) -> Result<Option<(Token, SourceLocation)>, LexError> {
        // `\r` is whitespace-equivalent and carries no token of its own; it
        // is silently dropped and does not affect line/column accounting.
        while self.current_byte() == Some(b'\r') {
            self.pos += 1;
        }

        let Some(byte) = self.current_byte() else {
            return Ok(None);
        };
        let start_location = self.current_location();
        let start_pos = self.pos;

        let token = match byte {
            b'{' => self.single_byte_token(Token::LeftBrace),
            b'}' => self.single_byte_token(Token::RightBrace),
            b'[' => self.single_byte_token(Token::LeftBracket),
            b']' => self.single_byte_token(Token::RightBracket),
            b'<' => self.single_byte_token(Token::LeftAngle),
            b'>' => self.single_byte_token(Token::RightAngle),
            b'(' => self.single_byte_token(Token::LeftParen),
            b')' => self.single_byte_token(Token::RightParen),
            b';' => self.single_byte_token(Token::Semicolon),
            b',' => self.single_byte_token(Token::Comma),
            b':' => self.single_byte_token(Token::Colon),
            b'?' => self.single_byte_token(Token::QuestionMark),
            b'*' => self.single_byte_token(Token::Asterisk),
            b'=' => self.single_byte_token(Token::Equals),
            b'.' => self.single_byte_token(Token::Period),
            b' ' => self.single_byte_token(Token::Space),
            b'\n' => Token::Newline,
            b'"' => self.lex_string(start_location.clone())?,
            b'0'..=b'9' => self.lex_unsigned_integer(),
            b'A'..=b'Z' => Token::Name(self.lex_run()),
            b'a'..=b'z' => Token::Symbol(self.lex_run()),
            _ => {
                let ch = self.source[self.pos..].chars().next().unwrap_or('\u{FFFD}');
                return Err(LexError::UnknownCharacter {
                    ch,
                    location: start_location,
                });
            }
        };

        if byte == b'\n' {
            self.pos += 1;
            self.line += 1;
            self.column = 1;
        } else {
            let consumed = (self.pos - start_pos) as u32;
            self.column += consumed;
        }

        Ok(Some((token, start_location)))
    }

    fn current_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// Consume and return the single byte at the cursor, producing `token`.
    /// The caller's outer match already inspected the byte; this just
    /// advances `pos`.
    fn single_byte_token(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    /// Read a run of non-delimiter bytes starting at the current position
    /// (used for `Name` and `Symbol`, whose first byte was already matched
    /// by the caller).
    fn lex_run(&mut self) -> String {
        let start = self.pos;
        while let Some(byte) = self.current_byte() {
            if is_delimiter(byte) {
                break;
            }
            self.pos += 1;
        }
        self.source[start..self.pos].to_string()
    }

    /// Decode a run of decimal digits into a `u64`.
    ///
    /// Overflow of `u64` is a fatal condition per the error handling design
    /// (alongside out-of-memory during arena allocation) and aborts the
    /// process rather than returning a recoverable error.
    fn lex_unsigned_integer(&mut self) -> Token {
        let digits = self.lex_run();
        let value = digits
            .parse::<u64>()
            .unwrap_or_else(|_| panic!("integer literal '{digits}' overflows u64"));
        Token::UnsignedInteger(value)
    }

    fn lex_string(&mut self, start_location: SourceLocation) -> Result<Token, LexError> {
        // Consume the opening quote.
        self.pos += 1;
        let content_start = self.pos;
        match memchr::memchr(b'"', self.source[content_start..].as_bytes()) {
            Some(offset) => {
                let content = self.source[content_start..content_start + offset].to_string();
                self.pos = content_start + offset + 1; // past the closing quote
                Ok(Token::String(content))
            }
            None => {
                self.pos = self.source.len();
                Err(LexError::UnterminatedString {
                    location: start_location,
                })
            }
        }
    }
}
