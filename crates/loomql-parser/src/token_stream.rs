//! Peek/consume buffering over the [`Lexer`] with separator skipping.

use crate::Lexer;
use crate::ParseError;
use crate::SourcePosition;
use crate::token::Token;
use crate::token::TokenKind;
use std::collections::VecDeque;

/// A buffered token stream shared by the schema and query parsers.
///
/// Provides the lexer contract both grammars build on: `peek`, `consume`,
/// `eof`, and `fail` (a position-tagged error at the current token). The
/// final [`TokenKind::Eof`] token is never popped, so `peek`/`consume`
/// remain callable at end of input.
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    buffer: VecDeque<Token<'src>>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            buffer: VecDeque::new(),
        }
    }

    /// Fills the buffer to at least `count` unconsumed tokens, stopping
    /// early once the lexer is exhausted.
    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            if let Some(token) = self.lexer.next() {
                self.buffer.push_back(token);
            } else {
                break;
            }
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&mut self) -> &Token<'src> {
        self.peek_nth(0)
    }

    /// Peek at the nth token ahead (0-indexed) without consuming anything.
    /// Clamps to the final Eof token, which is never consumed.
    pub fn peek_nth(&mut self, n: usize) -> &Token<'src> {
        self.ensure_buffer_has(n + 1);
        let idx = n.min(self.buffer.len().saturating_sub(1));
        self.buffer.get(idx).expect("lexer exhausted past Eof")
    }

    /// Peek at the first non-separator token at or after the current one,
    /// without consuming anything.
    pub fn peek_past_separators(&mut self) -> &Token<'src> {
        let mut n = 0;
        while self.peek_nth(n).kind.is_separator() {
            n += 1;
        }
        self.peek_nth(n)
    }

    /// Peek at the current token, surfacing lexer errors as [`ParseError`].
    pub fn peek_checked(&mut self, path: &str) -> Result<&Token<'src>, ParseError> {
        let position = self.peek().position;
        if let TokenKind::Error { message } = &self.peek().kind {
            return Err(ParseError::new(message.clone(), path, Some(position)));
        }
        Ok(self.peek())
    }

    /// Consume and return the current token. At end of input, returns the
    /// Eof token without popping it.
    pub fn consume(&mut self) -> Token<'src> {
        if matches!(self.peek().kind, TokenKind::Eof) {
            return self.peek().clone();
        }
        self.buffer.pop_front().expect("peek() buffered a token")
    }

    /// Whether the stream has no tokens left.
    pub fn eof(&mut self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Whether the current token matches `kind` exactly.
    pub fn at(&mut self, kind: &TokenKind<'_>) -> bool {
        self.peek().kind == *kind
    }

    /// Whether the current token is an item separator (newline or comma).
    pub fn at_separator(&mut self) -> bool {
        self.peek().kind.is_separator()
    }

    /// Skips any run of item separators.
    pub fn skip_separators(&mut self) {
        while self.at_separator() {
            self.consume();
        }
    }

    /// The source position of the current token.
    pub fn position(&mut self) -> SourcePosition {
        self.peek().position
    }

    /// Builds a [`ParseError`] tagged with the current token's position and
    /// the partial path built so far.
    pub fn fail(&mut self, path: &str, message: impl Into<String>) -> ParseError {
        let position = self.position();
        ParseError::new(message, path, Some(position))
    }

    /// Consumes a token of exactly `kind`, or fails.
    pub fn expect(
        &mut self,
        kind: &TokenKind<'static>,
        path: &str,
    ) -> Result<Token<'src>, ParseError> {
        let found = self.peek_checked(path)?.kind.describe();
        if self.at(kind) {
            Ok(self.consume())
        } else {
            Err(self.fail(path, format!("expected {}, found {found}", kind.describe())))
        }
    }

    /// Consumes a bare identifier and returns it as an owned `String`.
    pub fn expect_name(&mut self, path: &str) -> Result<String, ParseError> {
        let found = self.peek_checked(path)?.kind.describe();
        if matches!(self.peek().kind, TokenKind::Name(_)) {
            match self.consume().kind {
                TokenKind::Name(name) => Ok(name.into_owned()),
                _ => unreachable!(),
            }
        } else {
            Err(self.fail(path, format!("expected a name, found {found}")))
        }
    }
}
