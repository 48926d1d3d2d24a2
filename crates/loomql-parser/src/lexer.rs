//! Character-level lexer for schema and query text.
//!
//! The lexer is shared by both parsers and has no grammar knowledge: it
//! classifies punctuation, reserved keyword-operators, `@`-prefixed
//! directive names, bare identifiers, literal values, and item separators
//! (line breaks and commas), producing tokens lazily as an [`Iterator`].
//!
//! Token values borrow from the source text where possible; only string
//! literals containing escape sequences allocate.

use crate::SourcePosition;
use crate::token::Keyword;
use crate::token::Token;
use crate::token::TokenKind;
use std::borrow::Cow;

/// A streaming lexer over a `&str` input.
///
/// Invalid input never halts the stream: the lexer emits an
/// [`TokenKind::Error`] token and advances past the offending character, so
/// iteration always terminates with a final [`TokenKind::Eof`] token.
pub struct Lexer<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`. The remaining text
    /// to lex is `&source[offset..]`.
    offset: usize,

    /// Current 0-based line number.
    line: usize,

    /// Current 0-based character column.
    col: usize,

    /// Whether the Eof token has been emitted.
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 0,
            col: 0,
            finished: false,
        }
    }

    /// Returns the remaining source text to be lexed.
    fn remaining(&self) -> &'src str {
        &self.source[self.offset..]
    }

    fn current_position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.col, self.offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Advances past one non-newline character.
    fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        self.col += 1;
    }

    /// Consumes one line break (`\n`, `\r\n`, or a lone `\r`).
    fn take_newline(&mut self) {
        if self.remaining().starts_with("\r\n") {
            self.offset += 2;
        } else {
            self.offset += 1;
        }
        self.line += 1;
        self.col = 0;
    }

    /// Skips horizontal whitespace (spaces and tabs). Line breaks are
    /// significant (item separators) and are not skipped here.
    fn skip_blank(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' {
                self.advance(c);
            } else {
                break;
            }
        }
    }

    /// Scans an identifier starting at the current offset and returns the
    /// borrowed slice.
    fn scan_ident(&mut self) -> &'src str {
        let start = self.offset;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance(c);
            } else {
                break;
            }
        }
        &self.source[start..self.offset]
    }

    /// Consumes a run of ASCII digits.
    fn take_digits(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance(c);
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind<'src> {
        let start = self.offset;
        if self.peek_char() == Some('-') {
            self.advance('-');
        }
        self.take_digits();
        if self.peek_char() == Some('.') {
            self.advance('.');
            self.take_digits();
        }
        if let Some(e @ ('e' | 'E')) = self.peek_char() {
            self.advance(e);
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                self.advance(sign);
            }
            self.take_digits();
        }
        let text = &self.source[start..self.offset];
        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Error {
                message: format!("malformed number literal `{text}`"),
            },
        }
    }

    /// Scans a `"`-delimited string literal, processing escape sequences.
    ///
    /// Returns a borrowed slice when the literal contains no escapes.
    fn scan_string(&mut self) -> TokenKind<'src> {
        self.advance('"');
        let content_start = self.offset;
        let mut unescaped: Option<String> = None;

        loop {
            let Some(c) = self.peek_char() else {
                return TokenKind::Error {
                    message: "unterminated string literal".to_string(),
                };
            };
            match c {
                '"' => {
                    let borrowed = &self.source[content_start..self.offset];
                    self.advance('"');
                    return TokenKind::Str(match unescaped {
                        Some(s) => Cow::Owned(s),
                        None => Cow::Borrowed(borrowed),
                    });
                }
                '\n' | '\r' => {
                    return TokenKind::Error {
                        message: "unterminated string literal".to_string(),
                    };
                }
                '\\' => {
                    let buf = unescaped.get_or_insert_with(|| {
                        self.source[content_start..self.offset].to_string()
                    });
                    self.advance('\\');
                    match self.scan_escape() {
                        Ok(escaped) => buf.push(escaped),
                        Err(message) => return TokenKind::Error { message },
                    }
                }
                _ => {
                    self.advance(c);
                    if let Some(buf) = unescaped.as_mut() {
                        buf.push(c);
                    }
                }
            }
        }
    }

    /// Processes one escape sequence, positioned just past the `\`.
    fn scan_escape(&mut self) -> Result<char, String> {
        let Some(c) = self.peek_char() else {
            return Err("unterminated string literal".to_string());
        };
        self.advance(c);
        match c {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let Some(h) = self.peek_char() else {
                        return Err("expected four hex digits after `\\u`".to_string());
                    };
                    let Some(digit) = h.to_digit(16) else {
                        return Err("expected four hex digits after `\\u`".to_string());
                    };
                    self.advance(h);
                    code = code * 16 + digit;
                }
                char::from_u32(code)
                    .ok_or_else(|| format!("invalid unicode escape `\\u{code:04x}`"))
            }
            other => Err(format!("unknown escape sequence `\\{other}`")),
        }
    }

    fn next_token(&mut self) -> Token<'src> {
        self.skip_blank();
        let position = self.current_position();

        let Some(c) = self.peek_char() else {
            return Token::new(TokenKind::Eof, position);
        };

        let kind = match c {
            '\n' | '\r' => {
                self.take_newline();
                TokenKind::Newline
            }
            ',' => {
                self.advance(c);
                TokenKind::Comma
            }
            '!' => {
                self.advance(c);
                TokenKind::Bang
            }
            ':' => {
                self.advance(c);
                TokenKind::Colon
            }
            '{' => {
                self.advance(c);
                TokenKind::CurlyBraceOpen
            }
            '}' => {
                self.advance(c);
                TokenKind::CurlyBraceClose
            }
            '(' => {
                self.advance(c);
                TokenKind::ParenOpen
            }
            ')' => {
                self.advance(c);
                TokenKind::ParenClose
            }
            '[' => {
                self.advance(c);
                TokenKind::SquareBracketOpen
            }
            ']' => {
                self.advance(c);
                TokenKind::SquareBracketClose
            }
            '.' => {
                if self.remaining().starts_with("...") {
                    self.advance('.');
                    self.advance('.');
                    self.advance('.');
                    TokenKind::Ellipsis
                } else {
                    self.advance(c);
                    TokenKind::Error {
                        message: "unexpected character `.`".to_string(),
                    }
                }
            }
            '@' => {
                self.advance(c);
                match self.peek_char() {
                    Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                        TokenKind::DirectiveName(Cow::Borrowed(self.scan_ident()))
                    }
                    _ => TokenKind::Error {
                        message: "expected a directive name after `@`".to_string(),
                    },
                }
            }
            '"' => self.scan_string(),
            c if c.is_ascii_digit() || c == '-' => self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => {
                let ident = self.scan_ident();
                match ident {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "null" => TokenKind::Null,
                    _ => match Keyword::from_ident(ident) {
                        Some(kw) => TokenKind::Keyword(kw),
                        None => TokenKind::Name(Cow::Borrowed(ident)),
                    },
                }
            }
            other => {
                self.advance(other);
                TokenKind::Error {
                    message: format!("unexpected character `{other}`"),
                }
            }
        };

        Token::new(kind, position)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}
