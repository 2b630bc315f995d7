//! Lexer for the LIFT programming language
//!
//! The lexer converts source code into a stream of tokens, handling:
//! - Keywords, identifiers, and operators (longest match wins)
//! - Numeric literals (int, float)
//! - String literals with escape sequences
//! - Comments (line and block)
//! - Source location tracking
//!
//! The lexer never fails hard: invalid input produces an `Error` token plus
//! a recorded [`SpannedError`], and scanning continues.

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

mod span;
mod token;

pub use span::{LineIndex, Location, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span, and source text
///
/// For `String` tokens the lexeme is the decoded value (escape sequences
/// applied), not the raw source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid escape sequence: \\{0}")]
    InvalidEscape(char),
}

/// A lexer error with location information
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// The LIFT lexer
pub struct Lexer<'source> {
    source: &'source str,
    /// Current position in the source (byte offset)
    position: usize,
    /// Collected errors during lexing
    errors: Vec<SpannedError>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.collect_all();
        (tokens, lexer.errors)
    }

    /// Collect all tokens from the source
    pub fn collect_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Errors collected so far
    #[must_use]
    pub fn errors(&self) -> &[SpannedError] {
        &self.errors
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        if self.position >= self.source.len() {
            return Token::new(
                TokenKind::Eof,
                Span::new(self.position as u32, self.position as u32),
                "",
            );
        }

        let remaining = &self.source[self.position..];
        let mut logos_lexer = TokenKind::lexer(remaining);

        match logos_lexer.next() {
            Some(Ok(kind)) => {
                let span_range = logos_lexer.span();
                let lexeme = logos_lexer.slice();
                // span_range is relative to the remaining slice, accounting
                // for skipped whitespace
                let start = self.position + span_range.start;
                let end = self.position + span_range.end;
                self.position = end;

                // An opening quote switches into string mode; the whole
                // literal comes back as a single decoded token
                if kind == TokenKind::StringStart {
                    return self.lex_string(start);
                }

                // An unterminated block comment never matches the comment
                // regex, so logos falls back to `/` then `*`; swallow the
                // rest of the input as one error token instead
                if kind == TokenKind::Slash && self.source[start..].starts_with("/*") {
                    self.position = self.source.len();
                    self.errors.push(SpannedError::new(
                        LexError::UnterminatedBlockComment,
                        Span::new(start as u32, self.position as u32),
                    ));
                    return Token::new(
                        TokenKind::Error,
                        Span::new(start as u32, self.position as u32),
                        &self.source[start..],
                    );
                }

                Token::new(kind, Span::new(start as u32, end as u32), lexeme)
            }
            Some(Err(())) => {
                let span_range = logos_lexer.span();
                let start = self.position + span_range.start;

                // Error recovery: skip the invalid character
                let invalid_char = self.source[start..].chars().next().unwrap_or('\0');
                self.position = start + invalid_char.len_utf8();

                self.errors.push(SpannedError::new(
                    LexError::UnexpectedChar,
                    Span::new(start as u32, self.position as u32),
                ));

                Token::new(
                    TokenKind::Error,
                    Span::new(start as u32, self.position as u32),
                    &self.source[start..self.position],
                )
            }
            None => Token::new(
                TokenKind::Eof,
                Span::new(self.source.len() as u32, self.source.len() as u32),
                "",
            ),
        }
    }

    /// Lex a string literal, starting just after the opening quote
    ///
    /// Returns a single `String` token whose lexeme holds the decoded value.
    /// An unterminated string yields an `Error` token spanning to the end of
    /// the line.
    fn lex_string(&mut self, start: usize) -> Token {
        let source = self.source;
        let mut content = String::new();
        let mut chars = source[self.position..].char_indices();

        while let Some((offset, c)) = chars.next() {
            match c {
                '"' => {
                    self.position += offset + 1;
                    return Token::new(
                        TokenKind::String,
                        Span::new(start as u32, self.position as u32),
                        content,
                    );
                }
                '\n' => {
                    // Unterminated: the error token spans to end of line and
                    // lexing resumes on the next line
                    self.position += offset;
                    self.errors.push(SpannedError::new(
                        LexError::UnterminatedString,
                        Span::new(start as u32, self.position as u32),
                    ));
                    return Token::new(
                        TokenKind::Error,
                        Span::new(start as u32, self.position as u32),
                        &self.source[start..self.position],
                    );
                }
                '\\' => {
                    let Some((esc_offset, escaped)) = chars.next() else {
                        break;
                    };
                    match escaped {
                        'n' => content.push('\n'),
                        't' => content.push('\t'),
                        '\\' => content.push('\\'),
                        '"' => content.push('"'),
                        _ => {
                            let esc_start = self.position + offset;
                            self.errors.push(SpannedError::new(
                                LexError::InvalidEscape(escaped),
                                Span::new(
                                    esc_start as u32,
                                    (self.position + esc_offset + escaped.len_utf8()) as u32,
                                ),
                            ));
                            content.push(escaped);
                        }
                    }
                }
                _ => content.push(c),
            }
        }

        // Reached end of input inside the string
        self.position = self.source.len();
        self.errors.push(SpannedError::new(
            LexError::UnterminatedString,
            Span::new(start as u32, self.position as u32),
        ));
        Token::new(
            TokenKind::Error,
            Span::new(start as u32, self.position as u32),
            &self.source[start..],
        )
    }
}
