//! Lexer (tokenizer) for toy-C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser,
//! together with an identifier occurrence table. Malformed input never aborts
//! the scan: every bad lexeme becomes a [`TokenKind::Error`] token plus a
//! [`LexError`] value, and scanning resumes right after it. The one exception
//! is an unterminated block comment, which ends tokenization on the spot.

use super::ast::SourceLocation;
use super::token::{Literal, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Identifier spelling → number of occurrences. Keywords are never counted.
pub type IdentifierTable = FxHashMap<String, usize>;

/// Lexeme of the error token for a block comment that never closes
pub const UNTERMINATED_COMMENT_LEXEME: &str = "/*...EOF";

/// Category of a malformed lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedBlockComment,
    UnterminatedText,
    UnterminatedChar,
    DecimalComma,
    DigitLeadingIdentifier,
    IntegerOutOfRange,
    InvalidCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            LexErrorKind::UnterminatedText => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedChar => write!(f, "unterminated character literal"),
            LexErrorKind::DecimalComma => {
                write!(f, "comma used as decimal separator (use '.' instead)")
            }
            LexErrorKind::DigitLeadingIdentifier => {
                write!(f, "identifier cannot start with a digit")
            }
            LexErrorKind::IntegerOutOfRange => write!(f, "integer literal out of range"),
            LexErrorKind::InvalidCharacter(ch) => write!(f, "invalid character {:?}", ch),
        }
    }
}

/// Lexer error type
///
/// One value is produced for every error token in the stream, in the same order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("lexical error: {kind} (lexeme {lexeme:?}) @ {location}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

/// Everything a scan produces.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Always ends with a [`TokenKind::Eof`] token
    pub tokens: Vec<Token>,
    pub identifiers: IdentifierTable,
    pub diagnostics: Vec<LexError>,
}

impl Scan {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Scan a whole source string.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn scan(source: &str) -> Scan {
    let scan = Lexer::new(source).tokenize();
    tracing::debug!(
        tokens = scan.tokens.len(),
        identifiers = scan.identifiers.len(),
        errors = scan.diagnostics.len(),
        "scan finished"
    );
    scan
}

/// Lexer for toy-C source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    identifiers: IdentifierTable,
    diagnostics: Vec<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            identifiers: IdentifierTable::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Scan {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '#' && self.at_line_start() {
                self.directive();
                continue;
            }

            if ch == '/' && self.peek_ahead(1) == Some('/') {
                self.skip_line_comment();
                continue;
            }

            if ch == '/' && self.peek_ahead(1) == Some('*') {
                if self.skip_block_comment() {
                    continue;
                }
                // Fail fast: nothing after an unterminated comment is scanned
                break;
            }

            if ch.is_alphabetic() || ch == '_' {
                self.identifier_or_keyword();
            } else if ch == '"' {
                self.text_literal();
            } else if ch == '\'' {
                self.char_literal();
            } else if ch.is_ascii_digit() {
                self.number_literal();
            } else {
                self.operator();
            }
        }

        let eof = Token::new(TokenKind::Eof, "", self.current_location());
        self.tokens.push(eof);

        Scan {
            tokens: self.tokens,
            identifiers: self.identifiers,
            diagnostics: self.diagnostics,
        }
    }

    /// A `#` starts a directive only when preceded by nothing but whitespace on its line.
    fn at_line_start(&self) -> bool {
        self.input[..self.position]
            .iter()
            .rev()
            .take_while(|&&c| c != '\n')
            .all(|c| c.is_whitespace())
    }

    /// Preprocessor directive: the rest of the line, newline excluded
    fn directive(&mut self) {
        let start = self.position;
        let loc = self.current_location();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        let lexeme = self.slice(start);
        self.push(TokenKind::Directive, lexeme, loc);
    }

    /// Skip single-line comment (// ...), leaving the newline in place
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */).
    ///
    /// Returns `false` when the input ends before `*/`; the cursor is then left
    /// at the opening `/*` and an [`UNTERMINATED_COMMENT_LEXEME`] error token
    /// has been recorded.
    fn skip_block_comment(&mut self) -> bool {
        let mut cursor = self.position + 2;
        while cursor < self.input.len() {
            if self.input[cursor] == '*' && self.input.get(cursor + 1) == Some(&'/') {
                while self.position < cursor + 2 {
                    self.advance();
                }
                return true;
            }
            cursor += 1;
        }

        let loc = self.current_location();
        self.error(
            LexErrorKind::UnterminatedBlockComment,
            UNTERMINATED_COMMENT_LEXEME.to_string(),
            loc,
        );
        false
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) {
        let start = self.position;
        let loc = self.current_location();

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let ident = self.slice(start);
        match TokenKind::keyword(&ident) {
            Some(kind) => self.push(kind, ident, loc),
            None => {
                *self.identifiers.entry(ident.clone()).or_insert(0) += 1;
                self.push(TokenKind::Ident, ident, loc);
            }
        }
    }

    /// Parse string literal. Escapes are kept verbatim in the lexeme.
    fn text_literal(&mut self) {
        let start = self.position;
        let loc = self.current_location();
        self.advance(); // opening quote

        let mut closed = false;
        while let Some(ch) = self.advance() {
            match ch {
                '\\' => {
                    self.advance();
                }
                '"' => {
                    closed = true;
                    break;
                }
                '\n' => break,
                _ => {}
            }
        }

        let lexeme = self.slice(start);
        if closed {
            self.push(TokenKind::Text, lexeme, loc);
        } else {
            self.error(LexErrorKind::UnterminatedText, lexeme, loc);
        }
    }

    /// Parse character literal: exactly one, possibly escaped, character.
    fn char_literal(&mut self) {
        let start = self.position;
        let loc = self.current_location();
        self.advance(); // opening quote

        let closed = match self.advance() {
            None | Some('\n') => false,
            Some(ch) => {
                if ch == '\\' {
                    self.advance();
                }
                if self.peek() == Some('\'') {
                    self.advance();
                    true
                } else {
                    false
                }
            }
        };

        let lexeme = self.slice(start);
        if closed {
            self.push(TokenKind::CharLiteral, lexeme, loc);
        } else {
            self.error(LexErrorKind::UnterminatedChar, lexeme, loc);
        }
    }

    /// Parse numeric literal (integer or floating)
    fn number_literal(&mut self) {
        let start = self.position;
        let loc = self.current_location();
        self.consume_digits();

        // 3,14 is rejected as a single malformed lexeme
        if self.peek() == Some(',') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
            let lexeme = self.slice(start);
            self.error(LexErrorKind::DecimalComma, lexeme, loc);
            return;
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            self.consume_digits();
        }

        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            while let Some(ch) = self.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    self.advance();
                } else {
                    break;
                }
            }
            let lexeme = self.slice(start);
            self.error(LexErrorKind::DigitLeadingIdentifier, lexeme, loc);
            return;
        }

        let lexeme = self.slice(start);
        let value = if is_float {
            lexeme.parse::<f64>().ok().map(Literal::Float)
        } else {
            lexeme.parse::<i64>().ok().map(Literal::Int)
        };

        match value {
            Some(value) => self.tokens.push(Token::number(lexeme, value, loc)),
            None => self.error(LexErrorKind::IntegerOutOfRange, lexeme, loc),
        }
    }

    /// Operators and delimiters, longest match first
    fn operator(&mut self) {
        let loc = self.current_location();

        if self.starts_with("...") {
            self.advance_by(3);
            self.push(TokenKind::Ellipsis, "...", loc);
            return;
        }

        if self.position + 1 < self.input.len() {
            let pair: String = self.input[self.position..self.position + 2].iter().collect();
            if let Some(kind) = TokenKind::two_char_operator(&pair) {
                self.advance_by(2);
                self.push(kind, pair, loc);
                return;
            }
        }

        let Some(ch) = self.advance() else {
            return;
        };
        match TokenKind::one_char_operator(ch) {
            Some(kind) => self.push(kind, ch.to_string(), loc),
            None => self.error(LexErrorKind::InvalidCharacter(ch), ch.to_string(), loc),
        }
    }

    // ===== Helper methods =====

    fn push(&mut self, kind: TokenKind, lexeme: impl Into<String>, loc: SourceLocation) {
        self.tokens.push(Token::new(kind, lexeme, loc));
    }

    /// Record a malformed lexeme both in-band and as a diagnostic
    fn error(&mut self, kind: LexErrorKind, lexeme: String, loc: SourceLocation) {
        self.tokens.push(Token::new(TokenKind::Error, lexeme.clone(), loc));
        self.diagnostics.push(LexError {
            kind,
            lexeme,
            location: loc,
        });
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_ahead(i) == Some(c))
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
