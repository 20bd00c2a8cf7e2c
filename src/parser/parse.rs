//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, recovery, and coordination
//! - `declarations`: function definitions, parameters and variable declarations
//! - `statements`: if, while, return, assignment and blocks
//! - `expressions`: binary layers, postfix calls/indexing and primaries
//!
//! # Error recovery
//!
//! The parser never stops at the first error. A mismatch records a
//! [`ParseError`] and then skips tokens until a synchronizing token (`;`, `}`
//! or end of file), consuming `;` and `}`. Parsing always reaches end of file
//! and always yields a [`Program`], possibly with placeholder nodes.

use crate::parser::ast::*;
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} (found '{found}') @ {location}")]
pub struct ParseError {
    pub message: String,
    /// Offending lexeme; empty at end of file
    pub found: String,
    pub location: SourceLocation,
}

/// Outcome of a parse: the tree plus every error met on the way.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse an already-scanned token sequence.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: Vec<Token>) -> Parsed {
    let parsed = Parser::new(tokens).parse_program();
    tracing::debug!(
        statements = parsed.program.body.len(),
        errors = parsed.errors.len(),
        "parse finished"
    );
    parsed
}

/// Deepest nesting of parenthesized expressions and statement bodies the
/// parser descends into before giving up on the construct.
pub const MAX_NESTING: usize = 100;

/// Recursive descent parser for the toy-C grammar
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) errors: Vec<ParseError>,
    /// Open expressions and statement bodies on the current descent
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a parser over `tokens`. An end-of-file token is appended when
    /// the sequence does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let location = tokens.last().map(|t| t.location).unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Scan `source` and build a parser over the resulting tokens.
    #[cfg(test)]
    pub(crate) fn from_source(source: &str) -> Self {
        Self::new(crate::parser::lexer::scan(source).tokens)
    }

    /// Parse the entire program
    pub fn parse_program(mut self) -> Parsed {
        let mut program = Program::new();

        while !self.is_at_end() {
            if self.match_token(TokenKind::Directive) {
                continue;
            }

            if let Some(node) = self.parse_top_level() {
                program.body.push(node);
            }

            // Statement terminators are optional
            self.match_token(TokenKind::Semicolon);
        }

        Parsed {
            program,
            errors: self.errors,
        }
    }

    /// Decide between a function definition and an ordinary statement
    fn parse_top_level(&mut self) -> Option<AstNode> {
        if self.peek().kind.is_type_keyword()
            && self.peek_ahead(1).is(TokenKind::Ident)
            && self.peek_ahead(2).is(TokenKind::LParen)
        {
            return Some(self.parse_function_definition());
        }

        self.parse_statement()
    }

    // ===== Error recovery =====

    /// Record an error anchored at `token`
    pub(crate) fn report(&mut self, message: &str, token: &Token) {
        let found = if token.is(TokenKind::Eof) {
            String::new()
        } else {
            token.lexeme.clone()
        };
        self.errors.push(ParseError {
            message: message.to_string(),
            found,
            location: token.location,
        });
    }

    /// Report at the current token, then skip to the next synchronizing token
    pub(crate) fn error_and_sync(&mut self, message: &str) {
        let token = self.peek().clone();
        self.report(message, &token);
        self.synchronize();
    }

    /// Panic mode: skip to `;`, `}` or end of file, consuming `;` and `}`.
    pub(crate) fn synchronize(&mut self) {
        while !matches!(
            self.peek().kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.position += 1;
        }
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    /// Enter one level of nesting. Past [`MAX_NESTING`] the error is
    /// reported, the parser synchronizes and the caller must not descend.
    pub(crate) fn enter_nested(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            self.error_and_sync("Nested too deeply");
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        self.peek_ahead(0)
    }

    /// Look `n` tokens ahead; positions past the end yield the end-of-file token
    pub(crate) fn peek_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Consume a token of `kind`, or report `message` and synchronize
    pub(crate) fn expect_token(&mut self, kind: TokenKind, message: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error_and_sync(message);
            None
        }
    }
}
