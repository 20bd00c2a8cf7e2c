//! Token definitions shared by the lexer and the parser
//!
//! The keyword and operator tables are plain `const` data: they are built at
//! compile time and never mutated, so any number of scans may consult them
//! concurrently.

use super::ast::SourceLocation;
use std::fmt;

/// Closed set of token tags produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Int,
    Float,
    Char,
    Double,
    Void,
    Str, // string
    Return,
    If,
    Else,
    While,
    For,
    Do,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Struct,
    Typedef,
    Sizeof,
    Goto,

    // Names and literals
    Ident,
    Number,
    Text,
    CharLiteral,
    Directive,

    // Two-character operators
    EqEq,       // ==
    NotEq,      // !=
    Le,         // <=
    Ge,         // >=
    AndAnd,     // &&
    OrOr,       // ||
    PlusEq,     // +=
    MinusEq,    // -=
    StarEq,     // *=
    SlashEq,    // /=
    PercentEq,  // %=
    Arrow,      // ->
    PlusPlus,   // ++
    MinusMinus, // --

    // Single-character operators and delimiters
    Eq,        // =
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Percent,   // %
    Lt,        // <
    Gt,        // >
    Bang,      // !
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    Ellipsis, // ...
    Eof,
    Error,
}

/// Reserved words, matched exactly and case-sensitively.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("char", TokenKind::Char),
    ("double", TokenKind::Double),
    ("void", TokenKind::Void),
    ("string", TokenKind::Str),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("do", TokenKind::Do),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("struct", TokenKind::Struct),
    ("typedef", TokenKind::Typedef),
    ("sizeof", TokenKind::Sizeof),
    ("goto", TokenKind::Goto),
];

pub const TWO_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("%=", TokenKind::PercentEq),
    ("->", TokenKind::Arrow),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
];

pub const ONE_CHAR_OPERATORS: &[(char, TokenKind)] = &[
    ('=', TokenKind::Eq),
    ('+', TokenKind::Plus),
    ('-', TokenKind::Minus),
    ('*', TokenKind::Star),
    ('/', TokenKind::Slash),
    ('%', TokenKind::Percent),
    ('<', TokenKind::Lt),
    ('>', TokenKind::Gt),
    ('!', TokenKind::Bang),
    (';', TokenKind::Semicolon),
    (',', TokenKind::Comma),
    ('.', TokenKind::Dot),
    ('(', TokenKind::LParen),
    (')', TokenKind::RParen),
    ('{', TokenKind::LBrace),
    ('}', TokenKind::RBrace),
    ('[', TokenKind::LBracket),
    (']', TokenKind::RBracket),
];

impl TokenKind {
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, kind)| *kind)
    }

    pub fn two_char_operator(pair: &str) -> Option<TokenKind> {
        TWO_CHAR_OPERATORS
            .iter()
            .find(|(spelling, _)| *spelling == pair)
            .map(|(_, kind)| *kind)
    }

    pub fn one_char_operator(ch: char) -> Option<TokenKind> {
        ONE_CHAR_OPERATORS
            .iter()
            .find(|(spelling, _)| *spelling == ch)
            .map(|(_, kind)| *kind)
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }

    /// Type keywords that may start a declaration or a function definition.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::Double
                | TokenKind::Void
                | TokenKind::Str
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((spelling, _)) = KEYWORDS.iter().find(|(_, kind)| kind == self) {
            return write!(f, "'{}'", spelling);
        }
        if let Some((spelling, _)) = TWO_CHAR_OPERATORS.iter().find(|(_, kind)| kind == self) {
            return write!(f, "'{}'", spelling);
        }
        if let Some((ch, _)) = ONE_CHAR_OPERATORS.iter().find(|(_, kind)| kind == self) {
            return match ch {
                '{' => write!(f, "'{{'"),
                '}' => write!(f, "'}}'"),
                _ => write!(f, "'{}'", ch),
            };
        }
        match self {
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Text => write!(f, "string literal"),
            TokenKind::CharLiteral => write!(f, "char literal"),
            TokenKind::Directive => write!(f, "preprocessor directive"),
            TokenKind::Ellipsis => write!(f, "'...'"),
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "lexical error"),
        }
    }
}

/// Numeric value carried by a NUMBER token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// A classified slice of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token
    pub lexeme: String,
    pub location: SourceLocation,
    /// Only set for [`TokenKind::Number`]
    pub literal: Option<Literal>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
            literal: None,
        }
    }

    pub fn number(lexeme: impl Into<String>, value: Literal, location: SourceLocation) -> Self {
        Self {
            kind: TokenKind::Number,
            lexeme: lexeme.into(),
            location,
            literal: Some(value),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Coarse display category, used when listing tokens for humans.
    pub fn category(&self) -> &'static str {
        if self.kind.is_keyword() {
            return "keyword";
        }
        match self.kind {
            TokenKind::Ident => "identifier",
            TokenKind::Number if self.lexeme.contains('.') => "decimal number",
            TokenKind::Number => "integer number",
            TokenKind::Text => "text constant",
            TokenKind::CharLiteral => "character constant",
            TokenKind::Directive => "preprocessor directive",
            TokenKind::EqEq
            | TokenKind::NotEq
            | TokenKind::Le
            | TokenKind::Ge
            | TokenKind::Lt
            | TokenKind::Gt => "comparison operator",
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent => "arithmetic operator",
            TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus => "assignment operator",
            TokenKind::AndAnd | TokenKind::OrOr | TokenKind::Bang => "logical operator",
            TokenKind::Arrow => "access operator",
            TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::Dot
            | TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Ellipsis => "special symbol",
            TokenKind::Eof => "end of file",
            _ => "lexical error",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::Error => write!(f, "invalid token '{}'", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}
