//! # Introduction
//!
//! minic is the front end of a toy C compiler. It scans source text into
//! classified tokens and parses them into an AST, reporting lexical and
//! syntactic errors without ever giving up on the input.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens + identifier table → Parser → AST + errors
//! ```
//!
//! 1. [`parser::lexer`]: one pass over the characters. Malformed lexemes
//!    become error tokens in the stream and [`parser::lexer::LexError`]
//!    values on the side.
//! 2. [`parser::parse`]: recursive descent with panic-mode recovery; always
//!    returns a [`parser::ast::Program`].
//! 3. [`parser::ast::NodeRef`]: label and child enumeration for every node,
//!    for whoever wants to draw or print the tree.
//!
//! Both phases are pure functions of their input; logging goes through
//! `tracing` and is only visible when the caller installs a subscriber.

pub mod parser;

use parser::lexer::Scan;
use parser::parse::Parsed;

/// Result of running both phases over one source file
#[derive(Debug, Clone)]
pub struct Analysis {
    pub scan: Scan,
    pub parsed: Parsed,
}

impl Analysis {
    /// True when neither phase reported anything
    pub fn is_clean(&self) -> bool {
        !self.scan.has_errors() && self.parsed.is_ok()
    }
}

/// Scan and parse `source`. The parser receives the scanner's tokens unchanged.
pub fn analyze(source: &str) -> Analysis {
    let scan = parser::lexer::scan(source);
    let parsed = parser::parse::parse(scan.tokens.clone());
    Analysis { scan, parsed }
}
