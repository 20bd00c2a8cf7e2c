//! Toy-C front end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds, keyword and operator tables
//! - [`lexer`]: Tokenization (source text → tokens + identifier table)
//! - [`parse`]: Parsing (tokens → AST + syntax errors), extended by
//!   `declarations`, `statements` and `expressions`
//! - [`ast`]: AST node definitions and tree inspection
//!
//! # Supported C Subset
//!
//! - Types: `int`, `float`, `char`, `double`, `void`, `string`
//! - Statements: declarations, assignments, `if`/`else`, `while`, `return`
//! - Expressions: arithmetic, comparison, logical, calls, indexing
//! - Preprocessor directives are tokenized but never interpreted
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with panic-mode error recovery.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;
