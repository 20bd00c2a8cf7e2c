//! Declaration parsing implementation
//!
//! This module handles the two constructs introduced by a type keyword:
//!
//! - Function definitions: `type name(params) body`
//! - Variable declarations: `type name [= expr]`
//!
//! # Grammar
//!
//! ```text
//! function_def ::= type identifier "(" params? ")" block_or_stmt
//! params       ::= "void" | type identifier ("," type identifier)*
//! var_decl     ::= type identifier ("=" expr)?
//! type         ::= "int" | "float" | "char" | "double" | "void" | "string"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::token::{Token, TokenKind};

impl Parser {
    /// Parse function definition. The caller has already seen `type ident (`.
    pub(crate) fn parse_function_definition(&mut self) -> AstNode {
        let type_tok = self.advance();
        let return_type = base_type(&type_tok);
        let name = self.advance().lexeme;
        self.advance(); // '('

        let params = self.parse_parameter_list();

        self.expect_token(TokenKind::RParen, "Expected ')' after parameters");

        let body = match self.parse_block_or_statement() {
            Some(AstNode::Block(block)) => block,
            Some(stmt) => Block {
                location: stmt.location(),
                body: vec![stmt],
            },
            None => Block {
                body: Vec::new(),
                location: self.current_location(),
            },
        };

        AstNode::FunctionDef(FunctionDef {
            return_type,
            name,
            params,
            body,
            location: type_tok.location,
        })
    }

    /// Parse parameter list, stopping before the closing `)`
    fn parse_parameter_list(&mut self) -> Vec<VarDecl> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return params;
        }

        // Special case: (void) means no parameters
        if self.check(TokenKind::Void) && self.peek_ahead(1).is(TokenKind::RParen) {
            self.advance();
            return params;
        }

        loop {
            if !self.peek().kind.is_type_keyword() {
                self.error_and_sync("Expected parameter type");
                break;
            }

            let type_tok = self.advance();
            if let Some(name_tok) =
                self.expect_token(TokenKind::Ident, "Expected parameter identifier")
            {
                params.push(VarDecl {
                    var_type: base_type(&type_tok),
                    name: var(&name_tok),
                    init: None,
                    location: type_tok.location,
                });
            }

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        params
    }

    /// Parse variable declaration: type name [= init]
    ///
    /// A declaration without a name is dropped once the error is recorded.
    pub(crate) fn parse_variable_declaration(&mut self) -> Option<AstNode> {
        let type_tok = self.advance();
        let name_tok = self.expect_token(TokenKind::Ident, "Expected identifier");

        let init = if self.match_token(TokenKind::Eq) {
            Some(Box::new(self.parse_expression()))
        } else {
            None
        };

        let name_tok = name_tok?;
        Some(AstNode::VarDecl(VarDecl {
            var_type: base_type(&type_tok),
            name: var(&name_tok),
            init,
            location: type_tok.location,
        }))
    }
}

/// Callers only pass type-keyword tokens; anything else falls back to `int`.
fn base_type(token: &Token) -> BaseType {
    BaseType::from_token(token.kind).unwrap_or(BaseType::Int)
}

pub(crate) fn var(token: &Token) -> Var {
    Var {
        name: token.lexeme.clone(),
        location: token.location,
    }
}
