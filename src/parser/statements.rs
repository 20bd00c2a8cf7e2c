//! Statement parsing implementation
//!
//! This module handles parsing of all toy-C statement types:
//!
//! - Variable declarations: `int x = 42`
//! - Control flow: `if`, `while`
//! - Jump statements: `return`
//! - Assignments: `x = expr`
//! - Compound statements: `{ ... }`
//! - Expression statements: function calls and any other expression
//!
//! # Grammar
//!
//! ```text
//! statement     ::= var_decl | if_stmt | while_stmt | return_stmt
//!                 | assignment | expr
//! if_stmt       ::= "if" "(" expr ")" block_or_stmt ("else" block_or_stmt)?
//! while_stmt    ::= "while" "(" expr ")" block_or_stmt
//! return_stmt   ::= "return" expr?
//! assignment    ::= identifier "=" expr
//! block_or_stmt ::= "{" (statement ";"?)* "}" | statement
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::declarations::var;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse a statement.
    ///
    /// Returns `None` for a skipped preprocessor directive and for a
    /// declaration abandoned during error recovery.
    pub(crate) fn parse_statement(&mut self) -> Option<AstNode> {
        let kind = self.peek().kind;

        if kind == TokenKind::Directive {
            self.advance();
            return None;
        }

        if kind.is_type_keyword() {
            return self.parse_variable_declaration();
        }

        match kind {
            TokenKind::If => Some(self.parse_if_statement()),
            TokenKind::While => Some(self.parse_while_statement()),
            TokenKind::Return => Some(self.parse_return_statement()),
            TokenKind::Ident if self.peek_ahead(1).is(TokenKind::Eq) => {
                Some(self.parse_assignment())
            }
            _ => Some(self.parse_expression()),
        }
    }

    /// Parse statement or block (for function, if and while bodies)
    pub(crate) fn parse_block_or_statement(&mut self) -> Option<AstNode> {
        if !self.enter_nested() {
            return None;
        }
        let node = if self.check(TokenKind::LBrace) {
            Some(self.parse_block())
        } else {
            self.parse_statement()
        };
        self.leave_nested();
        node
    }

    /// Parse `{ ... }`. The block sits at its closing brace; when that is
    /// missing, at its first statement, else at the opening brace.
    fn parse_block(&mut self) -> AstNode {
        let open = self.advance().location;
        let mut body = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_statement() {
                body.push(stmt);
            }
            self.match_token(TokenKind::Semicolon);
        }

        let location = match self.expect_token(TokenKind::RBrace, "Expected '}'") {
            Some(close) => close.location,
            None => body.first().map_or(open, AstNode::location),
        };

        AstNode::Block(Block { body, location })
    }

    /// A branch that must exist in the tree; an empty block stands in when
    /// recovery left nothing to put there.
    fn parse_branch(&mut self) -> Box<AstNode> {
        let node = self.parse_block_or_statement().unwrap_or_else(|| {
            AstNode::Block(Block {
                body: Vec::new(),
                location: self.current_location(),
            })
        });
        Box::new(node)
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> AstNode {
        let location = self.advance().location;

        self.expect_token(TokenKind::LParen, "Expected '('");
        let test = Box::new(self.parse_expression());
        self.expect_token(TokenKind::RParen, "Expected ')'");

        let then = self.parse_branch();

        let otherwise = if self.match_token(TokenKind::Else) {
            Some(self.parse_branch())
        } else {
            None
        };

        AstNode::If {
            test,
            then,
            otherwise,
            location,
        }
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> AstNode {
        let location = self.advance().location;

        self.expect_token(TokenKind::LParen, "Expected '('");
        let test = Box::new(self.parse_expression());
        self.expect_token(TokenKind::RParen, "Expected ')'");

        let body = self.parse_branch();

        AstNode::While {
            test,
            body,
            location,
        }
    }

    /// Parse return statement; the value is absent before `;`, `}` or end of file
    fn parse_return_statement(&mut self) -> AstNode {
        let location = self.advance().location;

        let value = match self.peek().kind {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(Box::new(self.parse_expression())),
        };

        AstNode::Return { value, location }
    }

    /// Parse assignment. The caller has already seen `identifier =`.
    fn parse_assignment(&mut self) -> AstNode {
        let target = var(&self.advance());
        self.advance(); // '='
        let value = Box::new(self.parse_expression());

        AstNode::Assign {
            location: target.location,
            target,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{Parsed, Parser};

    fn parse_source(source: &str) -> Parsed {
        Parser::from_source(source).parse_program()
    }

    fn function_body(parsed: &Parsed) -> &[AstNode] {
        match &parsed.program.body[0] {
            AstNode::FunctionDef(func) => &func.body.body,
            other => panic!("Expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_else() {
        let parsed = parse_source("int main() { if (x > 0) { return 1; } else return 0; }");
        assert!(parsed.is_ok(), "{:?}", parsed.errors);

        match &function_body(&parsed)[0] {
            AstNode::If {
                test,
                then,
                otherwise: Some(otherwise),
                location,
            } => {
                assert!(matches!(**test, AstNode::BinaryOp { op: BinOp::Gt, .. }));
                assert!(matches!(**then, AstNode::Block(_)));
                assert!(matches!(**otherwise, AstNode::Return { .. }));
                assert_eq!(*location, SourceLocation::new(1, 14));
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_with_block() {
        let parsed = parse_source("void loop() { while (i < 10) { i = i + 1; } }");
        assert!(parsed.is_ok());

        let AstNode::While { body, .. } = &function_body(&parsed)[0] else {
            panic!("Expected while statement");
        };
        let AstNode::Block(block) = &**body else {
            panic!("Expected block body");
        };
        assert_eq!(block.location, SourceLocation::new(1, 43));
        assert!(matches!(block.body[0], AstNode::Assign { .. }));
    }

    #[test]
    fn test_bare_return() {
        let parsed = parse_source("void f() { return; }");
        assert!(parsed.is_ok());
        assert!(matches!(
            function_body(&parsed)[0],
            AstNode::Return { value: None, .. }
        ));
    }

    #[test]
    fn test_assignment_vs_comparison() {
        let parsed = parse_source("x = 1; x == 1;");
        assert!(parsed.is_ok());
        assert!(matches!(parsed.program.body[0], AstNode::Assign { .. }));
        assert!(matches!(
            parsed.program.body[1],
            AstNode::BinaryOp { op: BinOp::Eq, .. }
        ));
    }

    #[test]
    fn test_semicolons_are_optional() {
        let parsed = parse_source("int main() { int a = 1 int b = 2 return a }");
        assert!(parsed.is_ok());
        assert_eq!(function_body(&parsed).len(), 3);
    }

    #[test]
    fn test_semicolon_before_else_ends_the_if() {
        let parsed = parse_source("if (c) x = 1; else y = 2;");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].found, "else");
        assert_eq!(parsed.errors[0].location, SourceLocation::new(1, 15));

        assert_eq!(parsed.program.body.len(), 2);
        assert!(matches!(
            parsed.program.body[0],
            AstNode::If { otherwise: None, .. }
        ));
        assert!(matches!(parsed.program.body[1], AstNode::Num(_, _)));
    }

    #[test]
    fn test_block_sits_at_closing_brace() {
        let parsed = parse_source("while (x) {\n  x = x - 1;\n}");
        assert!(parsed.is_ok());
        let AstNode::While { body, .. } = &parsed.program.body[0] else {
            panic!("Expected while statement");
        };
        assert_eq!(body.location(), SourceLocation::new(3, 1));

        // Unclosed: falls back to the first statement
        let parsed = parse_source("while (x) {\n  x = x - 1;");
        assert_eq!(parsed.errors.len(), 1);
        let AstNode::While { body, .. } = &parsed.program.body[0] else {
            panic!("Expected while statement");
        };
        assert_eq!(body.location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn test_deeply_nested_bodies_are_cut_off() {
        let source = "if (x) ".repeat(1_000) + "y = 1;";
        let parsed = parse_source(&source);
        assert!(!parsed.errors.is_empty());
        assert_eq!(parsed.errors[0].message, "Nested too deeply");
        assert_eq!(parsed.program.body.len(), 1);
    }

    #[test]
    fn test_missing_paren_in_if_recovers() {
        let parsed = parse_source("int main() { if (x { y = 1; } return 0; }");
        assert!(!parsed.is_ok());
        assert_eq!(parsed.errors[0].message, "Expected ')'");
        assert_eq!(parsed.errors[0].found, "{");
        assert_eq!(parsed.program.body.len(), 1);
    }
}
