//! Expression parsing implementation
//!
//! Binary operators are parsed one precedence layer per method, each layer a
//! left fold over the next tighter one, so `a - b - c` is `(a - b) - c`.
//!
//! # Precedence (loosest first)
//!
//! | Layer          | Operators            |
//! |----------------|----------------------|
//! | logical or     | `\|\|`               |
//! | logical and    | `&&`                 |
//! | equality       | `==` `!=`            |
//! | relational     | `<` `<=` `>` `>=`    |
//! | additive       | `+` `-`              |
//! | multiplicative | `*` `/` `%`          |
//! | postfix        | call `f(..)`, index `a[..]` |
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::declarations::var;
use crate::parser::parse::Parser;
use crate::parser::token::{Literal, TokenKind};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> AstNode {
        let location = self.current_location();
        if !self.enter_nested() {
            return AstNode::Num(Literal::Int(0), location);
        }
        let expr = self.parse_logical_or();
        self.leave_nested();
        expr
    }

    /// Left-fold `next` over any of `ops`. The resulting node sits at its left operand.
    fn parse_binary_layer(
        &mut self,
        ops: &[(TokenKind, BinOp)],
        next: fn(&mut Self) -> AstNode,
    ) -> AstNode {
        let mut left = next(self);

        while let Some(&(_, op)) = ops.iter().find(|(kind, _)| self.check(*kind)) {
            self.advance();
            let right = next(self);
            left = AstNode::BinaryOp {
                location: left.location(),
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        left
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> AstNode {
        self.parse_binary_layer(&[(TokenKind::OrOr, BinOp::Or)], Self::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> AstNode {
        self.parse_binary_layer(&[(TokenKind::AndAnd, BinOp::And)], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> AstNode {
        self.parse_binary_layer(
            &[(TokenKind::EqEq, BinOp::Eq), (TokenKind::NotEq, BinOp::Ne)],
            Self::parse_relational,
        )
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> AstNode {
        self.parse_binary_layer(
            &[
                (TokenKind::Lt, BinOp::Lt),
                (TokenKind::Le, BinOp::Le),
                (TokenKind::Gt, BinOp::Gt),
                (TokenKind::Ge, BinOp::Ge),
            ],
            Self::parse_additive,
        )
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> AstNode {
        self.parse_binary_layer(
            &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
            Self::parse_multiplicative,
        )
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> AstNode {
        self.parse_binary_layer(
            &[
                (TokenKind::Star, BinOp::Mul),
                (TokenKind::Slash, BinOp::Div),
                (TokenKind::Percent, BinOp::Mod),
            ],
            Self::parse_postfix,
        )
    }

    /// Parse postfix (calls and indexing, chainable)
    fn parse_postfix(&mut self) -> AstNode {
        let mut expr = self.parse_primary();

        loop {
            if self.match_token(TokenKind::LParen) {
                let args = self.parse_argument_list();
                self.expect_token(TokenKind::RParen, "Expected ')'");
                expr = AstNode::Call {
                    location: expr.location(),
                    callee: Box::new(expr),
                    args,
                };
            } else if self.match_token(TokenKind::LBracket) {
                let index = Box::new(self.parse_expression());
                self.expect_token(TokenKind::RBracket, "Expected ']'");
                expr = AstNode::Index {
                    location: expr.location(),
                    target: Box::new(expr),
                    index,
                };
            } else {
                break;
            }
        }

        expr
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Vec<AstNode> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return args;
        }

        loop {
            args.push(self.parse_expression());

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        args
    }

    /// Parse primary (literals, variables, parenthesized expressions).
    ///
    /// On failure a `Num(0)` placeholder is returned at the offending token so
    /// that the enclosing layers still build a complete node.
    fn parse_primary(&mut self) -> AstNode {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.literal.unwrap_or(Literal::Int(0));
                AstNode::Num(value, token.location)
            }
            TokenKind::Text => {
                self.advance();
                AstNode::TextLit(token.lexeme, token.location)
            }
            TokenKind::CharLiteral => {
                self.advance();
                AstNode::CharLit(token.lexeme, token.location)
            }
            TokenKind::Ident => {
                self.advance();
                AstNode::Var(var(&token))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression();
                self.expect_token(TokenKind::RParen, "Expected ')'");
                expr
            }
            _ => {
                self.error_and_sync("Expected number, identifier, string, char or '('");
                AstNode::Num(Literal::Int(0), token.location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{Parsed, Parser};
    use crate::parser::token::Literal;

    fn parse_source(source: &str) -> Parsed {
        Parser::from_source(source).parse_program()
    }

    fn expr(source: &str) -> AstNode {
        let parsed = parse_source(source);
        assert!(parsed.is_ok(), "unexpected errors: {:?}", parsed.errors);
        parsed.program.body.into_iter().next().expect("one statement")
    }

    fn int(n: i64, line: usize, column: usize) -> AstNode {
        AstNode::Num(Literal::Int(n), SourceLocation::new(line, column))
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let tree = expr("1 - 2 - 3");
        let expected = AstNode::BinaryOp {
            left: Box::new(AstNode::BinaryOp {
                left: Box::new(int(1, 1, 1)),
                op: BinOp::Sub,
                right: Box::new(int(2, 1, 5)),
                location: SourceLocation::new(1, 1),
            }),
            op: BinOp::Sub,
            right: Box::new(int(3, 1, 9)),
            location: SourceLocation::new(1, 1),
        };
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_precedence() {
        let tree = expr("a || b && c == d + e * f");
        assert_eq!(
            Program { body: vec![tree] }.root().outline(),
            "Program
  BinOp('||')
    Id(a)
    BinOp('&&')
      Id(b)
      BinOp('==')
        Id(c)
        BinOp('+')
          Id(d)
          BinOp('*')
            Id(e)
            Id(f)
"
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let AstNode::BinaryOp { op, left, .. } = expr("(1 + 2) * 3") else {
            panic!("Expected binary op");
        };
        assert_eq!(op, BinOp::Mul);
        assert!(matches!(*left, AstNode::BinaryOp { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_call_and_index_chain() {
        let tree = expr("table[i](x, 'c', \"s\")");
        let AstNode::Call { callee, args, location } = tree else {
            panic!("Expected call");
        };
        assert_eq!(location, SourceLocation::new(1, 1));
        assert!(matches!(*callee, AstNode::Index { .. }));
        assert_eq!(args.len(), 3);
        assert!(matches!(args[1], AstNode::CharLit(ref c, _) if c == "'c'"));
        assert!(matches!(args[2], AstNode::TextLit(ref s, _) if s == "\"s\""));
    }

    #[test]
    fn test_float_literal_value() {
        assert!(matches!(expr("2.5"), AstNode::Num(Literal::Float(v), _) if v == 2.5));
    }

    #[test]
    fn test_failed_primary_yields_placeholder() {
        let parsed = parse_source("y = 1 + ;");
        assert_eq!(parsed.errors.len(), 1);
        let AstNode::Assign { value, .. } = &parsed.program.body[0] else {
            panic!("Expected assignment");
        };
        let AstNode::BinaryOp { right, .. } = &**value else {
            panic!("Expected binary op");
        };
        assert_eq!(**right, int(0, 1, 9));
    }
}
