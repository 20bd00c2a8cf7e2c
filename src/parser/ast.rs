// AST (Abstract Syntax Tree) definitions for the toy-C front end

use super::token::{Literal, TokenKind};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Types a declaration or function may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Float,
    Char,
    Double,
    Void,
    Str,
}

impl BaseType {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(BaseType::Int),
            TokenKind::Float => Some(BaseType::Float),
            TokenKind::Char => Some(BaseType::Char),
            TokenKind::Double => Some(BaseType::Double),
            TokenKind::Void => Some(BaseType::Void),
            TokenKind::Str => Some(BaseType::Str),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Int => "int",
            BaseType::Float => "float",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Void => "void",
            BaseType::Str => "string",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A variable reference
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub name: String,
    pub location: SourceLocation,
}

/// `{ ... }` statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<AstNode>,
    pub location: SourceLocation,
}

/// Variable declaration; also used for function parameters
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var_type: BaseType,
    pub name: Var,
    pub init: Option<Box<AstNode>>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub return_type: BaseType,
    pub name: String,
    pub params: Vec<VarDecl>,
    pub body: Block,
    pub location: SourceLocation,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Top-level declarations
    FunctionDef(FunctionDef),

    // Statements
    Block(Block),
    VarDecl(VarDecl),
    Assign {
        target: Var,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    If {
        test: Box<AstNode>,
        then: Box<AstNode>,
        otherwise: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    While {
        test: Box<AstNode>,
        body: Box<AstNode>,
        location: SourceLocation,
    },
    Return {
        value: Option<Box<AstNode>>,
        location: SourceLocation,
    },

    // Expressions
    Call {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    Index {
        target: Box<AstNode>,
        index: Box<AstNode>,
        location: SourceLocation,
    },
    BinaryOp {
        left: Box<AstNode>,
        op: BinOp,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    Var(Var),
    Num(Literal, SourceLocation),
    /// Raw lexeme, quotes and escapes included
    TextLit(String, SourceLocation),
    CharLit(String, SourceLocation),
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::FunctionDef(func) => func.location,
            AstNode::Block(block) => block.location,
            AstNode::VarDecl(decl) => decl.location,
            AstNode::Assign { location, .. }
            | AstNode::If { location, .. }
            | AstNode::While { location, .. }
            | AstNode::Return { location, .. }
            | AstNode::Call { location, .. }
            | AstNode::Index { location, .. }
            | AstNode::BinaryOp { location, .. } => *location,
            AstNode::Var(var) => var.location,
            AstNode::Num(_, loc) | AstNode::TextLit(_, loc) | AstNode::CharLit(_, loc) => *loc,
        }
    }
}

/// Root of every parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::Program(self)
    }
}

/// Borrowed view over any node of the tree.
///
/// Some nodes are stored as dedicated structs rather than [`AstNode`]
/// variants (a function's parameters and body, a declaration's name), so tree
/// walkers go through this view to see them all uniformly.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Node(&'a AstNode),
    Block(&'a Block),
    VarDecl(&'a VarDecl),
    Var(&'a Var),
}

impl<'a> NodeRef<'a> {
    /// Short human-readable label
    pub fn label(&self) -> String {
        match *self {
            NodeRef::Program(_) => "Program".to_string(),
            NodeRef::Block(_) => "Block".to_string(),
            NodeRef::VarDecl(decl) => format!("Decl({})", decl.var_type),
            NodeRef::Var(var) => format!("Id({})", var.name),
            NodeRef::Node(node) => match node {
                AstNode::FunctionDef(func) => format!("Func({})", func.name),
                AstNode::Block(_) => "Block".to_string(),
                AstNode::VarDecl(decl) => format!("Decl({})", decl.var_type),
                AstNode::Assign { .. } => "Assign".to_string(),
                AstNode::If { .. } => "If".to_string(),
                AstNode::While { .. } => "While".to_string(),
                AstNode::Return { .. } => "Return".to_string(),
                AstNode::Call { .. } => "Call".to_string(),
                AstNode::Index { .. } => "Index".to_string(),
                AstNode::BinaryOp { op, .. } => format!("BinOp('{}')", op),
                AstNode::Var(var) => format!("Id({})", var.name),
                AstNode::Num(value, _) => format!("Num({})", value),
                AstNode::TextLit(..) => "Text".to_string(),
                AstNode::CharLit(..) => "Char".to_string(),
            },
        }
    }

    /// Direct children, in source order
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Program(program) => program.body.iter().map(NodeRef::Node).collect(),
            NodeRef::Block(block) => block.body.iter().map(NodeRef::Node).collect(),
            NodeRef::VarDecl(decl) => decl_children(decl),
            NodeRef::Var(_) => Vec::new(),
            NodeRef::Node(node) => match node {
                AstNode::FunctionDef(func) => func
                    .params
                    .iter()
                    .map(NodeRef::VarDecl)
                    .chain(std::iter::once(NodeRef::Block(&func.body)))
                    .collect(),
                AstNode::Block(block) => block.body.iter().map(NodeRef::Node).collect(),
                AstNode::VarDecl(decl) => decl_children(decl),
                AstNode::Assign { target, value, .. } => {
                    vec![NodeRef::Var(target), NodeRef::Node(value)]
                }
                AstNode::If {
                    test,
                    then,
                    otherwise,
                    ..
                } => {
                    let mut children = vec![NodeRef::Node(test), NodeRef::Node(then)];
                    if let Some(otherwise) = otherwise {
                        children.push(NodeRef::Node(otherwise));
                    }
                    children
                }
                AstNode::While { test, body, .. } => {
                    vec![NodeRef::Node(test), NodeRef::Node(body)]
                }
                AstNode::Return { value, .. } => {
                    value.iter().map(|v| NodeRef::Node(v)).collect()
                }
                AstNode::Call { callee, args, .. } => std::iter::once(NodeRef::Node(callee))
                    .chain(args.iter().map(NodeRef::Node))
                    .collect(),
                AstNode::Index { target, index, .. } => {
                    vec![NodeRef::Node(target), NodeRef::Node(index)]
                }
                AstNode::BinaryOp { left, right, .. } => {
                    vec![NodeRef::Node(left), NodeRef::Node(right)]
                }
                AstNode::Var(_)
                | AstNode::Num(..)
                | AstNode::TextLit(..)
                | AstNode::CharLit(..) => Vec::new(),
            },
        }
    }

    /// Indented text rendering of the subtree, two spaces per level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.label());
        out.push('\n');
        for child in self.children() {
            child.write_outline(depth + 1, out);
        }
    }
}

fn decl_children(decl: &VarDecl) -> Vec<NodeRef<'_>> {
    let mut children = vec![NodeRef::Var(&decl.name)];
    if let Some(init) = &decl.init {
        children.push(NodeRef::Node(init));
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    fn num(n: i64) -> AstNode {
        AstNode::Num(Literal::Int(n), loc())
    }

    #[test]
    fn test_labels() {
        let bin = AstNode::BinaryOp {
            left: Box::new(num(1)),
            op: BinOp::Sub,
            right: Box::new(num(2)),
            location: loc(),
        };
        assert_eq!(NodeRef::Node(&bin).label(), "BinOp('-')");
        assert_eq!(NodeRef::Node(&num(0)).label(), "Num(0)");
        assert_eq!(
            NodeRef::Node(&AstNode::Num(Literal::Float(2.5), loc())).label(),
            "Num(2.5)"
        );
        assert_eq!(
            NodeRef::Node(&AstNode::TextLit("\"hi\"".into(), loc())).label(),
            "Text"
        );
    }

    #[test]
    fn test_function_children_are_params_then_body() {
        let param = VarDecl {
            var_type: BaseType::Int,
            name: Var {
                name: "a".into(),
                location: loc(),
            },
            init: None,
            location: loc(),
        };
        let func = AstNode::FunctionDef(FunctionDef {
            return_type: BaseType::Int,
            name: "id".into(),
            params: vec![param],
            body: Block {
                body: vec![AstNode::Return {
                    value: Some(Box::new(num(0))),
                    location: loc(),
                }],
                location: loc(),
            },
            location: loc(),
        });

        let labels: Vec<String> = NodeRef::Node(&func)
            .children()
            .iter()
            .map(NodeRef::label)
            .collect();
        assert_eq!(labels, vec!["Decl(int)", "Block"]);
    }

    #[test]
    fn test_outline() {
        let program = Program {
            body: vec![AstNode::Assign {
                target: Var {
                    name: "x".into(),
                    location: loc(),
                },
                value: Box::new(num(5)),
                location: loc(),
            }],
        };
        assert_eq!(program.root().outline(), "Program\n  Assign\n    Id(x)\n    Num(5)\n");
    }
}
