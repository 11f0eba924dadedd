//! Syntax tree produced by the parser.
//!
//! Expressions are deliberately flat: an [`Operation`] is a sequence of
//! operands joined by operators, kept in source order with no precedence
//! applied. The code generator emits them verbatim, so evaluation order is
//! whatever the target language gives the same sequence.

use serde::{Deserialize, Serialize};

use crate::token::{Span, TokenKind};
use crate::types::{ReturnType, VarType};

/// A whole source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Module-level function definitions, in source order.
    pub functions: Vec<Function>,
    /// Module-level statements, in source order.
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: ReturnType,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: VarType,
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    /// `x = expr` or `x: int = expr`
    Assign {
        target: String,
        /// Annotation written on the assignment itself, if any.
        annotation: Option<VarType>,
        value: Expr,
        span: Span,
    },
    /// `x: int` with no value
    Declare { name: String, ty: VarType, span: Span },
    /// `return` with an optional value
    Return { value: Option<Expr>, span: Span },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    If(IfStmt),
    Print { args: Vec<Expr>, span: Span },
    /// A call evaluated for its side effects.
    Call(Call),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::Declare { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Print { span, .. } => *span,
            Stmt::If(stmt) => stmt.span,
            Stmt::Call(call) => call.span,
        }
    }
}

/// `if` with its `elif` arms and optional `else`, kept flat so chains of any
/// length are walked without recursion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    /// The `if` arm followed by each `elif` in source order; never empty.
    pub arms: Vec<CondBlock>,
    pub else_block: Option<Vec<Stmt>>,
    pub span: Span,
}

/// One guarded block of an `if` chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondBlock {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    /// Position of the `if` or `elif` keyword.
    pub span: Span,
}

/// Expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Call(Call),
    Operation(Operation),
}

impl Expr {
    /// Convenience for a single operand expression.
    pub fn operand(operand: Operand) -> Self {
        Expr::Operation(Operation {
            negated: false,
            first: operand,
            rest: Vec::new(),
        })
    }
}

/// `name(arg, ...)`. Arguments are restricted to plain operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    pub args: Vec<Operand>,
    pub span: Span,
}

/// `[not] operand {op operand}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub negated: bool,
    pub first: Operand,
    pub rest: Vec<(BinaryOp, Operand)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Ident(String),
    Literal(Literal),
}

impl Operand {
    pub fn ident(name: impl Into<String>) -> Self {
        Operand::Ident(name.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Binary operators, arithmetic, logical and comparison alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Multiply => BinaryOp::Mul,
            TokenKind::Divide => BinaryOp::Div,
            TokenKind::Modulo => BinaryOp::Mod,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            TokenKind::IsEqual => BinaryOp::Eq,
            TokenKind::IsNotEqual => BinaryOp::Ne,
            TokenKind::IsLess => BinaryOp::Lt,
            TokenKind::IsEqualLess => BinaryOp::Le,
            TokenKind::IsMore => BinaryOp::Gt,
            TokenKind::IsEqualMore => BinaryOp::Ge,
            _ => return None,
        };
        Some(op)
    }

    /// C++ spelling of the operator.
    pub const fn cpp_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    /// Source spelling of the operator.
    pub const fn source_str(self) -> &'static str {
        match self {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            other => other.cpp_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_spellings() {
        assert_eq!(BinaryOp::from_token(TokenKind::IsEqualMore), Some(BinaryOp::Ge));
        assert_eq!(BinaryOp::Ge.cpp_str(), ">=");
        assert_eq!(BinaryOp::And.cpp_str(), "&&");
        assert_eq!(BinaryOp::And.source_str(), "and");
        assert_eq!(BinaryOp::Mod.source_str(), "%");
        assert_eq!(BinaryOp::from_token(TokenKind::Equals), None);
    }

    #[test]
    fn stmt_span() {
        let stmt = Stmt::Declare {
            name: "x".into(),
            ty: VarType::Int,
            span: Span::new(3, 1),
        };
        assert_eq!(stmt.span(), Span::new(3, 1));
        assert!(Program::default().is_empty());
    }

    #[test]
    fn statements_serialize_with_tag() {
        let stmt = Stmt::Return {
            value: Some(Expr::operand(Operand::Literal(Literal::Int(1)))),
            span: Span::new(2, 5),
        };
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["stmt"], "return");
        assert_eq!(json["span"]["line"], 2);
        assert_eq!(json["value"]["operation"]["first"]["literal"]["int"], 1);
    }
}
