use rust_decimal::Decimal;

use crate::ast::{CompareOp, LogicalOp};

/// Constant appearing directly in source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Decimal),
    Boolean(bool),
    Null,
}

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Trees are built once by the parser and never mutated afterwards. Each node
/// owns its children; both the evaluator and the SQL generator walk the same
/// tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant value
    ///
    /// # Example
    /// ```text
    /// 'abc'
    /// 42
    /// true
    /// null
    /// ```
    Literal(Literal),

    /// Variable resolved through the evaluation context
    ///
    /// # Example
    /// ```text
    /// userId
    /// ```
    Variable(String),

    /// Comparison
    ///
    /// # Example
    /// ```text
    /// id == 1
    /// price >= 100
    /// ```
    BinaryOp {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Logical connective
    ///
    /// # Example
    /// ```text
    /// a == 1 && b == 2
    /// ```
    LogicalOp {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Call of a registered function
    ///
    /// # Example
    /// ```text
    /// like(name, 'J%')
    /// ```
    FunctionCall { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn number(n: impl Into<Decimal>) -> Self {
        Expr::Literal(Literal::Number(n.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Expr::Literal(Literal::Boolean(b))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::LogicalOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::FunctionCall {
            name: name.into(),
            args,
        }
    }
}
