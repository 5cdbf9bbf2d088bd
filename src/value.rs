use std::fmt;

use rust_decimal::Decimal;

use crate::ast::Literal;

/// Reference to a column of a table.
///
/// Binding a variable to a `ColumnRef` marks it as row-derived: the SQL
/// generator emits the qualified column name instead of a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub name: String,
    pub table: String,
    /// Column type as reported by the schema, e.g. `INTEGER`.
    pub sql_type: Option<String>,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        ColumnRef {
            name: name.into(),
            table: table.into(),
            sql_type: None,
        }
    }

    pub fn with_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    /// `table.column`, or the bare column name when no table is known.
    pub fn qualified_name(&self) -> String {
        if self.table.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.table, self.name)
        }
    }
}

/// Named placeholder bound positionally when the statement executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalParameterRef {
    pub name: String,
}

impl PositionalParameterRef {
    pub fn new(name: impl Into<String>) -> Self {
        PositionalParameterRef { name: name.into() }
    }
}

/// A value bound to a variable or produced by evaluation.
///
/// # Examples
///
/// ```
/// use sqlexpr::{ColumnRef, Value};
///
/// let constant = Value::from("something");
/// let column = Value::Column(ColumnRef::new("SOMETABLE", "lngId"));
/// assert_eq!(constant.kind(), "string");
/// assert_eq!(column.kind(), "column");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,

    Boolean(bool),

    /// Exact decimal number
    Number(Decimal),

    String(String),

    /// Row-derived value
    Column(ColumnRef),

    /// Value supplied later through a bound parameter
    Parameter(PositionalParameterRef),
}

impl Value {
    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Column(_) => "column",
            Value::Parameter(_) => "parameter",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => Value::Number(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Null => Value::Null,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<ColumnRef> for Value {
    fn from(column: ColumnRef) -> Self {
        Value::Column(column)
    }
}

impl From<PositionalParameterRef> for Value {
    fn from(parameter: PositionalParameterRef) -> Self {
        Value::Parameter(parameter)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Column(c) => write!(f, "column {}", c.qualified_name()),
            Value::Parameter(p) => write!(f, "parameter {}", p.name),
        }
    }
}
