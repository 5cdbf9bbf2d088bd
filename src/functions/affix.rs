//! Substring tests compiled to LIKE with a wildcard on one or both sides.
//!
//! The text argument is escaped with [`escape_like`] before the wildcard is
//! attached, so `%` or `_` in the text matches literally. The escape
//! character is named in an `ESCAPE` clause since ANSI SQL, SQLite and SQL
//! Server have no default one.

use crate::{
    ast::Expr,
    context::EvalContext,
    error::EvalError,
    functions::{
        Function, check_arity,
        pattern::{LIKE_ESCAPE, escape_like},
        string_arg,
    },
    sql::SqlOperand,
    value::{ColumnRef, Value},
};

/// Where the wildcard goes around the escaped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Prefix,
    Suffix,
    Infix,
}

impl Anchor {
    fn pattern(self, text: &str) -> String {
        let escaped = escape_like(text);
        match self {
            Anchor::Prefix => format!("{}%", escaped),
            Anchor::Suffix => format!("%{}", escaped),
            Anchor::Infix => format!("%{}%", escaped),
        }
    }
}

/// Shared `to_sql`: column first argument, literal string second argument.
/// Emits `(col LIKE '<pattern>' ESCAPE '\')`.
fn affix_sql(
    name: &str,
    anchor: Anchor,
    args: &[Expr],
    ctx: &mut EvalContext,
) -> Result<String, EvalError> {
    check_arity(name, args.len(), 2)?;

    let column = column_arg(name, SqlOperand::resolve(&args[0], ctx)?)?;

    let text = match SqlOperand::resolve(&args[1], ctx)? {
        SqlOperand::Literal(Value::String(s)) => s,
        SqlOperand::Literal(other) => {
            return Err(EvalError::invalid_argument(
                name,
                2,
                format!("expected string, got {}", other.kind()),
            ));
        }
        other => {
            return Err(EvalError::unsupported(
                format!("{}()", name),
                format!(
                    "argument 2 must be a string literal to build a LIKE pattern, got {}",
                    other.kind()
                ),
            ));
        }
    };

    let dialect = ctx.dialect();
    Ok(format!(
        "({} LIKE {} ESCAPE {})",
        column.qualified_name(),
        dialect.quote_string(&anchor.pattern(&text)),
        dialect.quote_string(&LIKE_ESCAPE.to_string())
    ))
}

fn column_arg(name: &str, operand: SqlOperand) -> Result<ColumnRef, EvalError> {
    match operand {
        SqlOperand::Column(column) => Ok(column),
        other => Err(EvalError::invalid_argument(
            name,
            1,
            format!("expected column reference, got {}", other.kind()),
        )),
    }
}

/// `startsWith(value, prefix)`
///
/// In memory the value may also be a column reference, in which case the
/// column's name is tested.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartsWith;

impl Function for StartsWith {
    fn name(&self) -> &'static str {
        "startsWith"
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value, EvalError> {
        check_arity(self.name(), args.len(), 2)?;
        let text = match &args[0] {
            Value::Column(column) => column.name.as_str(),
            other => string_arg(self.name(), 1, other)?,
        };
        let prefix = string_arg(self.name(), 2, &args[1])?;

        Ok(Value::Boolean(text.starts_with(prefix)))
    }

    fn to_sql(&self, args: &[Expr], ctx: &mut EvalContext) -> Result<String, EvalError> {
        affix_sql(self.name(), Anchor::Prefix, args, ctx)
    }
}

/// `endsWith(value, suffix)`
#[derive(Debug, Clone, Copy, Default)]
pub struct EndsWith;

impl Function for EndsWith {
    fn name(&self) -> &'static str {
        "endsWith"
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value, EvalError> {
        check_arity(self.name(), args.len(), 2)?;
        let text = string_arg(self.name(), 1, &args[0])?;
        let suffix = string_arg(self.name(), 2, &args[1])?;

        Ok(Value::Boolean(text.ends_with(suffix)))
    }

    fn to_sql(&self, args: &[Expr], ctx: &mut EvalContext) -> Result<String, EvalError> {
        affix_sql(self.name(), Anchor::Suffix, args, ctx)
    }
}

/// `contains(value, substring)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Contains;

impl Function for Contains {
    fn name(&self) -> &'static str {
        "contains"
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value, EvalError> {
        check_arity(self.name(), args.len(), 2)?;
        let text = string_arg(self.name(), 1, &args[0])?;
        let needle = string_arg(self.name(), 2, &args[1])?;

        Ok(Value::Boolean(text.contains(needle)))
    }

    fn to_sql(&self, args: &[Expr], ctx: &mut EvalContext) -> Result<String, EvalError> {
        affix_sql(self.name(), Anchor::Infix, args, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_escape_before_adding_wildcards() {
        assert_eq!(Anchor::Prefix.pattern("a_b"), r"a\_b%");
        assert_eq!(Anchor::Suffix.pattern("%"), r"%\%");
        assert_eq!(Anchor::Infix.pattern(r"x\y"), r"%x\\y%");
    }

    #[test]
    fn starts_with_accepts_column_name_in_memory() {
        let column = Value::Column(ColumnRef::new("T", "strName"));
        assert_eq!(
            StartsWith.evaluate(&[column, Value::from("str")]),
            Ok(Value::Boolean(true))
        );
    }
}
