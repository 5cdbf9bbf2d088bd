use crate::{
    ast::Expr,
    context::EvalContext,
    error::EvalError,
    functions::{Function, check_arity, pattern::like_matches, string_arg},
    sql::SqlOperand,
    value::Value,
};

/// `like(value, pattern)`: SQL LIKE with `%` and `_` wildcards.
///
/// The pattern is already in LIKE syntax, so SQL generation passes it through
/// without touching wildcards.
#[derive(Debug, Clone, Copy, Default)]
pub struct Like;

impl Function for Like {
    fn name(&self) -> &'static str {
        "like"
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value, EvalError> {
        check_arity(self.name(), args.len(), 2)?;
        let text = string_arg(self.name(), 1, &args[0])?;
        let pattern = string_arg(self.name(), 2, &args[1])?;

        like_matches(text, pattern).map(Value::Boolean)
    }

    fn to_sql(&self, args: &[Expr], ctx: &mut EvalContext) -> Result<String, EvalError> {
        check_arity(self.name(), args.len(), 2)?;

        let column = match SqlOperand::resolve(&args[0], ctx)? {
            SqlOperand::Column(column) => column,
            other => {
                return Err(EvalError::invalid_argument(
                    self.name(),
                    1,
                    format!("expected column reference, got {}", other.kind()),
                ));
            }
        };

        let pattern = SqlOperand::resolve(&args[1], ctx)?;
        match &pattern {
            SqlOperand::Literal(Value::String(_))
            | SqlOperand::Parameter(_)
            | SqlOperand::Column(_) => {}
            SqlOperand::Literal(other) => {
                return Err(EvalError::invalid_argument(
                    self.name(),
                    2,
                    format!("expected string pattern, got {}", other.kind()),
                ));
            }
            SqlOperand::Fragment(_) => {
                return Err(EvalError::unsupported(
                    "like()",
                    "pattern must be a string literal, a parameter or a column",
                ));
            }
        }

        Ok(format!(
            "({} LIKE {})",
            column.qualified_name(),
            pattern.render(ctx.dialect())
        ))
    }
}
