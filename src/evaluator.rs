use std::cmp::Ordering;

use tracing::trace;

use crate::{
    ast::{CompareOp, Expr, LogicalOp},
    context::EvalContext,
    error::EvalError,
    value::Value,
};

/// Evaluates an expression against the bindings in `ctx`.
///
/// Both operands of a comparison or connective are always evaluated, so an
/// error on the right-hand side surfaces even when the left-hand side would
/// decide the result.
///
/// # Examples
///
/// ```
/// use sqlexpr::{evaluate, parse, EvalContext, Value};
///
/// let mut ctx = EvalContext::with_builtins();
/// ctx.set_variable("name", "John Smith");
///
/// let expr = parse("like(name, 'J%') && name != 'Jane'").unwrap();
/// assert_eq!(evaluate(&expr, &ctx).unwrap(), Value::Boolean(true));
/// ```
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(literal) => Ok(Value::from(literal)),
        Expr::Variable(name) => ctx.get_variable(name).cloned(),
        Expr::BinaryOp { op, left, right } => {
            let left_val = evaluate(left, ctx)?;
            let right_val = evaluate(right, ctx)?;
            apply_compare(*op, &left_val, &right_val)
        }
        Expr::LogicalOp { op, left, right } => {
            let left_val = evaluate(left, ctx)?;
            let right_val = evaluate(right, ctx)?;
            apply_logical(*op, &left_val, &right_val)
        }
        Expr::FunctionCall { name, args } => {
            let function = ctx.get_function(name)?;
            let values = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            trace!(function = name.as_str(), args = ?values, "calling function");
            function.evaluate(&values)
        }
    }
}

/// Rejects values that only have meaning inside generated SQL.
fn require_in_memory(value: &Value) -> Result<(), EvalError> {
    match value {
        Value::Column(column) => Err(EvalError::TypeError(format!(
            "column {} has no value outside SQL",
            column.qualified_name()
        ))),
        Value::Parameter(parameter) => Err(EvalError::TypeError(format!(
            "parameter '{}' is only bound when SQL executes",
            parameter.name
        ))),
        _ => Ok(()),
    }
}

fn apply_compare(op: CompareOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    require_in_memory(left)?;
    require_in_memory(right)?;

    match op {
        CompareOp::Equal => Ok(Value::Boolean(left == right)),
        CompareOp::NotEqual => Ok(Value::Boolean(left != right)),
        _ => {
            let ordering = match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.cmp(b),
                (Value::String(a), Value::String(b)) => a.cmp(b),
                (a, b) => {
                    return Err(EvalError::TypeError(format!(
                        "cannot compare {} {} {} (ordering requires two numbers or two strings)",
                        a.kind(),
                        op,
                        b.kind()
                    )));
                }
            };
            let result = match op {
                CompareOp::LessThan => ordering == Ordering::Less,
                CompareOp::GreaterThan => ordering == Ordering::Greater,
                CompareOp::LessEqual => ordering != Ordering::Greater,
                CompareOp::GreaterEqual => ordering != Ordering::Less,
                CompareOp::Equal | CompareOp::NotEqual => unreachable!("handled above"),
            };
            Ok(Value::Boolean(result))
        }
    }
}

fn apply_logical(op: LogicalOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left.as_bool(), right.as_bool()) {
        (Some(a), Some(b)) => Ok(Value::Boolean(match op {
            LogicalOp::And => a && b,
            LogicalOp::Or => a || b,
        })),
        _ => Err(EvalError::TypeError(format!(
            "cannot apply {} to {} and {} (requires booleans)",
            op,
            left.kind(),
            right.kind()
        ))),
    }
}
