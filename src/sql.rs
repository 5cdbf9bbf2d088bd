//! # SQL generation
//!
//! Compiles an expression tree into SQL text plus the ordered list of bound
//! parameter names. Variables resolve through the [`EvalContext`]:
//!
//! - a [`ColumnRef`] becomes the qualified column name `table.column`
//! - a [`PositionalParameterRef`](crate::value::PositionalParameterRef)
//!   becomes `?` and its name is appended to the parameter list
//! - any other value is rendered as a literal
//!
//! Every comparison and connective is parenthesized, so the generated text
//! never depends on the target's operator precedence. Equality against a
//! null constant becomes `IS NULL` / `IS NOT NULL`.
//!
//! ```
//! use sqlexpr::{parse, sql::generate, ColumnRef, EvalContext, PositionalParameterRef};
//!
//! let mut ctx = EvalContext::with_builtins();
//! ctx.set_variable("id", ColumnRef::new("SOMETABLE", "lngId"));
//! ctx.set_variable("userId", PositionalParameterRef::new("userId"));
//!
//! let query = generate(&parse("id == userId").unwrap(), &mut ctx).unwrap();
//! assert_eq!(query.sql, "(SOMETABLE.lngId = ?)");
//! assert_eq!(query.parameters, vec!["userId"]);
//! ```

use tracing::{debug, trace};

use crate::{
    ast::{CompareOp, Expr, Literal},
    context::{Dialect, EvalContext},
    error::EvalError,
    value::{ColumnRef, Value},
};

/// Generated SQL and the parameter names to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    pub sql: String,
    pub parameters: Vec<String>,
}

/// Function argument after variable resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOperand {
    /// Variable bound to a column
    Column(ColumnRef),
    /// Source literal or variable bound to a constant
    Literal(Value),
    /// Variable bound to a positional parameter; already recorded in the
    /// context's parameter list
    Parameter(String),
    /// Any other sub-expression, already rendered
    Fragment(String),
}

impl SqlOperand {
    /// Resolves `expr` for use as a function argument.
    ///
    /// Parameters are recorded when resolved, so arguments must be resolved in
    /// the order they are emitted.
    pub fn resolve(expr: &Expr, ctx: &mut EvalContext) -> Result<Self, EvalError> {
        match expr {
            Expr::Literal(literal) => Ok(SqlOperand::Literal(Value::from(literal))),
            Expr::Variable(name) => match ctx.get_variable(name)?.clone() {
                Value::Column(column) => Ok(SqlOperand::Column(column)),
                Value::Parameter(parameter) => {
                    ctx.push_parameter(parameter.name.clone());
                    Ok(SqlOperand::Parameter(parameter.name))
                }
                constant => Ok(SqlOperand::Literal(constant)),
            },
            _ => generate_expr(expr, ctx).map(SqlOperand::Fragment),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SqlOperand::Column(_) => "column",
            SqlOperand::Literal(value) => value.kind(),
            SqlOperand::Parameter(_) => "parameter",
            SqlOperand::Fragment(_) => "expression",
        }
    }

    pub fn render(&self, dialect: Dialect) -> String {
        match self {
            SqlOperand::Column(column) => column.qualified_name(),
            SqlOperand::Literal(value) => render_literal(value, dialect),
            SqlOperand::Parameter(_) => "?".to_string(),
            SqlOperand::Fragment(sql) => sql.clone(),
        }
    }
}

/// Renders a constant as SQL literal text.
pub fn render_literal(value: &Value, dialect: Dialect) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => dialect.boolean_literal(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => dialect.quote_string(s),
        Value::Column(column) => column.qualified_name(),
        Value::Parameter(_) => "?".to_string(),
    }
}

/// Compiles `expr` to SQL.
///
/// On failure the context's parameter list is restored to its length before
/// the call, so nothing from a failed translation leaks into the next one.
pub fn generate(expr: &Expr, ctx: &mut EvalContext) -> Result<SqlQuery, EvalError> {
    let mark = ctx.parameters().len();

    match generate_expr(expr, ctx) {
        Ok(sql) => {
            let parameters = ctx.parameters()[mark..].to_vec();
            debug!(sql = %sql, parameters = ?parameters, "generated SQL");
            Ok(SqlQuery { sql, parameters })
        }
        Err(e) => {
            ctx.truncate_parameters(mark);
            debug!(error = %e, "SQL generation failed");
            Err(e)
        }
    }
}

/// Compiles `expr` without the rollback of [`generate`]. Functions call this
/// for nested sub-expressions.
pub fn generate_expr(expr: &Expr, ctx: &mut EvalContext) -> Result<String, EvalError> {
    match expr {
        Expr::Literal(_) | Expr::Variable(_) => {
            let operand = SqlOperand::resolve(expr, ctx)?;
            Ok(operand.render(ctx.dialect()))
        }
        Expr::BinaryOp { op, left, right } => generate_comparison(*op, left, right, ctx),
        Expr::LogicalOp { op, left, right } => {
            let left = generate_expr(left, ctx)?;
            let right = generate_expr(right, ctx)?;
            Ok(format!("({} {} {})", left, op.sql(), right))
        }
        Expr::FunctionCall { name, args } => {
            let function = ctx.get_function(name)?;
            trace!(function = name.as_str(), args = args.len(), "translating call");
            function.to_sql(args, ctx)
        }
    }
}

/// True when `expr` is the `null` literal or a variable bound to null.
fn is_null_constant(expr: &Expr, ctx: &EvalContext) -> Result<bool, EvalError> {
    match expr {
        Expr::Literal(Literal::Null) => Ok(true),
        Expr::Variable(name) => Ok(ctx.get_variable(name)?.is_null()),
        _ => Ok(false),
    }
}

fn generate_comparison(
    op: CompareOp,
    left: &Expr,
    right: &Expr,
    ctx: &mut EvalContext,
) -> Result<String, EvalError> {
    let left_null = is_null_constant(left, ctx)?;
    let right_null = is_null_constant(right, ctx)?;

    if !left_null && !right_null {
        let left = generate_expr(left, ctx)?;
        let right = generate_expr(right, ctx)?;
        return Ok(format!("({} {} {})", left, op.sql(), right));
    }

    let test = match op {
        CompareOp::Equal => "IS NULL",
        CompareOp::NotEqual => "IS NOT NULL",
        _ => {
            let kind = |is_null: bool| if is_null { "null" } else { "value" };
            return Err(EvalError::TypeError(format!(
                "cannot compare {} {} {} (ordering requires two numbers or two strings)",
                kind(left_null),
                op,
                kind(right_null)
            )));
        }
    };

    let other = if left_null { right } else { left };
    let other = generate_expr(other, ctx)?;
    Ok(format!("({} {})", other, test))
}
