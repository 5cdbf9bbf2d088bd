//! Validate or evaluate expressions in memory

use super::{CliError, build_context};
use crate::{Dialect, evaluate, output::value_to_json, parse};

/// Options for the eval and check commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression source
    pub expression: String,
    /// JSON object of variable bindings
    pub bindings: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated to this JSON value
    Success(serde_json::Value),
}

/// Parse and optionally evaluate an expression.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse(&options.expression)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let ctx = build_context(options.bindings.as_deref(), Dialect::default())?;
    let value = evaluate(&expr, &ctx)?;
    Ok(CheckResult::Success(value_to_json(&value)))
}
