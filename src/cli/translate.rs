//! Compile expressions to SQL

use super::{CliError, build_context};
use crate::{Dialect, output::query_to_json, parse, sql::generate};

/// Options for the sql command
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub expression: String,
    pub bindings: Option<String>,
    pub dialect: Dialect,
}

/// Returns `{"sql": .., "parameters": [..]}`.
pub fn execute_translate(options: &TranslateOptions) -> Result<serde_json::Value, CliError> {
    let expr = parse(&options.expression)?;
    let mut ctx = build_context(options.bindings.as_deref(), options.dialect)?;
    let query = generate(&expr, &mut ctx)?;
    Ok(query_to_json(&query))
}
