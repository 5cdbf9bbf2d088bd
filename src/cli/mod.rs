//! CLI support for sqlexpr
//!
//! Provides programmatic access to the command-line operations so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod convert;
mod split;
mod translate;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{apply_bindings, json_to_value};
pub use split::{SplitOptions, execute_split};
pub use translate::{TranslateOptions, execute_translate};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Syntax error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("Script error: {0}")]
    Script(#[from] crate::ScriptError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid binding '{name}': {message}")]
    InvalidBinding { name: String, message: String },

    #[error("No input provided. Pass a file or pipe the script to stdin.")]
    NoInput,
}

/// Builds a context with the builtins, `dialect` and the JSON `bindings`.
fn build_context(
    bindings: Option<&str>,
    dialect: crate::Dialect,
) -> Result<crate::EvalContext, CliError> {
    let mut ctx = crate::EvalContext::with_builtins().with_dialect(dialect);
    if let Some(json) = bindings {
        apply_bindings(&mut ctx, json)?;
    }
    Ok(ctx)
}
