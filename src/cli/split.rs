//! Split SQL scripts into statements

use super::CliError;
use crate::script::parse_statements;

/// Options for the split command
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Raw script text
    pub script: Option<String>,
    /// Keep comments in the emitted statements
    pub keep_comments: bool,
}

pub fn execute_split(options: &SplitOptions) -> Result<Vec<String>, CliError> {
    let script = options.script.as_ref().ok_or(CliError::NoInput)?;
    Ok(parse_statements(script, options.keep_comments)?)
}
