use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use crate::{
    error::EvalError,
    functions::{Function, FunctionRegistry},
    value::Value,
};

/// SQL flavour targeted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Ansi,
    Postgres,
    MySql,
    Sqlite,
    SqlServer,
}

impl Dialect {
    pub fn boolean_literal(&self, b: bool) -> &'static str {
        match (self, b) {
            (Dialect::Sqlite | Dialect::SqlServer, true) => "1",
            (Dialect::Sqlite | Dialect::SqlServer, false) => "0",
            (_, true) => "TRUE",
            (_, false) => "FALSE",
        }
    }

    /// Quotes `s` as a string literal. Single quotes are doubled everywhere;
    /// MySQL also reads backslash escapes inside literals, so backslashes are
    /// doubled there too.
    pub fn quote_string(&self, s: &str) -> String {
        let escaped = match self {
            Dialect::MySql => s.replace('\\', "\\\\").replace('\'', "''"),
            _ => s.replace('\'', "''"),
        };
        format!("'{}'", escaped)
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" | "generic" => Ok(Dialect::Ansi),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

/// Per-request bindings for evaluation and SQL generation.
///
/// Holds variable values, the function registry, the dialect and the list of
/// parameter names emitted so far. A context belongs to exactly one
/// translation; build a fresh one for every request.
#[derive(Default)]
pub struct EvalContext {
    variables: HashMap<String, Value>,
    functions: FunctionRegistry,
    parameters: Vec<String>,
    dialect: Dialect,
}

impl EvalContext {
    /// Empty context with no variables and no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty context with the builtin functions registered.
    pub fn with_builtins() -> Self {
        Self::new().with_functions(FunctionRegistry::builtins())
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn get_variable(&self, name: &str) -> Result<&Value, EvalError> {
        self.variables
            .get(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    /// Replaces the function registry.
    pub fn set_functions(&mut self, functions: FunctionRegistry) {
        self.functions = functions;
    }

    pub fn get_function(&self, name: &str) -> Result<Arc<dyn Function>, EvalError> {
        self.functions
            .get(name)
            .ok_or_else(|| EvalError::UnknownFunction(name.to_string()))
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    /// Records a bound parameter in emission order.
    pub fn push_parameter(&mut self, name: impl Into<String>) {
        self.parameters.push(name.into());
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn take_parameters(&mut self) -> Vec<String> {
        std::mem::take(&mut self.parameters)
    }

    pub(crate) fn truncate_parameters(&mut self, len: usize) {
        self.parameters.truncate(len);
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("variables", &self.variables)
            .field("functions", &self.functions.names())
            .field("parameters", &self.parameters)
            .field("dialect", &self.dialect)
            .finish()
    }
}
