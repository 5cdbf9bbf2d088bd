//! # Functions
//!
//! Named operations callable from expressions. Every function works in both
//! modes: [`Function::evaluate`] computes a value in memory and
//! [`Function::to_sql`] emits an equivalent SQL fragment.
//!
//! - **[like]** - `like(value, pattern)` with SQL `%`/`_` wildcards
//! - **[affix]** - `startsWith`, `endsWith`, `contains`
//! - **[pattern]** - LIKE pattern escaping and LIKE-to-regex translation
//!
//! Each builtin checks arity and argument kinds before doing anything else.
//! In SQL mode the first argument must be bound to a column; the second may be
//! a literal and, where the function allows it, a bound parameter.
pub mod affix;
pub mod like;
pub mod pattern;

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{ast::Expr, context::EvalContext, error::EvalError, value::Value};

pub use affix::{Contains, EndsWith, StartsWith};
pub use like::Like;

/// Dual-mode operation held in a [`FunctionRegistry`].
pub trait Function: Send + Sync {
    /// Name the function is registered and called under.
    fn name(&self) -> &'static str;

    /// Interpreter mode: arguments are already evaluated.
    fn evaluate(&self, args: &[Value]) -> Result<Value, EvalError>;

    /// Compiler mode: arguments are unevaluated so that the function can tell
    /// columns, constants and parameters apart.
    fn to_sql(&self, args: &[Expr], ctx: &mut EvalContext) -> Result<String, EvalError>;
}

/// Name to implementation mapping.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `like`, `startsWith`, `endsWith` and `contains`.
    pub fn builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Like);
        registry.register(StartsWith);
        registry.register(EndsWith);
        registry.register(Contains);
        registry
    }

    /// Adds `function`, replacing any previous function of the same name.
    pub fn register(&mut self, function: impl Function + 'static) {
        self.functions
            .insert(function.name().to_string(), Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

pub(crate) fn check_arity(function: &str, found: usize, expected: usize) -> Result<(), EvalError> {
    if found != expected {
        return Err(EvalError::Arity {
            function: function.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Non-null string argument. `index` is 1-based.
pub(crate) fn string_arg<'v>(
    function: &str,
    index: usize,
    value: &'v Value,
) -> Result<&'v str, EvalError> {
    match value.as_str() {
        Some(s) => Ok(s),
        None if value.is_null() => {
            Err(EvalError::invalid_argument(function, index, "must not be null"))
        }
        None => Err(EvalError::invalid_argument(
            function,
            index,
            format!("expected string, got {}", value.kind()),
        )),
    }
}
