pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod script;
pub mod sql;
pub mod value;

pub use ast::{CompareOp, Expr, Literal, LogicalOp, Token};
pub use context::{Dialect, EvalContext};
pub use error::{Error, EvalError, LexError, ParseError, Result, ScriptError};
pub use evaluator::evaluate;
pub use functions::{Function, FunctionRegistry};
pub use lexer::{Lexer, Position};
pub use parser::{Parser, parse};
pub use script::parse_statements;
pub use sql::{SqlQuery, generate};
pub use value::{ColumnRef, PositionalParameterRef, Value};
