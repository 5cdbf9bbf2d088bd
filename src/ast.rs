//! # Abstract Syntax Tree
//!
//! Syntax tree for the filter expression language. The same tree is either
//! interpreted against in-memory values ([`crate::evaluator`]) or compiled to
//! parameterized SQL ([`crate::sql`]).
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, variables, operators, calls)
//! - **[operators]** - Comparison and logical operators
//!
//! ## Grammar
//!
//! ```text
//! expr       := or
//! or         := and ( "||" and )*
//! and        := comparison ( "&&" comparison )*
//! comparison := primary ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" ) primary )?
//! primary    := literal | identifier | identifier "(" args? ")" | "(" expr ")"
//! args       := expr ( "," expr )*
//! literal    := string | number | "true" | "false" | "null"
//! ```
//!
//! ## Examples
//!
//! ```text
//! id == 1 && val > 2
//! like(name, 'J%') || endsWith(email, '@example.com')
//! (status != 'closed') && owner == userId
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Literal};
pub use operators::{CompareOp, LogicalOp};
pub use tokens::Token;
