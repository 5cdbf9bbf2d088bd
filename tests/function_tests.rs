// tests/function_tests.rs

use sqlexpr::functions::{Contains, EndsWith, Function, FunctionRegistry, Like, StartsWith};
use sqlexpr::{ColumnRef, EvalContext, EvalError, Expr, PositionalParameterRef, Value};

fn s(text: &str) -> Value {
    Value::from(text)
}

fn sql_context() -> EvalContext {
    let mut ctx = EvalContext::with_builtins();
    ctx.set_variable("name", ColumnRef::new("PERSON", "strName").with_type("VARCHAR"));
    ctx.set_variable("pattern", PositionalParameterRef::new("pattern"));
    ctx.set_variable("constant", "abc");
    ctx
}

fn args(names: &[&str]) -> Vec<Expr> {
    names.iter().map(|n| Expr::variable(*n)).collect()
}

// ============================================================================
// Interpreter Mode
// ============================================================================

#[test]
fn test_like_evaluate() {
    assert_eq!(Like.evaluate(&[s("hello"), s("h%o")]), Ok(Value::Boolean(true)));
    assert_eq!(Like.evaluate(&[s("hello"), s("h_llo")]), Ok(Value::Boolean(true)));
    assert_eq!(Like.evaluate(&[s("hello"), s("h_lo")]), Ok(Value::Boolean(false)));
    assert_eq!(Like.evaluate(&[s("a+b"), s("a+b")]), Ok(Value::Boolean(true)));
    assert_eq!(Like.evaluate(&[s("aab"), s("a+b")]), Ok(Value::Boolean(false)));
}

#[test]
fn test_starts_ends_contains_evaluate() {
    assert_eq!(StartsWith.evaluate(&[s("prefix_x"), s("prefix")]), Ok(Value::Boolean(true)));
    assert_eq!(StartsWith.evaluate(&[s("x"), s("prefix")]), Ok(Value::Boolean(false)));
    assert_eq!(EndsWith.evaluate(&[s("file.sql"), s(".sql")]), Ok(Value::Boolean(true)));
    assert_eq!(EndsWith.evaluate(&[s("file.sql"), s("%")]), Ok(Value::Boolean(false)));
    assert_eq!(Contains.evaluate(&[s("a_b_c"), s("_b_")]), Ok(Value::Boolean(true)));
}

#[test]
fn test_wrong_argument_count() {
    let functions: Vec<Box<dyn Function>> = vec![
        Box::new(Like),
        Box::new(StartsWith),
        Box::new(EndsWith),
        Box::new(Contains),
    ];

    for function in functions {
        for values in [vec![], vec![s("a")], vec![s("a"), s("b"), s("c")]] {
            match function.evaluate(&values) {
                Err(EvalError::Arity {
                    function: name,
                    expected,
                    found,
                }) => {
                    assert_eq!(name, function.name());
                    assert_eq!(expected, 2);
                    assert_eq!(found, values.len());
                }
                other => panic!("{}: expected arity error, got {:?}", function.name(), other),
            }
        }
    }
}

#[test]
fn test_non_string_arguments() {
    let cases: Vec<(Box<dyn Function>, Vec<Value>, usize)> = vec![
        (Box::new(Like), vec![Value::from(1), s("1")], 1),
        (Box::new(Like), vec![s("1"), Value::from(true)], 2),
        (Box::new(StartsWith), vec![s("a"), Value::from(1)], 2),
        (Box::new(EndsWith), vec![Value::Null, s("a")], 1),
        (Box::new(EndsWith), vec![s("a"), Value::Null], 2),
        (Box::new(Contains), vec![Value::from(false), s("a")], 1),
    ];

    for (function, values, bad_index) in cases {
        match function.evaluate(&values) {
            Err(EvalError::InvalidArgument {
                function: name,
                index,
                ..
            }) => {
                assert_eq!(name, function.name());
                assert_eq!(index, bad_index);
            }
            other => panic!("{}: expected invalid argument, got {:?}", function.name(), other),
        }
    }
}

#[test]
fn test_ends_with_rejects_column_in_memory() {
    let column = Value::Column(ColumnRef::new("T", "c"));
    assert!(matches!(
        EndsWith.evaluate(&[column, s("c")]),
        Err(EvalError::InvalidArgument { index: 1, .. })
    ));
}

#[test]
fn test_error_message_names_function_and_argument() {
    let err = Like.evaluate(&[Value::from(1), s("x")]).unwrap_err();
    assert_eq!(err.to_string(), "like() argument 1: expected string, got number");
}

// ============================================================================
// Compiler Mode
// ============================================================================

#[test]
fn test_like_to_sql() {
    let mut ctx = sql_context();
    let sql = Like
        .to_sql(&[Expr::variable("name"), Expr::string("J%_x")], &mut ctx)
        .unwrap();
    // Caller-supplied wildcards pass through untouched.
    assert_eq!(sql, "(PERSON.strName LIKE 'J%_x')");
    assert!(ctx.parameters().is_empty());
}

#[test]
fn test_like_to_sql_with_parameter_pattern() {
    let mut ctx = sql_context();
    let sql = Like.to_sql(&args(&["name", "pattern"]), &mut ctx).unwrap();
    assert_eq!(sql, "(PERSON.strName LIKE ?)");
    assert_eq!(ctx.parameters(), ["pattern".to_string()]);
}

#[test]
fn test_like_to_sql_with_constant_variable_pattern() {
    let mut ctx = sql_context();
    let sql = Like.to_sql(&args(&["name", "constant"]), &mut ctx).unwrap();
    assert_eq!(sql, "(PERSON.strName LIKE 'abc')");
}

#[test]
fn test_to_sql_requires_column_first_argument() {
    let mut ctx = sql_context();
    let functions: Vec<Box<dyn Function>> = vec![
        Box::new(Like),
        Box::new(StartsWith),
        Box::new(EndsWith),
        Box::new(Contains),
    ];

    for function in functions {
        for first in [Expr::variable("constant"), Expr::string("lit"), Expr::variable("pattern")] {
            let result = function.to_sql(&[first, Expr::string("x")], &mut ctx);
            assert!(
                matches!(result, Err(EvalError::InvalidArgument { index: 1, .. })),
                "{}: expected column error, got {:?}",
                function.name(),
                result
            );
        }
    }
}

#[test]
fn test_to_sql_arity() {
    let mut ctx = sql_context();
    assert!(matches!(
        EndsWith.to_sql(&args(&["name"]), &mut ctx),
        Err(EvalError::Arity { found: 1, .. })
    ));
}

#[test]
fn test_affix_to_sql_escapes_wildcards() {
    let mut ctx = sql_context();
    let name = Expr::variable("name");

    assert_eq!(
        EndsWith.to_sql(&[name.clone(), Expr::string("100%")], &mut ctx).unwrap(),
        r"(PERSON.strName LIKE '%100\%' ESCAPE '\')"
    );
    assert_eq!(
        StartsWith.to_sql(&[name.clone(), Expr::string("a_b")], &mut ctx).unwrap(),
        r"(PERSON.strName LIKE 'a\_b%' ESCAPE '\')"
    );
    assert_eq!(
        Contains.to_sql(&[name.clone(), Expr::string("O'Brien")], &mut ctx).unwrap(),
        r"(PERSON.strName LIKE '%O''Brien%' ESCAPE '\')"
    );
}

#[test]
fn test_ends_with_rejects_generated_fragment() {
    let mut ctx = sql_context();
    let fragment = Expr::call("like", args(&["name", "constant"]));
    let result = EndsWith.to_sql(&[Expr::variable("name"), fragment], &mut ctx);
    assert!(matches!(
        result,
        Err(EvalError::UnsupportedTranslation { .. })
    ));
}

#[test]
fn test_ends_with_rejects_parameter_suffix() {
    let mut ctx = sql_context();
    let result = EndsWith.to_sql(&args(&["name", "pattern"]), &mut ctx);
    assert!(matches!(
        result,
        Err(EvalError::UnsupportedTranslation { .. })
    ));
}

#[test]
fn test_ends_with_rejects_non_string_literal() {
    let mut ctx = sql_context();
    let result = EndsWith.to_sql(&[Expr::variable("name"), Expr::number(5)], &mut ctx);
    assert!(matches!(
        result,
        Err(EvalError::InvalidArgument { index: 2, .. })
    ));
}

// ============================================================================
// Registry
// ============================================================================

struct Always;

impl Function for Always {
    fn name(&self) -> &'static str {
        "always"
    }

    fn evaluate(&self, _args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Boolean(true))
    }

    fn to_sql(&self, _args: &[Expr], _ctx: &mut EvalContext) -> Result<String, EvalError> {
        Ok("(1 = 1)".to_string())
    }
}

#[test]
fn test_custom_function_registration() {
    let mut registry = FunctionRegistry::builtins();
    registry.register(Always);
    assert!(registry.contains("always"));

    let mut ctx = EvalContext::new();
    ctx.set_functions(registry);
    let expr = sqlexpr::parse("always() && always()").unwrap();
    assert_eq!(sqlexpr::evaluate(&expr, &ctx), Ok(Value::Boolean(true)));
    assert_eq!(
        sqlexpr::generate(&expr, &mut ctx).unwrap().sql,
        "((1 = 1) AND (1 = 1))"
    );
}
