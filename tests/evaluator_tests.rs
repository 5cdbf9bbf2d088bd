// tests/evaluator_tests.rs

use sqlexpr::{
    ColumnRef, EvalContext, EvalError, PositionalParameterRef, Value, evaluate, parse,
};

fn eval(source: &str, ctx: &EvalContext) -> Result<Value, EvalError> {
    let expr = parse(source).unwrap();
    evaluate(&expr, ctx)
}

fn context(pairs: Vec<(&str, Value)>) -> EvalContext {
    let mut ctx = EvalContext::with_builtins();
    for (name, value) in pairs {
        ctx.set_variable(name, value);
    }
    ctx
}

// ============================================================================
// Literals and Variables
// ============================================================================

#[test]
fn test_literal_evaluates_to_itself() {
    let ctx = EvalContext::new();
    assert_eq!(eval("'abc'", &ctx).unwrap(), Value::from("abc"));
    assert_eq!(eval("12.5", &ctx).unwrap(), Value::Number("12.5".parse().unwrap()));
    assert_eq!(eval("false", &ctx).unwrap(), Value::Boolean(false));
    assert_eq!(eval("null", &ctx).unwrap(), Value::Null);
}

#[test]
fn test_variable_resolution() {
    let ctx = context(vec![("a", Value::from("something"))]);
    assert_eq!(eval("a", &ctx).unwrap(), Value::from("something"));
}

#[test]
fn test_undefined_variable() {
    let ctx = EvalContext::new();
    assert_eq!(
        eval("missing == 1", &ctx),
        Err(EvalError::UndefinedVariable("missing".to_string()))
    );
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_numeric_comparisons() {
    let ctx = context(vec![("price", Value::from(100))]);
    let cases = vec![
        ("price == 100", true),
        ("price == 100.00", true),
        ("price != 100", false),
        ("price > 99.5", true),
        ("price < 100", false),
        ("price <= 100", true),
        ("price >= 101", false),
        ("price > -1", true),
    ];

    for (source, expected) in cases {
        assert_eq!(
            eval(source, &ctx).unwrap(),
            Value::Boolean(expected),
            "Failed for: {}",
            source
        );
    }
}

#[test]
fn test_string_comparisons() {
    let ctx = context(vec![("name", Value::from("bob"))]);
    assert_eq!(eval("name == 'bob'", &ctx).unwrap(), Value::Boolean(true));
    assert_eq!(eval("name != \"bob\"", &ctx).unwrap(), Value::Boolean(false));
    assert_eq!(eval("name > 'alice'", &ctx).unwrap(), Value::Boolean(true));
    assert_eq!(eval("name < 'Bob'", &ctx).unwrap(), Value::Boolean(false));
}

#[test]
fn test_null_equality() {
    let ctx = context(vec![("x", Value::Null)]);
    assert_eq!(eval("x == null", &ctx).unwrap(), Value::Boolean(true));
    assert_eq!(eval("x != 0", &ctx).unwrap(), Value::Boolean(true));
    assert!(matches!(eval("x < 1", &ctx), Err(EvalError::TypeError(_))));
}

#[test]
fn test_boolean_equality_but_no_ordering() {
    let ctx = EvalContext::new();
    assert_eq!(eval("true == true", &ctx).unwrap(), Value::Boolean(true));
    assert!(matches!(eval("true > false", &ctx), Err(EvalError::TypeError(_))));
}

#[test]
fn test_column_and_parameter_have_no_in_memory_value() {
    let ctx = context(vec![
        ("id", Value::Column(ColumnRef::new("SOMETABLE", "lngId"))),
        ("userId", Value::Parameter(PositionalParameterRef::new("userId"))),
    ]);
    assert!(matches!(eval("id == 1", &ctx), Err(EvalError::TypeError(_))));
    assert!(matches!(eval("userId == 1", &ctx), Err(EvalError::TypeError(_))));
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_logical_operators() {
    let ctx = context(vec![("a", Value::from(1)), ("b", Value::from("x"))]);
    assert_eq!(eval("a == 1 && b == 'x'", &ctx).unwrap(), Value::Boolean(true));
    assert_eq!(eval("a == 2 && b == 'x'", &ctx).unwrap(), Value::Boolean(false));
    assert_eq!(eval("a == 2 || b == 'x'", &ctx).unwrap(), Value::Boolean(true));
    assert_eq!(eval("a == 2 || b == 'y'", &ctx).unwrap(), Value::Boolean(false));
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    let ctx = context(vec![("a", Value::from(1))]);
    // The left side decides the result, but the right side is still evaluated.
    assert_eq!(
        eval("a == 2 && missing == 1", &ctx),
        Err(EvalError::UndefinedVariable("missing".to_string()))
    );
    assert_eq!(
        eval("a == 1 || missing == 1", &ctx),
        Err(EvalError::UndefinedVariable("missing".to_string()))
    );
}

#[test]
fn test_logical_operators_require_booleans() {
    let ctx = context(vec![("a", Value::from(1))]);
    assert!(matches!(eval("a && true", &ctx), Err(EvalError::TypeError(_))));
    assert!(matches!(eval("'x' || false", &ctx), Err(EvalError::TypeError(_))));
}

// ============================================================================
// Function Calls
// ============================================================================

#[test]
fn test_function_call() {
    let ctx = context(vec![("name", Value::from("John Smith"))]);
    assert_eq!(eval("like(name, 'J%')", &ctx).unwrap(), Value::Boolean(true));
    assert_eq!(
        eval("startsWith(name, 'John') && endsWith(name, 'Smith')", &ctx).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_unknown_function() {
    let ctx = EvalContext::with_builtins();
    assert_eq!(
        eval("upper('x')", &ctx),
        Err(EvalError::UnknownFunction("upper".to_string()))
    );
}

#[test]
fn test_functions_are_looked_up_in_the_context() {
    let ctx = EvalContext::new();
    assert_eq!(
        eval("like('a', 'a')", &ctx),
        Err(EvalError::UnknownFunction("like".to_string()))
    );
}

#[test]
fn test_argument_errors_come_after_argument_evaluation() {
    let ctx = EvalContext::with_builtins();
    assert_eq!(
        eval("like(missing, 'a')", &ctx),
        Err(EvalError::UndefinedVariable("missing".to_string()))
    );
}
