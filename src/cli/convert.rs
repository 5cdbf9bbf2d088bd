//! JSON bindings -> evaluation context

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Map;

use super::CliError;
use crate::{ColumnRef, EvalContext, PositionalParameterRef, Value};

/// Convert one JSON binding to a Value.
///
/// Scalars bind constants. `{"column": .., "table": .., "type": ..}` binds a
/// column and `{"parameter": ..}` binds a positional parameter.
pub fn json_to_value(name: &str, v: serde_json::Value) -> Result<Value, CliError> {
    match v {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map(Value::Number)
            .map_err(|_| CliError::InvalidBinding {
                name: name.to_string(),
                message: format!("number {} is out of range", n),
            }),
        serde_json::Value::String(s) => Ok(Value::String(s)),
        serde_json::Value::Object(obj) => object_to_value(name, obj),
        serde_json::Value::Array(_) => Err(CliError::InvalidBinding {
            name: name.to_string(),
            message: "arrays cannot be bound".to_string(),
        }),
    }
}

fn object_to_value(name: &str, obj: Map<String, serde_json::Value>) -> Result<Value, CliError> {
    let field = |key: &str| -> Result<Option<String>, CliError> {
        match obj.get(key) {
            None => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(CliError::InvalidBinding {
                name: name.to_string(),
                message: format!("'{}' must be a string", key),
            }),
        }
    };

    if let Some(parameter) = field("parameter")? {
        return Ok(Value::Parameter(PositionalParameterRef::new(parameter)));
    }

    if let Some(column) = field("column")? {
        let table = field("table")?.unwrap_or_default();
        let mut column = ColumnRef::new(table, column);
        column.sql_type = field("type")?;
        return Ok(Value::Column(column));
    }

    Err(CliError::InvalidBinding {
        name: name.to_string(),
        message: "objects must have a 'column' or 'parameter' key".to_string(),
    })
}

/// Parse a JSON object of bindings into `ctx`.
pub fn apply_bindings(ctx: &mut EvalContext, json: &str) -> Result<(), CliError> {
    let bindings: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Object(bindings) = bindings else {
        return Err(CliError::InvalidBinding {
            name: "<root>".to_string(),
            message: "bindings must be a JSON object".to_string(),
        });
    };

    for (name, value) in bindings {
        let value = json_to_value(&name, value)?;
        ctx.set_variable(name, value);
    }
    Ok(())
}
