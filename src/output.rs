//! JSON rendering of evaluation and translation results.
//!
//! Column references and parameters have no JSON counterpart, so they are
//! rendered as tagged objects using the same shape the CLI accepts for
//! bindings.
//!
//! ```
//! use sqlexpr::{Value, output::to_json};
//!
//! assert_eq!(to_json(&Value::from(42)), "42");
//! assert_eq!(to_json(&Value::from("a\"b")), r#""a\"b""#);
//! ```

use std::str::FromStr;

use serde_json::{Map, Number, json};

use crate::{sql::SqlQuery, value::Value};

/// Converts a value into a `serde_json::Value`.
///
/// Numbers that fit `i64` or `f64` become JSON numbers; anything else keeps
/// its exact decimal text as a string.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => {
            let text = n.normalize().to_string();
            Number::from_str(&text)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::String(text))
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Column(column) => {
            let mut map = Map::new();
            map.insert("column".to_string(), json!(column.name));
            map.insert("table".to_string(), json!(column.table));
            if let Some(sql_type) = &column.sql_type {
                map.insert("type".to_string(), json!(sql_type));
            }
            serde_json::Value::Object(map)
        }
        Value::Parameter(parameter) => json!({ "parameter": parameter.name }),
    }
}

pub fn query_to_json(query: &SqlQuery) -> serde_json::Value {
    json!({
        "sql": query.sql,
        "parameters": query.parameters,
    })
}

pub fn to_json(value: &Value) -> String {
    value_to_json(value).to_string()
}

/// Serializes any JSON value, compact or indented.
pub fn render(json: &serde_json::Value, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string())
    } else {
        json.to_string()
    }
}
