//! Helpers over dynamic [`Value`]s
//!
//! Filters see their input as a `serde_json::Value`. This module holds the few pieces of
//! value logic several filters and the engine agree on: how a value is rendered inside
//! an error message, array-like entries, and the loose ("coercing") equality
//! used by non-strict membership checks.

use serde_json::{Map, Number, Value};

/// Render a value the way error messages quote it.
///
/// Strings appear raw, `null` as `NULL`, booleans and numbers in their literal form,
/// arrays and objects as compact JSON.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sluice::value::export;
///
/// assert_eq!(export(&json!("abc")), "abc");
/// assert_eq!(export(&json!(null)), "NULL");
/// assert_eq!(export(&json!(12)), "12");
/// assert_eq!(export(&json!([1, "a"])), "[1,\"a\"]");
/// ```
pub fn export(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build a float value, or `None` for NaN and infinities (not representable in JSON).
pub(crate) fn float(f: f64) -> Option<Value> {
    Number::from_f64(f).map(Value::Number)
}

/// The elements of an array-like value paired with their keys.
///
/// Arrays yield their positions as keys, objects their own keys. Anything else is not
/// array-like and yields `None`.
pub(crate) fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
        ),
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        _ => None,
    }
}

/// Rebuild a value of the same shape as `template` from filtered entries.
pub(crate) fn rebuild(template: &Value, filtered: Map<String, Value>) -> Value {
    match template {
        Value::Array(_) => Value::Array(filtered.into_iter().map(|(_, v)| v).collect()),
        _ => Value::Object(filtered),
    }
}

/// Compare two values with coercion, the non-strict counterpart of `==` on `Value`.
///
/// - numbers compare numerically (`1 == 1.0`)
/// - a numeric string compares numerically with a number, any other string compares
///   with the number's textual form
/// - a boolean compares with the truthiness of the other side
/// - `null` equals `false`, `0`, `""` and empty arrays
/// - arrays and objects compare element-wise with the same rules
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sluice::value::loose_eq;
///
/// assert!(loose_eq(&json!("0"), &json!(0)));
/// assert!(loose_eq(&json!(" 1.5"), &json!(1.5)));
/// assert!(loose_eq(&json!(null), &json!(false)));
/// assert!(!loose_eq(&json!("abc"), &json!(0)));
/// ```
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == truthy(other),
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !truthy(other),
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match numeric(s) {
                Some(parsed) => n.as_f64() == Some(parsed),
                None => n.to_string() == *s,
            }
        }
        (Value::String(x), Value::String(y)) => match (numeric(x), numeric(y)) {
            (Some(p), Some(q)) => p == q,
            _ => x == y,
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| loose_eq(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, p)| y.get(key).is_some_and(|q| loose_eq(p, q)))
        }
        _ => false,
    }
}

fn numbers_eq(x: &Number, y: &Number) -> bool {
    match (x.as_i64(), y.as_i64()) {
        (Some(p), Some(q)) => p == q,
        _ => match (x.as_u64(), y.as_u64()) {
            (Some(p), Some(q)) => p == q,
            _ => x.as_f64() == y.as_f64(),
        },
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn numeric(s: &str) -> Option<f64> {
    let trimmed = crate::filters::trim_blank(s);
    if crate::filters::floats::is_numeral(trimmed) {
        trimmed.parse().ok()
    } else {
        None
    }
}
