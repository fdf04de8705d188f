//! Array shape filters (`array`, `flatten`)

use serde_json::Value;

use super::Args;
use crate::value::export;
use crate::Error;

/// Require an array-like value (array or object) with `[min_count, max_count]` entries.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sluice::filters::arrays;
///
/// assert!(arrays::filter(&json!([1, 2]), 1, 2).is_ok());
/// assert!(arrays::filter(&json!([]), 1, usize::MAX).is_err());
/// ```
pub fn filter(value: &Value, min_count: usize, max_count: usize) -> Result<Value, Error> {
    let count = match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => {
            return Err(Error::filter(format!(
                "Value '{}' is not an array",
                export(other)
            )))
        }
    };

    if count < min_count {
        return Err(Error::filter(format!(
            "value count of {} is less than {}",
            count, min_count
        )));
    }
    if count > max_count {
        return Err(Error::filter(format!(
            "value count of {} is greater than {}",
            count, max_count
        )));
    }

    Ok(value.clone())
}

/// Concatenate every leaf of a nested array-like value, depth first, dropping keys.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sluice::filters::arrays;
///
/// let flat = arrays::flatten(&json!([1, [2, [3, {"k": 4}]], []])).unwrap();
/// assert_eq!(flat, json!([1, 2, 3, 4]));
/// ```
pub fn flatten(value: &Value) -> Result<Value, Error> {
    if !matches!(value, Value::Array(_) | Value::Object(_)) {
        return Err(Error::filter(format!(
            "Value '{}' is not an array",
            export(value)
        )));
    }

    let mut leaves = Vec::new();
    collect_leaves(value, &mut leaves);
    Ok(Value::Array(leaves))
}

fn collect_leaves(value: &Value, leaves: &mut Vec<Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, leaves)),
        Value::Object(map) => map.values().for_each(|item| collect_leaves(item, leaves)),
        leaf => leaves.push(leaf.clone()),
    }
}

/// The `array` alias: `[minCount, maxCount]`.
pub fn filter_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("array", args);
    filter(
        value,
        args.usize(0, "minCount")?.unwrap_or(1),
        args.usize(1, "maxCount")?.unwrap_or(usize::MAX),
    )
}

/// The `flatten` alias.
pub fn flatten_args(value: &Value, _args: &[Value]) -> Result<Value, Error> {
    flatten(value)
}
