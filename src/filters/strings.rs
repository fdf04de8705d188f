//! String filters (`string`, `stringify`, `explode`)
//!
//! `string` only accepts values that already are strings. Converting numbers or booleans
//! is an explicit step of its own, `stringify`, placed before it in the chain.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::filters::strings;
//!
//! assert!(strings::filter(&json!(12), false, 1, usize::MAX).is_err());
//!
//! let text = strings::stringify(&json!(12), false).unwrap();
//! assert_eq!(strings::filter(&text, false, 1, usize::MAX).unwrap(), json!("12"));
//! ```

use serde_json::Value;

use super::Args;
use crate::value::export;
use crate::Error;

/// Require a string whose byte length is within `[min_length, max_length]`.
pub fn filter(
    value: &Value,
    allow_null: bool,
    min_length: usize,
    max_length: usize,
) -> Result<Value, Error> {
    if allow_null && value.is_null() {
        return Ok(Value::Null);
    }

    let Value::String(s) = value else {
        return Err(Error::filter(format!(
            "Value '{}' is not a string",
            export(value)
        )));
    };

    let length = s.len();
    if length < min_length || length > max_length {
        return Err(Error::filter(format!(
            "Value '{}' with length '{}' is less than '{}' or greater than '{}'",
            s, length, min_length, max_length
        )));
    }

    Ok(value.clone())
}

/// Convert a scalar to its textual form.
///
/// Strings are unchanged, numbers become their decimal text, booleans `"true"` or
/// `"false"`. Arrays, objects and (unless `allow_null`) `null` are rejected.
pub fn stringify(value: &Value, allow_null: bool) -> Result<Value, Error> {
    match value {
        Value::Null if allow_null => Ok(Value::Null),
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(Error::filter(format!(
            "Value '{}' is not a scalar",
            export(other)
        ))),
    }
}

/// Split a string on `delimiter` into an array of strings.
///
/// # Errors
///
/// [`Error::Configuration`] for an empty delimiter.
pub fn explode(value: &Value, delimiter: &str) -> Result<Value, Error> {
    if delimiter.is_empty() {
        return Err(Error::configuration(
            "Delimiter '' is not a non-empty string",
        ));
    }

    let Value::String(s) = value else {
        return Err(Error::filter(format!(
            "Value '{}' is not a string",
            export(value)
        )));
    };

    Ok(Value::Array(
        s.split(delimiter)
            .map(|piece| Value::String(piece.to_string()))
            .collect(),
    ))
}

/// The `string` alias: `[allowNull, minLength, maxLength]`.
pub fn filter_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("string", args);
    filter(
        value,
        args.bool(0, "allowNull", false)?,
        args.usize(1, "minLength")?.unwrap_or(1),
        args.usize(2, "maxLength")?.unwrap_or(usize::MAX),
    )
}

/// The `stringify` alias: `[allowNull]`.
pub fn stringify_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("stringify", args);
    stringify(value, args.bool(0, "allowNull", false)?)
}

/// The `explode` alias: `[delimiter]`, defaulting to `","`.
pub fn explode_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("explode", args);
    explode(value, args.str(0, "delimiter")?.unwrap_or(","))
}
