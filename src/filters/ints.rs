//! Bounded integer filters (`int`, `uint`)
//!
//! Native integers pass as-is. Strings are trimmed and must be all decimal digits after
//! at most one leading sign. Anything that would not fit an `i64` is reported as an
//! overflow or underflow rather than clamped.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::filters::ints;
//!
//! assert_eq!(ints::filter(&json!("  +123 "), false, None, i64::MAX).unwrap(), json!(123));
//! assert!(ints::filter(&json!("12a"), false, None, i64::MAX).is_err());
//! assert!(ints::unsigned(&json!(-1), false, None, i64::MAX).is_err());
//! ```

use serde_json::Value;

use super::{trim_blank, Args};
use crate::value::export;
use crate::Error;

/// Filter to an `i64` within `[min_value, max_value]`.
///
/// `min_value` of `None` means unbounded below. With `allow_null`, `null` passes through.
pub fn filter(
    value: &Value,
    allow_null: bool,
    min_value: Option<i64>,
    max_value: i64,
) -> Result<Value, Error> {
    if allow_null && value.is_null() {
        return Ok(Value::Null);
    }

    let int = coerce(value)?;

    if let Some(min) = min_value {
        if int < min {
            return Err(Error::filter(format!("{} is less than {}", int, min)));
        }
    }
    if int > max_value {
        return Err(Error::filter(format!(
            "{} is greater than {}",
            int, max_value
        )));
    }

    Ok(Value::from(int))
}

/// Like [`filter`] with `min_value` defaulting to zero.
///
/// # Errors
///
/// [`Error::Configuration`] if a negative `min_value` is supplied.
pub fn unsigned(
    value: &Value,
    allow_null: bool,
    min_value: Option<i64>,
    max_value: i64,
) -> Result<Value, Error> {
    let min = match min_value {
        None => 0,
        Some(min) if min < 0 => {
            return Err(Error::configuration(
                "minValue was not greater or equal to zero",
            ))
        }
        Some(min) => min,
    };
    filter(value, allow_null, Some(min), max_value)
}

/// The `int` alias: `[allowNull, minValue, maxValue]`.
pub fn filter_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("int", args);
    filter(
        value,
        args.bool(0, "allowNull", false)?,
        args.i64(1, "minValue")?,
        args.i64(2, "maxValue")?.unwrap_or(i64::MAX),
    )
}

/// The `uint` alias: `[allowNull, minValue, maxValue]`.
pub fn unsigned_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("uint", args);
    unsigned(
        value,
        args.bool(0, "allowNull", false)?,
        args.i64(1, "minValue")?,
        args.i64(2, "maxValue")?.unwrap_or(i64::MAX),
    )
}

fn coerce(value: &Value) -> Result<i64, Error> {
    match value {
        Value::Number(n) if n.is_i64() => n
            .as_i64()
            .ok_or_else(|| Error::filter(format!("Value '{}' is not a string", n))),
        Value::Number(n) if n.is_u64() => Err(Error::filter(format!(
            "{} was greater than a max int of {}",
            n,
            i64::MAX
        ))),
        Value::String(s) => parse(trim_blank(s)),
        other => Err(Error::filter(format!(
            "Value '{}' is not a string",
            export(other)
        ))),
    }
}

fn parse(s: &str) -> Result<i64, Error> {
    if s.is_empty() {
        return Err(Error::filter("value string length is zero"));
    }

    let (negative, digits) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::filter(format!(
            "{} does not contain all digits, optionally prepended by a '+' or '-' and \
             optionally surrounded by whitespace",
            s
        )));
    }

    // All digits at this point, so the only way parsing fails is range.
    s.parse::<i64>().map_err(|_| {
        if negative {
            Error::filter(format!("{} was less than a min int of {}", s, i64::MIN))
        } else {
            Error::filter(format!("{} was greater than a max int of {}", s, i64::MAX))
        }
    })
}
