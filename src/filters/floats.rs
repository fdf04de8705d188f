//! Bounded float filter (`float`)
//!
//! Native floats pass as-is, native integers only when `cast_ints` is set. Strings must
//! be a plain decimal or scientific numeral once trimmed: hex notation, `inf` and `nan`
//! are rejected, and a numeral whose magnitude does not fit an `f64` is reported as an
//! overflow or underflow. The sign of zero is kept.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::filters::floats;
//!
//! assert_eq!(floats::filter(&json!(" 1.5e2 "), false, None, None, false).unwrap(), json!(150.0));
//!
//! let zero = floats::filter(&json!("-0"), false, None, None, false).unwrap();
//! assert!(zero.as_f64().unwrap().is_sign_negative());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{trim_blank, Args};
use crate::value::export;
use crate::Error;

static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeral pattern is valid")
});

/// Whether `s` is a decimal or scientific numeral (no surrounding whitespace).
pub(crate) fn is_numeral(s: &str) -> bool {
    NUMERAL.is_match(s)
}

/// Filter to an `f64` within the optional bounds.
pub fn filter(
    value: &Value,
    allow_null: bool,
    min_value: Option<f64>,
    max_value: Option<f64>,
    cast_ints: bool,
) -> Result<Value, Error> {
    if allow_null && value.is_null() {
        return Ok(Value::Null);
    }

    let float = coerce(value, cast_ints)?;

    if let Some(min) = min_value {
        if float < min {
            return Err(Error::filter(format!("{} is less than {}", float, min)));
        }
    }
    if let Some(max) = max_value {
        if float > max {
            return Err(Error::filter(format!("{} is greater than {}", float, max)));
        }
    }

    crate::value::float(float)
        .ok_or_else(|| Error::filter(format!("{} is not a finite number", float)))
}

/// The `float` alias: `[allowNull, minValue, maxValue, castInts]`.
pub fn filter_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("float", args);
    filter(
        value,
        args.bool(0, "allowNull", false)?,
        args.f64(1, "minValue")?,
        args.f64(2, "maxValue")?,
        args.bool(3, "castInts", false)?,
    )
}

fn coerce(value: &Value, cast_ints: bool) -> Result<f64, Error> {
    match value {
        Value::Number(n) if n.is_f64() || cast_ints => n
            .as_f64()
            .ok_or_else(|| Error::filter(format!("Value '{}' is not a string", n))),
        Value::String(s) => parse(trim_blank(s)),
        other => Err(Error::filter(format!(
            "Value '{}' is not a string",
            export(other)
        ))),
    }
}

fn parse(s: &str) -> Result<f64, Error> {
    if s.to_lowercase().contains('x') {
        return Err(Error::filter(format!("{} is hex format", s)));
    }
    if !is_numeral(s) {
        return Err(Error::filter(format!("{} does not pass numeric check", s)));
    }

    let float: f64 = s
        .parse()
        .map_err(|_| Error::filter(format!("{} does not pass numeric check", s)))?;

    if float == f64::INFINITY {
        Err(Error::filter(format!("{} overflow", s)))
    } else if float == f64::NEG_INFINITY {
        Err(Error::filter(format!("{} underflow", s)))
    } else {
        Ok(float)
    }
}
