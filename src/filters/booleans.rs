//! Boolean filter (`bool`)
//!
//! Native booleans pass unchanged. Strings are trimmed, lowercased and looked up in the
//! accepted true and false tokens.

use serde_json::Value;

use super::{trim_blank, Args};
use crate::value::export;
use crate::Error;

/// Filter to a boolean.
///
/// `true_values` and `false_values` are expected to be lowercase already.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sluice::filters::booleans;
///
/// let yes = ["yes".to_string()];
/// let no = ["no".to_string()];
/// assert_eq!(booleans::filter(&json!(" YES "), false, &yes, &no).unwrap(), json!(true));
/// assert!(booleans::filter(&json!("maybe"), false, &yes, &no).is_err());
/// ```
pub fn filter(
    value: &Value,
    allow_null: bool,
    true_values: &[String],
    false_values: &[String],
) -> Result<Value, Error> {
    match value {
        Value::Null if allow_null => Ok(Value::Null),
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) => {
            let token = trim_blank(s).to_lowercase();
            if true_values.contains(&token) {
                Ok(Value::Bool(true))
            } else if false_values.contains(&token) {
                Ok(Value::Bool(false))
            } else {
                let accepted: Vec<&str> = true_values
                    .iter()
                    .chain(false_values)
                    .map(String::as_str)
                    .collect();
                Err(Error::filter(format!(
                    "{} is not '{}' disregarding case and whitespace",
                    token,
                    accepted.join("' or '")
                )))
            }
        }
        other => Err(Error::filter(format!(
            "Value '{}' is not a string",
            export(other)
        ))),
    }
}

/// The `bool` alias: `[allowNull, trueValues, falseValues]`.
pub fn filter_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("bool", args);
    let true_values = args
        .strings(1, "trueValues")?
        .unwrap_or_else(|| vec!["true".to_string()]);
    let false_values = args
        .strings(2, "falseValues")?
        .unwrap_or_else(|| vec!["false".to_string()]);
    filter(
        value,
        args.bool(0, "allowNull", false)?,
        &true_values,
        &false_values,
    )
}
