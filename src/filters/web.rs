//! Address filters (`url`, `email`)
//!
//! Both require a string and hand the syntax check to the `validator` crate.

use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use super::Args;
use crate::value::export;
use crate::Error;

/// Require an absolute URL.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sluice::filters::web;
///
/// assert!(web::url(&json!("https://example.com/a?b=c"), false).is_ok());
/// assert!(web::url(&json!("example"), false).is_err());
/// ```
pub fn url(value: &Value, allow_null: bool) -> Result<Value, Error> {
    let s = text(value, allow_null)?;
    match s {
        Some(s) if s.validate_url() => Ok(value.clone()),
        Some(s) => Err(Error::filter(format!("Value '{}' is not a valid url", s))),
        None => Ok(Value::Null),
    }
}

/// Require a syntactically valid email address.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sluice::filters::web;
///
/// assert!(web::email(&json!("someone@example.com"), false).is_ok());
/// assert!(web::email(&json!("someone@"), false).is_err());
/// ```
pub fn email(value: &Value, allow_null: bool) -> Result<Value, Error> {
    let s = text(value, allow_null)?;
    match s {
        Some(s) if s.validate_email() => Ok(value.clone()),
        Some(s) => Err(Error::filter(format!("Value '{}' is not a valid email", s))),
        None => Ok(Value::Null),
    }
}

/// The `url` alias: `[allowNull]`.
pub fn url_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    url(value, Args::new("url", args).bool(0, "allowNull", false)?)
}

/// The `email` alias: `[allowNull]`.
pub fn email_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    email(value, Args::new("email", args).bool(0, "allowNull", false)?)
}

// `None` only for an allowed null.
fn text(value: &Value, allow_null: bool) -> Result<Option<String>, Error> {
    match value {
        Value::Null if allow_null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(Error::filter(format!(
            "Value '{}' is not a string",
            export(other)
        ))),
    }
}
