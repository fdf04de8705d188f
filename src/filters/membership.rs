//! Membership filter (`in`)
//!
//! Passes the value through unchanged when it is found in a haystack, comparing either
//! strictly (same type and value) or loosely (see [`loose_eq`]).
//!
//! The aliased form takes the haystack as a step argument. [`one_of`] and
//! [`one_of_lazy`] build the same check as a direct step, and the lazy variant computes
//! its haystack on every call so membership can follow changing data.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::filters::membership;
//!
//! assert!(membership::contains(&json!("0"), &[json!(0)], true).is_err());
//! assert!(membership::contains(&json!("0"), &[json!(0)], false).is_ok());
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Args, Filter};
use crate::value::{export, loose_eq};
use crate::{Aliases, Error};

/// Return the value if the haystack holds it.
pub fn contains(value: &Value, haystack: &[Value], strict: bool) -> Result<Value, Error> {
    let found = haystack.iter().any(|candidate| {
        if strict {
            candidate == value
        } else {
            loose_eq(candidate, value)
        }
    });

    if found {
        Ok(value.clone())
    } else {
        Err(Error::filter(format!(
            "Value '{}' is not in array {}",
            export(value),
            Value::Array(haystack.to_vec())
        )))
    }
}

/// The `in` alias: `[haystack, strict]`.
///
/// The haystack is an array, or an object whose values are searched.
pub fn filter_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("in", args);
    let haystack: Vec<Value> = match args.required(0, "haystack")? {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map.values().cloned().collect(),
        _ => {
            return Err(Error::configuration(
                "in: argument 'haystack' must be an array",
            ))
        }
    };
    contains(value, &haystack, args.bool(1, "strict", true)?)
}

type Producer = Arc<dyn Fn() -> Vec<Value> + Send + Sync>;

/// Where the candidates come from.
#[derive(Clone)]
pub enum Haystack {
    /// A fixed list.
    Fixed(Vec<Value>),
    /// A list produced at call time.
    Lazy(Producer),
}

impl fmt::Debug for Haystack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Haystack::Fixed(items) => f.debug_tuple("Fixed").field(items).finish(),
            Haystack::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// A membership check usable as a direct step.
#[derive(Debug, Clone)]
pub struct OneOf {
    haystack: Haystack,
    strict: bool,
}

impl OneOf {
    /// Compare loosely instead of strictly.
    pub fn loose(mut self) -> Self {
        self.strict = false;
        self
    }
}

impl Filter for OneOf {
    fn apply(&self, value: &Value, _args: &[Value], _aliases: &Aliases) -> Result<Value, Error> {
        match &self.haystack {
            Haystack::Fixed(items) => contains(value, items, self.strict),
            Haystack::Lazy(produce) => contains(value, &produce(), self.strict),
        }
    }
}

/// Strict membership in a fixed list.
pub fn one_of<I>(values: I) -> OneOf
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    OneOf {
        haystack: Haystack::Fixed(values.into_iter().map(Into::into).collect()),
        strict: true,
    }
}

/// Strict membership in a list produced by `produce` at call time.
pub fn one_of_lazy<F>(produce: F) -> OneOf
where
    F: Fn() -> Vec<Value> + Send + Sync + 'static,
{
    OneOf {
        haystack: Haystack::Lazy(Arc::new(produce)),
        strict: true,
    }
}
