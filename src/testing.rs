//! Testing utilities for code that filters with sluice
//!
//! Assertion macros for [`Response`](crate::Response)s and a couple of mock filters for
//! checking how chains are run.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use serde_json::json;
//! use sluice::engine::filter_value;
//! use sluice::{assert_filtered, assert_rejected};
//!
//! let spec = json!({"n": [["int"]]});
//!
//! let response = filter_value(&spec, &json!({"n": "4"}), &json!(null)).unwrap();
//! assert_filtered!(response, json!({"n": 4}));
//!
//! let response = filter_value(&spec, &json!({"n": []}), &json!(null)).unwrap();
//! assert_rejected!(response, "Field 'n' with value '[]' failed filtering, message 'Value '[]' is not a string'");
//! ```
//!
//! ## Mock Filters
//!
//! ```rust
//! use serde_json::json;
//! use sluice::testing::{failing, CountingFilter};
//! use sluice::{FieldRule, Filterer, Specification, Step};
//!
//! let counter = CountingFilter::new();
//! let filterer = Filterer::new(Specification::new().field(
//!     "a",
//!     FieldRule::new()
//!         .step(Step::function(failing("nope")))
//!         .step(Step::function(counter.clone())),
//! ));
//!
//! let serde_json::Value::Object(input) = json!({"a": 1}) else { unreachable!() };
//! assert!(filterer.invoke(&input).is_err());
//! assert_eq!(counter.calls(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::filters::Filter;
use crate::{Aliases, Error};

/// Pass-through filter that counts how often it ran.
///
/// Clones share the count, so keep one clone and put the other in a chain.
#[derive(Debug, Clone, Default)]
pub struct CountingFilter {
    calls: Arc<AtomicUsize>,
}

impl CountingFilter {
    /// A counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times any clone has been applied.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Filter for CountingFilter {
    fn apply(&self, value: &Value, _args: &[Value], _aliases: &Aliases) -> Result<Value, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(value.clone())
    }
}

/// Filter that rejects everything with a fixed message.
#[derive(Debug, Clone)]
pub struct Failing {
    message: String,
}

impl Filter for Failing {
    fn apply(&self, _value: &Value, _args: &[Value], _aliases: &Aliases) -> Result<Value, Error> {
        Err(Error::filter(self.message.clone()))
    }
}

/// A filter rejecting every value with `message`.
pub fn failing(message: impl Into<String>) -> Failing {
    Failing {
        message: message.into(),
    }
}

/// Assert that a response succeeded with the given filtered fields.
///
/// The expected value is compared as a JSON object.
///
/// # Example
///
/// ```rust
/// use serde_json::{json, Map};
/// use sluice::{assert_filtered, Response};
///
/// let Some(filtered) = json!({"a": 1}).as_object().cloned() else { unreachable!() };
/// assert_filtered!(Response::new(filtered, vec![], Map::new()), json!({"a": 1}));
/// ```
#[macro_export]
macro_rules! assert_filtered {
    ($response:expr, $expected:expr) => {
        match &$response {
            response => match response.filtered_value() {
                Some(filtered) => {
                    assert_eq!(::serde_json::Value::Object(filtered.clone()), $expected);
                }
                None => {
                    panic!(
                        "Expected success, got failure: {:?}",
                        response.error_message()
                    );
                }
            },
        }
    };
}

/// Assert that a response failed, optionally with a specific joined message.
///
/// # Example
///
/// ```rust
/// use serde_json::Map;
/// use sluice::{assert_rejected, Response};
///
/// let response = Response::new(Map::new(), vec!["a".into(), "b".into()], Map::new());
/// assert_rejected!(response);
/// assert_rejected!(response, "a\nb");
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($response:expr) => {
        match &$response {
            response => {
                if response.success() {
                    panic!(
                        "Expected failure, got success: {:?}",
                        response.filtered_value()
                    );
                }
            }
        }
    };
    ($response:expr, $message:expr) => {
        match &$response {
            response => match response.error_message() {
                Some(message) => assert_eq!(message, $message),
                None => {
                    panic!(
                        "Expected failure with {:?}, got success: {:?}",
                        $message,
                        response.filtered_value()
                    );
                }
            },
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;
    use serde_json::{json, Map};

    #[test]
    fn counting_filter_shares_count_between_clones() {
        let counter = CountingFilter::new();
        let clone = counter.clone();
        let aliases = Aliases::new();
        clone.apply(&json!(1), &[], &aliases).unwrap();
        clone.apply(&json!(2), &[], &aliases).unwrap();
        assert_eq!(counter.calls(), 2);
    }

    #[test]
    fn failing_filter_rejects() {
        assert_eq!(
            failing("no").apply(&json!(1), &[], &Aliases::new()),
            Err(Error::filter("no"))
        );
    }

    #[test]
    fn assert_filtered_macro() {
        let mut filtered = Map::new();
        filtered.insert("a".into(), json!(true));
        let response = Response::new(filtered, vec![], Map::new());
        assert_filtered!(response, json!({"a": true}));
    }

    #[test]
    fn assert_rejected_macro() {
        let response = Response::new(Map::new(), vec!["bad".into()], Map::new());
        assert_rejected!(response);
        assert_rejected!(response, "bad");
    }

    #[test]
    fn macros_take_response_expressions() {
        let mut filtered = Map::new();
        filtered.insert("n".into(), json!(1));
        assert_filtered!(
            Response::new(filtered.clone(), vec![], Map::new()),
            json!({"n": 1})
        );
        assert_rejected!(Response::new(filtered.clone(), vec!["x".into()], Map::new()));
        assert_rejected!(Response::new(filtered, vec!["x".into()], Map::new()), "x");
    }

    #[test]
    #[should_panic(expected = "Expected failure")]
    fn assert_rejected_panics_on_success() {
        let response = Response::new(Map::new(), vec![], Map::new());
        assert_rejected!(response);
    }
}
