//! The outcome of one filter call
//!
//! A [`Response`] is read-only. Success and the joined error message are derived once,
//! when it is built: the call succeeded exactly when no error was collected.
//!
//! # Examples
//!
//! ```
//! use serde_json::{json, Map};
//! use sluice::Response;
//!
//! let mut filtered = Map::new();
//! filtered.insert("id".into(), json!(1));
//!
//! let ok = Response::new(filtered, vec![], Map::new());
//! assert!(ok.success());
//! assert_eq!(ok.error_message(), None);
//!
//! let failed = Response::new(Map::new(), vec!["a".into(), "b".into()], Map::new());
//! assert!(!failed.success());
//! assert_eq!(failed.filtered_value(), None);
//! assert_eq!(failed.error_message(), Some("a\nb"));
//! ```

use serde_json::{Map, Value};

use crate::Error;

/// Report of a filter call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Response {
    success: bool,
    filtered_value: Option<Map<String, Value>>,
    errors: Vec<String>,
    error_message: Option<String>,
    unknowns: Map<String, Value>,
}

impl Response {
    /// Build a report.
    ///
    /// `filtered` is dropped when `errors` is not empty.
    pub fn new(
        filtered: Map<String, Value>,
        errors: Vec<String>,
        unknowns: Map<String, Value>,
    ) -> Self {
        let success = errors.is_empty();
        let error_message = (!success).then(|| errors.join("\n"));
        Self {
            success,
            filtered_value: success.then_some(filtered),
            errors,
            error_message,
            unknowns,
        }
    }

    /// Whether every field passed.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The filtered fields, present only on success.
    pub fn filtered_value(&self) -> Option<&Map<String, Value>> {
        self.filtered_value.as_ref()
    }

    /// Every collected error, in report order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The errors joined with newlines, present only on failure.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Input fields the specification does not name, whether or not they were allowed.
    pub fn unknowns(&self) -> &Map<String, Value> {
        &self.unknowns
    }

    /// Positional form: `(success, filtered value, error message, unknowns)`.
    pub fn into_tuple(
        self,
    ) -> (
        bool,
        Option<Map<String, Value>>,
        Option<String>,
        Map<String, Value>,
    ) {
        (
            self.success,
            self.filtered_value,
            self.error_message,
            self.unknowns,
        )
    }

    /// The filtered fields, or the joined message as an [`Error::Filter`].
    pub fn into_result(self) -> Result<Map<String, Value>, Error> {
        match (self.filtered_value, self.error_message) {
            (Some(filtered), None) => Ok(filtered),
            (_, message) => Err(Error::filter(message.unwrap_or_default())),
        }
    }
}
