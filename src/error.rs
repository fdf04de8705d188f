//! Error type shared by filters, the alias registry and the engine
//!
//! Three kinds of failure exist, and they travel differently:
//!
//! - [`Error::Filter`]: a filter rejected the data it was given. The engine catches it,
//!   turns it into one line of the field's report and moves on to the next field.
//! - [`Error::Configuration`]: the API was misused (wrong option type, malformed rule,
//!   bad alias name or filter parameter). The whole engine call is aborted.
//! - [`Error::Domain`]: the specification is broken (a step that resolves to nothing, an
//!   alias registered twice). Also aborts the call.
//!
//! # Examples
//!
//! ```
//! use sluice::Error;
//!
//! let err = Error::filter("abc does not contain all digits");
//! assert!(err.is_filter());
//! assert_eq!(err.to_string(), "abc does not contain all digits");
//!
//! let err = Error::configuration("allowUnknowns option was not a bool");
//! assert!(!err.is_filter());
//! ```

use thiserror::Error;

/// Everything that can go wrong while building or running a filter specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input data was rejected by a filter.
    #[error("{0}")]
    Filter(String),
    /// The caller misused the API.
    #[error("{0}")]
    Configuration(String),
    /// The specification or registry is unusable.
    #[error("{0}")]
    Domain(String),
}

impl Error {
    /// Create a data rejection error.
    pub fn filter(message: impl Into<String>) -> Self {
        Error::Filter(message.into())
    }

    /// Create an API misuse error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Create a broken-specification error.
    pub fn domain(message: impl Into<String>) -> Self {
        Error::Domain(message.into())
    }

    /// Whether this is a per-field data rejection the engine reports instead of raising.
    pub fn is_filter(&self) -> bool {
        matches!(self, Error::Filter(_))
    }

    /// The human-readable message, whatever the kind.
    pub fn message(&self) -> &str {
        match self {
            Error::Filter(message) | Error::Configuration(message) | Error::Domain(message) => {
                message
            }
        }
    }
}
