//! # Sluice
//!
//! Declarative input filtering: describe each field as a chain of filters, run the whole
//! input through in one pass, get back either the coerced values or every problem at
//! once.
//!
//! ## Philosophy
//!
//! Input arrives loosely typed: form posts, query strings, decoded JSON. **Sluice**
//! coerces and validates it at the boundary so the rest of the program sees well-typed
//! values:
//! - Each field runs its own chain and stops at the first step that rejects it
//! - Fields are independent, so one bad field never hides another
//! - Rejected data is a report, a broken specification is an [`Error`]
//!
//! ## Quick Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::engine::filter_value;
//!
//! let spec = json!({
//!     "id": {"required": true, "filters": [["uint"]]},
//!     "score": [["float", false, 0, 100]],
//!     "tags": {"default": [], "filters": [["explode", ","]]},
//! });
//!
//! let response = filter_value(&spec, &json!({"id": " 12", "score": "99.5"}), &json!(null))
//!     .unwrap();
//! assert!(response.success());
//! assert_eq!(
//!     serde_json::Value::Object(response.filtered_value().unwrap().clone()),
//!     json!({"id": 12, "score": 99.5, "tags": []})
//! );
//!
//! let response = filter_value(&spec, &json!({"score": "lots"}), &json!(null)).unwrap();
//! assert_eq!(
//!     response.errors(),
//!     &[
//!         "Field 'id' was required and not present".to_string(),
//!         "Field 'score' with value 'lots' failed filtering, message 'lots does not pass \
//!          numeric check'"
//!             .to_string(),
//!     ]
//! );
//! ```
//!
//! ## Typed specifications
//!
//! ```rust
//! use serde_json::{json, Value};
//! use sluice::prelude::*;
//!
//! fn trim(value: &Value, _args: &[Value]) -> Result<Value, Error> {
//!     Ok(value.as_str().map(|s| Value::from(s.trim())).unwrap_or_else(|| value.clone()))
//! }
//!
//! let filterer = Filterer::new(
//!     Specification::new()
//!         .field(
//!             "email",
//!             FieldRule::new().step(Step::function(trim)).step(Step::alias("email")),
//!         )
//!         .field("admin", FieldRule::new().step(Step::alias("bool")).with_default(false)),
//! );
//!
//! let Value::Object(input) = json!({"email": " a@example.com "}) else { unreachable!() };
//! let filtered = filterer.invoke(&input).unwrap();
//! assert_eq!(filtered["email"], json!("a@example.com"));
//! assert_eq!(filtered["admin"], json!(false));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod aliases;
pub mod engine;
pub mod error;
pub mod filterer;
pub mod filters;
pub mod options;
pub mod response;
pub mod semigroup;
pub mod spec;
pub mod testing;
pub mod validation;
pub mod value;

// Re-exports
pub use aliases::{AliasName, Aliases};
pub use engine::{filter, filter_value, filter_with_aliases};
pub use error::Error;
pub use filterer::Filterer;
pub use filters::Filter;
pub use options::FilterOptions;
pub use response::Response;
pub use semigroup::Semigroup;
pub use spec::{Callable, FieldRule, Specification, Step};
pub use validation::Validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aliases::{AliasName, Aliases};
    pub use crate::engine::{filter, filter_value, filter_with_aliases};
    pub use crate::error::Error;
    pub use crate::filterer::Filterer;
    pub use crate::filters::Filter;
    pub use crate::options::FilterOptions;
    pub use crate::response::Response;
    pub use crate::semigroup::Semigroup;
    pub use crate::spec::{Callable, FieldRule, Specification, Step};
    pub use crate::validation::Validation;
}
