//! Filters: functions from a raw value to a filtered value
//!
//! A filter receives the threaded value, the extra arguments of its step and the alias
//! registry of the running call. It returns the new value or an [`Error`]:
//! [`Error::Filter`] when the data is unacceptable, [`Error::Configuration`] when the
//! arguments themselves are wrong.
//!
//! Plain functions and closures with the signature
//! `Fn(&Value, &[Value]) -> Result<Value, Error>` are filters. Filters that need to run
//! nested chains (the [`aggregate`] family) implement the trait directly to get at the
//! registry.
//!
//! # Example
//!
//! ```rust
//! use serde_json::{json, Value};
//! use sluice::filters::Filter;
//! use sluice::{Aliases, Error};
//!
//! fn trim(value: &Value, _args: &[Value]) -> Result<Value, Error> {
//!     match value {
//!         Value::String(s) => Ok(Value::String(s.trim().to_string())),
//!         other => Ok(other.clone()),
//!     }
//! }
//!
//! let aliases = Aliases::builtin();
//! assert_eq!(trim.apply(&json!("  a "), &[], &aliases).unwrap(), json!("a"));
//! ```

use serde_json::Value;

use crate::{Aliases, Error};

pub mod aggregate;
mod args;
pub mod arrays;
pub mod booleans;
pub mod datetime;
pub mod floats;
pub mod ints;
pub mod membership;
pub mod strings;
pub mod web;

pub(crate) use args::Args;

/// Characters stripped from the ends of string input before parsing.
const BLANK: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trim ASCII blanks only; other Unicode whitespace is part of the value.
pub(crate) fn trim_blank(s: &str) -> &str {
    s.trim_matches(BLANK)
}

/// A step function the engine can thread a value through.
pub trait Filter: Send + Sync {
    /// Filter `value` given the step's extra `args`.
    fn apply(&self, value: &Value, args: &[Value], aliases: &Aliases) -> Result<Value, Error>;
}

// Blanket impl for functions and closures
impl<F> Filter for F
where
    F: Fn(&Value, &[Value]) -> Result<Value, Error> + Send + Sync,
{
    #[inline]
    fn apply(&self, value: &Value, args: &[Value], _aliases: &Aliases) -> Result<Value, Error> {
        self(value, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_blank_keeps_unicode_spaces() {
        assert_eq!(trim_blank(" \t\n\r\0\x0B12 \n"), "12");
        assert_eq!(trim_blank("\u{a0}12\u{3000}"), "\u{a0}12\u{3000}");
    }
}
