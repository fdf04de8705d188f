//! Engine options
//!
//! Two switches steer how the engine reconciles input with a specification:
//!
//! - `allow_unknowns`: when false (the default) any input field the specification does
//!   not name is reported as an error
//! - `default_required`: requiredness for rules that do not say either way
//!
//! Options can be built in code, parsed from a dynamic value, or (with the `serde`
//! feature) deserialized from any serde format.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use sluice::FilterOptions;
//!
//! let options = FilterOptions::new().with_allow_unknowns(true);
//! assert!(options.allow_unknowns);
//!
//! let parsed = FilterOptions::from_value(&json!({"defaultRequired": true})).unwrap();
//! assert!(parsed.default_required);
//! assert!(!parsed.allow_unknowns);
//! ```

use serde_json::Value;

use crate::Error;

/// Options for one engine call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct FilterOptions {
    /// Accept input fields that are not in the specification.
    pub allow_unknowns: bool,
    /// Requiredness for rules that omit `required`.
    pub default_required: bool,
}

impl FilterOptions {
    /// Options with both switches off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `allow_unknowns`.
    pub fn with_allow_unknowns(mut self, allow_unknowns: bool) -> Self {
        self.allow_unknowns = allow_unknowns;
        self
    }

    /// Set `default_required`.
    pub fn with_default_required(mut self, default_required: bool) -> Self {
        self.default_required = default_required;
        self
    }

    /// Parse options from a dynamic value.
    ///
    /// `null` means all defaults. Otherwise the value must be an object whose
    /// `allowUnknowns` and `defaultRequired` entries, when present, are booleans. Other
    /// keys are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when the value is not an object or an option is not a
    /// boolean.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(Error::configuration(format!(
                    "options must be an object, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            allow_unknowns: flag(map.get("allowUnknowns"), "allowUnknowns")?,
            default_required: flag(map.get("defaultRequired"), "defaultRequired")?,
        })
    }
}

fn flag(value: Option<&Value>, name: &str) -> Result<bool, Error> {
    match value {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(Error::configuration(format!("{} option was not a bool", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_false() {
        let options = FilterOptions::new();
        assert!(!options.allow_unknowns);
        assert!(!options.default_required);
    }

    #[test]
    fn test_builder() {
        let options = FilterOptions::new()
            .with_allow_unknowns(true)
            .with_default_required(true);
        assert_eq!(
            options,
            FilterOptions {
                allow_unknowns: true,
                default_required: true
            }
        );
    }

    #[test]
    fn test_from_value_absent_keys_default() {
        assert_eq!(
            FilterOptions::from_value(&json!({})).unwrap(),
            FilterOptions::default()
        );
        assert_eq!(
            FilterOptions::from_value(&Value::Null).unwrap(),
            FilterOptions::default()
        );
    }

    #[test]
    fn test_from_value_rejects_non_bool() {
        let err = FilterOptions::from_value(&json!({"allowUnknowns": 1})).unwrap_err();
        assert_eq!(
            err,
            Error::configuration("allowUnknowns option was not a bool")
        );

        let err = FilterOptions::from_value(&json!({"defaultRequired": "true"})).unwrap_err();
        assert_eq!(
            err,
            Error::configuration("defaultRequired option was not a bool")
        );
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = FilterOptions::from_value(&json!([true])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let options: FilterOptions =
            serde_json::from_value(json!({"allowUnknowns": true})).unwrap();
        assert!(options.allow_unknowns);
        assert!(!options.default_required);
    }
}
