//! Aggregate filters (`ofScalars`, `ofArrays`, `ofArray`)
//!
//! These run nested chains and specifications through the engine, so a filter can
//! validate every element of a list or every field of a nested object. Nested failures
//! are collected the same way the engine collects field failures and come back as one
//! [`Error::Filter`] whose message holds every line.
//!
//! Each filter has two forms. The alias form (`OfScalars::default()` and friends, what
//! the registry holds) reads its chain or specification from the step arguments in the
//! dynamic form. The typed form ([`each`], [`each_mapping`], [`mapping`]) carries them
//! already built and can hold direct function steps.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sluice::filters::aggregate;
//! use sluice::filters::Filter;
//! use sluice::{Aliases, Step};
//!
//! let aliases = Aliases::builtin();
//! let each_int = aggregate::each(vec![Step::alias("int")]);
//!
//! assert_eq!(
//!     each_int.apply(&json!(["1", " 2"]), &[], &aliases).unwrap(),
//!     json!([1, 2])
//! );
//! assert_eq!(
//!     each_int.apply(&json!(["1", "b"]), &[], &aliases).unwrap_err().to_string(),
//!     "Field '1' with value 'b' failed filtering, message 'b does not contain all digits, \
//!      optionally prepended by a '+' or '-' and optionally surrounded by whitespace'"
//! );
//! ```

use serde_json::{Map, Value};

use super::{Args, Filter};
use crate::engine::filter_with_aliases;
use crate::options::FilterOptions;
use crate::spec::{parse_chain, FieldRule, Specification, Step};
use crate::validation::Validation;
use crate::value::{entries, export, rebuild};
use crate::{Aliases, Error};

/// Run `steps` over every element of an array-like value, keeping keys and shape.
pub fn of_scalars(value: &Value, steps: &[Step], aliases: &Aliases) -> Result<Value, Error> {
    let items = entries(value).ok_or_else(|| not_an_array(value))?;

    let rule = FieldRule::new().steps(steps.iter().cloned());
    let spec: Specification = items
        .iter()
        .map(|(key, _)| (key.clone(), rule.clone()))
        .collect();
    let input: Map<String, Value> = items
        .into_iter()
        .map(|(key, item)| (key, item.clone()))
        .collect();

    let filtered = filter_with_aliases(&spec, &input, FilterOptions::default(), aliases)?
        .into_result()?;
    Ok(rebuild(value, filtered))
}

/// Run `spec` over every element of an array-like value of objects.
///
/// Elements that are not objects are reported by position and the rest are still
/// filtered.
pub fn of_arrays(value: &Value, spec: &Specification, aliases: &Aliases) -> Result<Value, Error> {
    let items = entries(value).ok_or_else(|| not_an_array(value))?;

    let mut outcomes = Vec::with_capacity(items.len());
    for (key, item) in items {
        let Value::Object(fields) = item else {
            outcomes.push(Validation::failure(vec![format!(
                "Value at position '{}' was not an array",
                key
            )]));
            continue;
        };
        let response = filter_with_aliases(spec, fields, FilterOptions::default(), aliases)?;
        outcomes.push(match response.into_result() {
            Ok(result) => Validation::success((key, Value::Object(result))),
            Err(err) => Validation::failure(vec![err.message().to_string()]),
        });
    }

    match Validation::all_vec(outcomes) {
        Validation::Success(filtered) => Ok(rebuild(value, filtered.into_iter().collect())),
        Validation::Failure(errors) => Err(Error::filter(errors.join("\n"))),
    }
}

/// Run `spec` over a single object.
pub fn of_array(value: &Value, spec: &Specification, aliases: &Aliases) -> Result<Value, Error> {
    let Value::Object(fields) = value else {
        return Err(not_an_array(value));
    };
    filter_with_aliases(spec, fields, FilterOptions::default(), aliases)?
        .into_result()
        .map(Value::Object)
}

fn not_an_array(value: &Value) -> Error {
    Error::filter(format!("Value '{}' is not an array", export(value)))
}

/// `ofScalars`: one chain applied to every element.
#[derive(Debug, Clone, Default)]
pub struct OfScalars {
    steps: Option<Vec<Step>>,
}

impl Filter for OfScalars {
    fn apply(&self, value: &Value, args: &[Value], aliases: &Aliases) -> Result<Value, Error> {
        match &self.steps {
            Some(steps) => of_scalars(value, steps, aliases),
            None => {
                let chain = Args::new("ofScalars", args).required(0, "filters")?;
                of_scalars(value, &parse_chain("ofScalars", chain)?, aliases)
            }
        }
    }
}

/// `ofArrays`: one specification applied to every element.
#[derive(Debug, Clone, Default)]
pub struct OfArrays {
    spec: Option<Specification>,
}

impl Filter for OfArrays {
    fn apply(&self, value: &Value, args: &[Value], aliases: &Aliases) -> Result<Value, Error> {
        match &self.spec {
            Some(spec) => of_arrays(value, spec, aliases),
            None => {
                let spec = Args::new("ofArrays", args).required(0, "spec")?;
                of_arrays(value, &Specification::from_value(spec)?, aliases)
            }
        }
    }
}

/// `ofArray`: a specification applied to one nested object.
#[derive(Debug, Clone, Default)]
pub struct OfArray {
    spec: Option<Specification>,
}

impl Filter for OfArray {
    fn apply(&self, value: &Value, args: &[Value], aliases: &Aliases) -> Result<Value, Error> {
        match &self.spec {
            Some(spec) => of_array(value, spec, aliases),
            None => {
                let spec = Args::new("ofArray", args).required(0, "spec")?;
                of_array(value, &Specification::from_value(spec)?, aliases)
            }
        }
    }
}

/// Typed `ofScalars` over an already built chain.
pub fn each(steps: Vec<Step>) -> OfScalars {
    OfScalars { steps: Some(steps) }
}

/// Typed `ofArrays` over an already built specification.
pub fn each_mapping(spec: Specification) -> OfArrays {
    OfArrays { spec: Some(spec) }
}

/// Typed `ofArray` over an already built specification.
pub fn mapping(spec: Specification) -> OfArray {
    OfArray { spec: Some(spec) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builtin() -> Aliases {
        Aliases::builtin()
    }

    #[test]
    fn test_of_scalars_alias_form() {
        let chain = json!([["float", false, null, null, true]]);
        assert_eq!(
            OfScalars::default()
                .apply(&json!({"a": "1.5", "b": 2}), &[chain], &builtin())
                .unwrap(),
            json!({"a": 1.5, "b": 2.0})
        );
    }

    #[test]
    fn test_of_scalars_collects_every_element() {
        let err = each(vec![Step::alias("uint")])
            .apply(&json!(["-1", "ok", "3"]), &[], &builtin())
            .unwrap_err();
        assert_eq!(
            err.message().lines().count(),
            2,
            "one line per rejected element: {}",
            err
        );
        assert!(err.message().starts_with("Field '0' with value '-1' failed filtering"));
    }

    #[test]
    fn test_of_scalars_requires_an_array() {
        assert_eq!(
            each(vec![]).apply(&json!("x"), &[], &builtin()).unwrap_err(),
            Error::filter("Value 'x' is not an array")
        );
        assert_eq!(
            each(vec![]).apply(&json!([]), &[], &builtin()).unwrap(),
            json!([])
        );
    }

    #[test]
    fn test_of_scalars_missing_chain_is_misuse() {
        assert!(matches!(
            OfScalars::default().apply(&json!([1]), &[], &builtin()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_of_arrays_reports_non_objects_and_filters_the_rest() {
        let spec = json!({"id": [["uint"]]});
        let err = OfArrays::default()
            .apply(
                &json!([{"id": "1"}, "x", {"id": "a"}]),
                &[spec.clone()],
                &builtin(),
            )
            .unwrap_err();
        let lines: Vec<&str> = err.message().lines().collect();
        assert_eq!(lines[0], "Value at position '1' was not an array");
        assert!(lines[1].starts_with("Field 'id' with value 'a' failed filtering"));

        assert_eq!(
            OfArrays::default()
                .apply(&json!([{"id": "1"}, {"id": 2}]), &[spec], &builtin())
                .unwrap(),
            json!([{"id": 1}, {"id": 2}])
        );
    }

    #[test]
    fn test_of_array_nested_unknowns_are_rejected() {
        let spec = Specification::new().field("a", FieldRule::new().step(Step::alias("bool")));
        let nested = mapping(spec);
        assert_eq!(
            nested
                .apply(&json!({"a": "TRUE"}), &[], &builtin())
                .unwrap(),
            json!({"a": true})
        );
        assert_eq!(
            nested
                .apply(&json!({"a": "true", "b": 1}), &[], &builtin())
                .unwrap_err(),
            Error::filter("Field 'b' with value '1' is unknown")
        );
        assert!(nested.apply(&json!([1]), &[], &builtin()).is_err());
    }

    #[test]
    fn test_nested_chains_use_the_callers_registry() {
        fn twice(value: &Value, _args: &[Value]) -> Result<Value, Error> {
            let n = value.as_i64().ok_or_else(|| Error::filter("not an int"))?;
            Ok(Value::from(n * 2))
        }

        let mut aliases = Aliases::new();
        aliases.register("twice", twice, false).unwrap();
        assert_eq!(
            each(vec![Step::alias("twice")])
                .apply(&json!([1, 2]), &[], &aliases)
                .unwrap(),
            json!([2, 4])
        );
        assert!(matches!(
            each(vec![Step::alias("int")]).apply(&json!([1]), &[], &aliases),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn test_each_mapping_typed() {
        let spec = Specification::new()
            .field("n", FieldRule::new().step(Step::alias("int")).required(true));
        assert_eq!(
            each_mapping(spec)
                .apply(&json!({"x": {"n": "5"}}), &[], &builtin())
                .unwrap(),
            json!({"x": {"n": 5}})
        );
    }
}
