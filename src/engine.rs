//! The filter engine
//!
//! Reconciles a [`Specification`] with an input mapping in one pass:
//!
//! 1. Every specification field present in the input has its value threaded through the
//!    field's chain. The first rejecting step ends that field's chain and becomes one
//!    error line; the other fields still run.
//! 2. Every specification field absent from the input takes its default if it has one,
//!    is reported as missing if it is required, and is otherwise left out.
//! 3. Input fields the specification does not name are collected as unknowns and, unless
//!    allowed, reported one per line.
//!
//! Field errors are data: they end up in the [`Response`]. A broken specification or a
//! misused filter parameter is not, and aborts the call with an [`Error`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sluice::engine::filter_value;
//!
//! let response = filter_value(
//!     &json!({"id": [["uint"]], "name": [["string"]]}),
//!     &json!({"id": "12", "name": "", "extra": true}),
//!     &json!(null),
//! )
//! .unwrap();
//!
//! assert!(!response.success());
//! assert_eq!(
//!     response.error_message().unwrap(),
//!     "Field 'name' with value '' failed filtering, message 'Value '' with length '0' is \
//!      less than '1' or greater than '18446744073709551615''\n\
//!      Field 'extra' with value 'true' is unknown"
//! );
//! ```

use serde_json::{Map, Value};

use crate::aliases::{self, Aliases};
use crate::options::FilterOptions;
use crate::response::Response;
use crate::spec::{FieldRule, Specification};
use crate::validation::Validation;
use crate::value::export;
use crate::Error;

type FieldOutcome = Validation<Option<(String, Value)>, Vec<String>>;

/// Filter `input` against `spec` using the process-wide alias registry.
///
/// # Errors
///
/// [`Error::Configuration`] or [`Error::Domain`] when the specification cannot be run.
/// Rejected fields are reported in the [`Response`], not here.
pub fn filter(
    spec: &Specification,
    input: &Map<String, Value>,
    options: FilterOptions,
) -> Result<Response, Error> {
    filter_with_aliases(spec, input, options, &aliases::shared())
}

/// Filter `input` against `spec`, resolving aliases in `aliases` only.
pub fn filter_with_aliases(
    spec: &Specification,
    input: &Map<String, Value>,
    options: FilterOptions,
    aliases: &Aliases,
) -> Result<Response, Error> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        fields = spec.len(),
        inputs = input.len(),
        allow_unknowns = options.allow_unknowns,
        default_required = options.default_required,
        "filtering input"
    );

    let outcomes = spec
        .iter()
        .map(|(field, rule)| match input.get(field) {
            Some(raw) => run_chain(field, rule, raw, aliases),
            None => Ok(absent(field, rule, options)),
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let unknowns: Map<String, Value> = input
        .iter()
        .filter(|(field, _)| !spec.contains(field))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect();

    let (filtered, mut errors) = match Validation::all_vec(outcomes) {
        Validation::Success(entries) => (entries.into_iter().flatten().collect(), Vec::new()),
        Validation::Failure(errors) => (Map::new(), errors),
    };

    if !options.allow_unknowns {
        for (field, value) in &unknowns {
            #[cfg(feature = "tracing")]
            tracing::debug!(field = %field, "unknown field");

            errors.push(format!(
                "Field '{}' with value '{}' is unknown",
                field,
                export(value)
            ));
        }
    }

    Ok(Response::new(filtered, errors, unknowns))
}

/// Fully dynamic entry point: specification, input and options as values.
///
/// `options` may be `null` for the defaults. The input must be an object.
///
/// # Errors
///
/// [`Error::Configuration`] for malformed options, specification or input, plus
/// everything [`filter`] can return.
pub fn filter_value(spec: &Value, input: &Value, options: &Value) -> Result<Response, Error> {
    let options = FilterOptions::from_value(options)?;
    let spec = Specification::from_value(spec)?;
    let input = input.as_object().ok_or_else(|| {
        Error::configuration(format!("input must be an object, got {}", export(input)))
    })?;
    filter(&spec, input, options)
}

fn run_chain(
    field: &str,
    rule: &FieldRule,
    raw: &Value,
    aliases: &Aliases,
) -> Result<FieldOutcome, Error> {
    if rule.custom_error().is_some_and(|message| message.trim().is_empty()) {
        return Err(Error::configuration(format!(
            "error for field '{}' was not a non-empty string",
            field
        )));
    }

    let mut value = raw.clone();
    for step in rule.chain() {
        let Some(callable) = step.callable() else {
            continue;
        };
        let filter = aliases.resolve(callable, field)?;

        match filter.apply(&value, step.arguments(), aliases) {
            Ok(next) => value = next,
            Err(Error::Filter(message)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(field, step = %callable, "field rejected");

                let line = match rule.custom_error() {
                    Some(custom) => custom.replace("{value}", &export(&value)),
                    None => format!(
                        "Field '{}' with value '{}' failed filtering, message '{}'",
                        field,
                        export(&value),
                        message
                    ),
                };
                return Ok(Validation::failure(vec![line]));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(Validation::success(Some((field.to_string(), value))))
}

fn absent(field: &str, rule: &FieldRule, options: FilterOptions) -> FieldOutcome {
    match rule.default_value() {
        Some(default) => Validation::success(Some((field.to_string(), default.clone()))),
        None if rule.is_required(options.default_required) => Validation::failure(vec![
            format!("Field '{}' was required and not present", field),
        ]),
        None => Validation::success(None),
    }
}
