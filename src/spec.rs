//! Filter specifications
//!
//! A [`Specification`] maps field names to [`FieldRule`]s. A rule is an ordered chain of
//! [`Step`]s plus optional metadata: whether the field is required, a default for when it
//! is absent, and a custom error message replacing the generated one when the chain
//! rejects the value.
//!
//! A step's head is a [`Callable`]: either the name of an alias in the registry or a
//! filter held directly. Nothing else can be expressed, so a misconfigured step is
//! caught while the specification is built, not halfway through filtering.
//!
//! # Examples
//!
//! ## Typed builders
//!
//! ```
//! use serde_json::json;
//! use sluice::{FieldRule, Specification, Step};
//!
//! let spec = Specification::new()
//!     .field("id", FieldRule::new().step(Step::alias("uint")).required(true))
//!     .field(
//!         "name",
//!         FieldRule::new()
//!             .step(Step::alias("string").arg(false).arg(1).arg(64))
//!             .with_default(json!("anonymous")),
//!     );
//!
//! assert_eq!(spec.len(), 2);
//! assert!(spec.get("id").unwrap().is_required(false));
//! ```
//!
//! ## Dynamic form
//!
//! ```
//! use serde_json::json;
//! use sluice::Specification;
//!
//! let spec = Specification::from_value(&json!({
//!     "id": [["uint"]],
//!     "tags": {"required": false, "default": [], "filters": [["explode", ","]]},
//! }))
//! .unwrap();
//!
//! assert_eq!(spec.field_names().collect::<Vec<_>>(), vec!["id", "tags"]);
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::aliases::AliasName;
use crate::filters::Filter;
use crate::value::export;
use crate::Error;

/// The head of a step: what gets invoked.
#[derive(Clone)]
pub enum Callable {
    /// A name looked up in the alias registry when the step runs.
    Alias(AliasName),
    /// A filter held directly.
    Function(Arc<dyn Filter>),
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Alias(name) => f.debug_tuple("Alias").field(name).finish(),
            Callable::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Alias(name) => write!(f, "{}", name),
            Callable::Function(_) => f.write_str("<function>"),
        }
    }
}

/// One step of a chain: a callable and the extra arguments passed after the value.
///
/// A step without a callable is the identity and leaves the value untouched.
#[derive(Debug, Clone, Default)]
pub struct Step {
    callable: Option<Callable>,
    args: Vec<Value>,
}

impl Step {
    /// The empty step.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A step invoking a registry alias.
    pub fn alias(name: impl Into<AliasName>) -> Self {
        Self {
            callable: Some(Callable::Alias(name.into())),
            args: Vec::new(),
        }
    }

    /// A step invoking `filter` directly.
    pub fn function<F>(filter: F) -> Self
    where
        F: Filter + 'static,
    {
        Self::shared(Arc::new(filter))
    }

    /// A step invoking an already shared filter.
    pub fn shared(filter: Arc<dyn Filter>) -> Self {
        Self {
            callable: Some(Callable::Function(filter)),
            args: Vec::new(),
        }
    }

    /// Append one extra argument.
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several extra arguments.
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The callable, `None` for the identity step.
    pub fn callable(&self) -> Option<&Callable> {
        self.callable.as_ref()
    }

    /// The extra arguments.
    pub fn arguments(&self) -> &[Value] {
        &self.args
    }

    /// Whether the step leaves the value untouched.
    pub fn is_identity(&self) -> bool {
        self.callable.is_none()
    }
}

/// The chain and metadata for one field.
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    steps: Vec<Step>,
    required: Option<bool>,
    default: Option<Value>,
    error: Option<String>,
}

impl FieldRule {
    /// An empty rule: no steps, requiredness from the options, no default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the chain.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps to the chain.
    pub fn steps<I>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = Step>,
    {
        self.steps.extend(steps);
        self
    }

    /// Mark the field required (or explicitly optional).
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Value to use when the field is absent. Wins over `required`.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Message replacing the generated one when the chain rejects the value.
    ///
    /// `{value}` in the message is replaced with the value at the point of failure.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// The chain.
    pub fn chain(&self) -> &[Step] {
        &self.steps
    }

    /// Whether an absent field is an error, given the options' fallback.
    pub fn is_required(&self, default_required: bool) -> bool {
        self.required.unwrap_or(default_required)
    }

    /// The default for an absent field, if one was set (even `null`).
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The custom error message, if one was set.
    pub fn custom_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Field names mapped to their rules, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Specification {
    fields: IndexMap<String, FieldRule>,
}

impl Specification {
    /// An empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for `name`.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    /// The rule for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// Whether `name` has a rule.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields and rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse the dynamic form.
    ///
    /// The value must be an object. Each rule is either an array of steps, or an object
    /// with optional `required` (bool), `default` (anything), `error` (non-empty string)
    /// and `filters` (array of steps). Each step is an array whose first element is an
    /// alias name (string or integer) and whose remaining elements are arguments; an
    /// empty array is the identity step.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for a malformed shape or metadata, [`Error::Domain`] for a
    /// step head that cannot name a filter.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let map = value.as_object().ok_or_else(|| {
            Error::configuration(format!(
                "specification must be an object, got {}",
                export(value)
            ))
        })?;

        let fields = map
            .iter()
            .map(|(field, rule)| Ok((field.clone(), parse_rule(field, rule)?)))
            .collect::<Result<IndexMap<_, _>, Error>>()?;

        Ok(Self { fields })
    }
}

impl<S: Into<String>> FromIterator<(S, FieldRule)> for Specification {
    fn from_iter<I: IntoIterator<Item = (S, FieldRule)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }
}

fn parse_rule(field: &str, value: &Value) -> Result<FieldRule, Error> {
    let metadata = match value {
        Value::Array(_) => {
            return Ok(FieldRule {
                steps: parse_chain(field, value)?,
                ..FieldRule::default()
            })
        }
        Value::Object(map) => map,
        _ => {
            return Err(Error::configuration(format!(
                "Rule for field '{}' is not a sequence",
                field
            )))
        }
    };

    let mut rule = FieldRule::new();
    for (key, entry) in metadata {
        match key.as_str() {
            "required" => {
                let required = entry.as_bool().ok_or_else(|| {
                    Error::configuration(format!(
                        "'required' for field '{}' was not a bool",
                        field
                    ))
                })?;
                rule.required = Some(required);
            }
            "default" => rule.default = Some(entry.clone()),
            "error" => match entry {
                Value::String(message) if !message.trim().is_empty() => {
                    rule.error = Some(message.clone());
                }
                _ => {
                    return Err(Error::configuration(format!(
                        "error for field '{}' was not a non-empty string",
                        field
                    )))
                }
            },
            "filters" => rule.steps = parse_chain(field, entry)?,
            other => {
                return Err(Error::configuration(format!(
                    "unknown key '{}' in rule for field '{}'",
                    other, field
                )))
            }
        }
    }
    Ok(rule)
}

/// Parse an array of dynamic steps for `field`.
pub(crate) fn parse_chain(field: &str, value: &Value) -> Result<Vec<Step>, Error> {
    let steps = value.as_array().ok_or_else(|| {
        Error::configuration(format!("Rule for field '{}' is not a sequence", field))
    })?;
    steps.iter().map(|step| parse_step(field, step)).collect()
}

fn parse_step(field: &str, value: &Value) -> Result<Step, Error> {
    let parts = value.as_array().ok_or_else(|| {
        Error::configuration(format!(
            "Step '{}' for field '{}' is not a sequence",
            export(value),
            field
        ))
    })?;

    let Some((head, args)) = parts.split_first() else {
        return Ok(Step::identity());
    };
    let name = AliasName::try_from(head).map_err(|_| {
        Error::domain(format!(
            "Function '{}' for field '{}' is not callable",
            export(head),
            field
        ))
    })?;

    Ok(Step::alias(name).args(args.iter().cloned()))
}
