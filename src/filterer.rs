//! Filterer: a specification bundled with its registry and options
//!
//! A [`Filterer`] is built once and executed many times. It never changes after
//! construction: [`with_aliases`](Filterer::with_aliases) and
//! [`with_specification`](Filterer::with_specification) return new instances, so one
//! can be shared freely between threads and call sites.
//!
//! Use [`execute`](Filterer::execute) for the full [`Response`], or
//! [`invoke`](Filterer::invoke) to get the filtered fields or an error. A `Filterer` is
//! itself a [`Filter`], so a whole specification can be a step of another chain.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Map, Value};
//! use sluice::{FieldRule, Filterer, Specification, Step};
//!
//! let filterer = Filterer::new(
//!     Specification::new().field("age", FieldRule::new().step(Step::alias("uint"))),
//! );
//!
//! let Value::Object(input) = json!({"age": "41"}) else { unreachable!() };
//! let filtered = filterer.invoke(&input).unwrap();
//! assert_eq!(filtered["age"], json!(41));
//! ```

use serde_json::{Map, Value};

use crate::engine::filter_with_aliases;
use crate::filters::Filter;
use crate::value::export;
use crate::{Aliases, Error, FilterOptions, Response, Specification};

/// A reusable, immutable filter configuration.
#[derive(Debug, Clone)]
pub struct Filterer {
    specification: Specification,
    aliases: Aliases,
    options: FilterOptions,
}

impl Filterer {
    /// Filter with `specification`, the built-in aliases and default options.
    pub fn new(specification: Specification) -> Self {
        Self {
            specification,
            aliases: Aliases::builtin(),
            options: FilterOptions::default(),
        }
    }

    /// Use `options` instead of the defaults.
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// Filter `input`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] or [`Error::Domain`] when the specification cannot run.
    pub fn execute(&self, input: &Map<String, Value>) -> Result<Response, Error> {
        filter_with_aliases(&self.specification, input, self.options, &self.aliases)
    }

    /// Filter `input` and return the filtered fields.
    ///
    /// # Errors
    ///
    /// Rejected input becomes an [`Error::Filter`] holding the joined message.
    pub fn invoke(&self, input: &Map<String, Value>) -> Result<Map<String, Value>, Error> {
        self.execute(input)?.into_result()
    }

    /// The registry steps resolve against.
    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// The specification.
    pub fn specification(&self) -> &Specification {
        &self.specification
    }

    /// The options.
    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// A copy resolving aliases in `aliases`.
    pub fn with_aliases(&self, aliases: Aliases) -> Self {
        Self {
            aliases,
            ..self.clone()
        }
    }

    /// A copy filtering with `specification`.
    pub fn with_specification(&self, specification: Specification) -> Self {
        Self {
            specification,
            ..self.clone()
        }
    }
}

impl Filter for Filterer {
    fn apply(&self, value: &Value, _args: &[Value], _aliases: &Aliases) -> Result<Value, Error> {
        match value {
            Value::Object(input) => self.invoke(input).map(Value::Object),
            other => Err(Error::filter(format!(
                "Value '{}' is not an array",
                export(other)
            ))),
        }
    }
}
