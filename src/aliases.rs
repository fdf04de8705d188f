//! Alias registry
//!
//! An [`Aliases`] maps short names to filters so chains can say `["int", false, 0]`
//! instead of holding the function itself. [`Aliases::builtin`] carries the standard
//! set; callers add their own with [`Aliases::register`].
//!
//! Two ways to use a registry:
//!
//! - **Explicit instance**: build an `Aliases`, pass it to
//!   [`filter_with_aliases`](crate::engine::filter_with_aliases) or
//!   [`Filterer::with_aliases`](crate::Filterer::with_aliases). Nothing is shared, so
//!   tests and threads stay isolated.
//! - **Shared default**: the process-wide registry behind [`shared`], [`register`],
//!   [`replace_all`] and [`reset`]. [`filter`](crate::engine::filter) reads it. Changes
//!   are seen by every later call in the process.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use sluice::{Aliases, Error};
//!
//! fn upper(value: &Value, _args: &[Value]) -> Result<Value, Error> {
//!     match value {
//!         Value::String(s) => Ok(Value::String(s.to_uppercase())),
//!         other => Err(Error::filter(format!("{} is not a string", other))),
//!     }
//! }
//!
//! let mut aliases = Aliases::builtin();
//! aliases.register("upper", upper, false).unwrap();
//! assert!(aliases.contains("upper"));
//!
//! let err = aliases.register("int", upper, false).unwrap_err();
//! assert_eq!(err, Error::domain("Alias 'int' exists"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use indexmap::IndexMap;
use serde_json::Value;

use crate::filters::aggregate::{OfArray, OfArrays, OfScalars};
use crate::filters::{
    arrays, booleans, datetime, floats, ints, membership, strings, web, Filter,
};
use crate::spec::Callable;
use crate::value::export;
use crate::Error;

/// The name of an alias.
///
/// Names are strings. Integer names are accepted and stored as their decimal text, so
/// `5` and `"5"` are the same alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AliasName(String);

impl AliasName {
    /// The name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AliasName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AliasName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AliasName {
    fn from(name: &str) -> Self {
        AliasName(name.to_string())
    }
}

impl From<String> for AliasName {
    fn from(name: String) -> Self {
        AliasName(name)
    }
}

impl From<i64> for AliasName {
    fn from(name: i64) -> Self {
        AliasName(name.to_string())
    }
}

impl TryFrom<&Value> for AliasName {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(s) => Ok(AliasName(s.clone())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(AliasName(n.to_string())),
            other => Err(Error::configuration(format!(
                "Alias '{}' was not a string or int",
                export(other)
            ))),
        }
    }
}

/// A set of named filters.
#[derive(Clone, Default)]
pub struct Aliases {
    entries: IndexMap<AliasName, Arc<dyn Filter>>,
}

impl fmt::Debug for Aliases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl Aliases {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard filters under their usual names.
    pub fn builtin() -> Self {
        let entries = [
            entry("in", membership::filter_args),
            entry("ofScalars", OfScalars::default()),
            entry("ofArrays", OfArrays::default()),
            entry("ofArray", OfArray::default()),
            entry("url", web::url_args),
            entry("email", web::email_args),
            entry("explode", strings::explode_args),
            entry("flatten", arrays::flatten_args),
            entry("date", datetime::date_args),
            entry("timezone", datetime::timezone_args),
            entry("bool", booleans::filter_args),
            entry("int", ints::filter_args),
            entry("uint", ints::unsigned_args),
            entry("float", floats::filter_args),
            entry("string", strings::filter_args),
            entry("stringify", strings::stringify_args),
            entry("array", arrays::filter_args),
        ];

        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The filter registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.entries.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &AliasName> {
        self.entries.keys()
    }

    /// The whole mapping, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&AliasName, &Arc<dyn Filter>)> {
        self.entries.iter()
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `filter` under `name`.
    ///
    /// # Errors
    ///
    /// [`Error::Domain`] when `name` is taken and `overwrite` is false.
    pub fn register<F>(
        &mut self,
        name: impl Into<AliasName>,
        filter: F,
        overwrite: bool,
    ) -> Result<(), Error>
    where
        F: Filter + 'static,
    {
        self.register_arc(name, Arc::new(filter), overwrite)
    }

    /// Register an already shared filter under `name`.
    pub fn register_arc(
        &mut self,
        name: impl Into<AliasName>,
        filter: Arc<dyn Filter>,
        overwrite: bool,
    ) -> Result<(), Error> {
        let name = name.into();
        if !overwrite && self.entries.contains_key(&name) {
            return Err(Error::domain(format!("Alias '{}' exists", name)));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(alias = %name, overwrite, "registered filter alias");

        self.entries.insert(name, filter);
        Ok(())
    }

    /// Replace every alias with `entries`.
    ///
    /// Entries are registered one by one without overwriting, so a duplicate name fails
    /// the whole replacement. On failure the registry is left exactly as it was.
    pub fn replace_all<I, N>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (N, Arc<dyn Filter>)>,
        N: Into<AliasName>,
    {
        let mut replacement = Aliases::new();
        for (name, filter) in entries {
            replacement.register_arc(name, filter, false)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(count = replacement.len(), "replaced filter aliases");

        *self = replacement;
        Ok(())
    }

    /// Find the filter a step head refers to.
    ///
    /// # Errors
    ///
    /// [`Error::Domain`] when an alias is not registered.
    pub fn resolve(&self, callable: &Callable, field: &str) -> Result<Arc<dyn Filter>, Error> {
        match callable {
            Callable::Function(filter) => Ok(Arc::clone(filter)),
            Callable::Alias(name) => self.entries.get(name).cloned().ok_or_else(|| {
                Error::domain(format!(
                    "Function '{}' for field '{}' is not callable",
                    name, field
                ))
            }),
        }
    }
}

fn entry<F>(name: &str, filter: F) -> (AliasName, Arc<dyn Filter>)
where
    F: Filter + 'static,
{
    let filter: Arc<dyn Filter> = Arc::new(filter);
    (AliasName::from(name), filter)
}

static SHARED: LazyLock<RwLock<Aliases>> = LazyLock::new(|| RwLock::new(Aliases::builtin()));

/// A snapshot of the process-wide registry.
///
/// Later changes to the shared registry do not affect the snapshot.
pub fn shared() -> Aliases {
    SHARED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Register `filter` in the process-wide registry. See [`Aliases::register`].
pub fn register<F>(name: impl Into<AliasName>, filter: F, overwrite: bool) -> Result<(), Error>
where
    F: Filter + 'static,
{
    SHARED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, filter, overwrite)
}

/// Replace the process-wide registry. See [`Aliases::replace_all`].
pub fn replace_all<I, N>(entries: I) -> Result<(), Error>
where
    I: IntoIterator<Item = (N, Arc<dyn Filter>)>,
    N: Into<AliasName>,
{
    SHARED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace_all(entries)
}

/// Restore the process-wide registry to the built-in set.
pub fn reset() {
    *SHARED.write().unwrap_or_else(PoisonError::into_inner) = Aliases::builtin();
}
