//! Positional step arguments
//!
//! Aliased filters receive their parameters as the step's extra values. `Args` reads
//! them by position, treats `null` as "use the default" and turns a wrong type into an
//! [`Error::Configuration`] naming the filter and parameter.

use serde_json::Value;

use crate::Error;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Args<'a> {
    filter: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(filter: &'static str, values: &'a [Value]) -> Self {
        Self { filter, values }
    }

    fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &str, expected: &str) -> Error {
        Error::configuration(format!(
            "{}: argument '{}' must be {}",
            self.filter, name, expected
        ))
    }

    pub(crate) fn required(&self, index: usize, name: &str) -> Result<&'a Value, Error> {
        self.get(index)
            .ok_or_else(|| self.invalid(name, "provided"))
    }

    pub(crate) fn bool(&self, index: usize, name: &str, default: bool) -> Result<bool, Error> {
        match self.get(index) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.invalid(name, "a boolean")),
        }
    }

    pub(crate) fn i64(&self, index: usize, name: &str) -> Result<Option<i64>, Error> {
        match self.get(index) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.invalid(name, "an integer")),
        }
    }

    pub(crate) fn usize(&self, index: usize, name: &str) -> Result<Option<usize>, Error> {
        match self.get(index) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(name, "a non-negative integer")),
        }
    }

    pub(crate) fn f64(&self, index: usize, name: &str) -> Result<Option<f64>, Error> {
        match self.get(index) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.invalid(name, "a number")),
        }
    }

    pub(crate) fn str(&self, index: usize, name: &str) -> Result<Option<&'a str>, Error> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(name, "a string")),
        }
    }

    pub(crate) fn strings(&self, index: usize, name: &str) -> Result<Option<Vec<String>>, Error> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| self.invalid(name, "an array of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(self.invalid(name, "an array of strings")),
        }
    }
}
