//! Validation type for accumulating field errors
//!
//! `Validation` is similar to `Result` but designed for the case where every problem
//! should be reported rather than only the first. The engine produces one `Validation`
//! per specification field and folds them together, so a form with three bad fields
//! yields three error lines from a single call. `ofArrays` folds its elements the same
//! way.
//!
//! # Examples
//!
//! ```
//! use sluice::Validation;
//!
//! let fields = vec![
//!     Validation::failure(vec!["Field 'a' was required and not present"]),
//!     Validation::success(("b", 1)),
//!     Validation::failure(vec!["Field 'c' with value 'x' is unknown"]),
//! ];
//!
//! assert_eq!(
//!     Validation::all_vec(fields),
//!     Validation::Failure(vec![
//!         "Field 'a' was required and not present",
//!         "Field 'c' with value 'x' is unknown",
//!     ])
//! );
//! ```

use crate::Semigroup;

/// Either a value or the errors collected on the way to it
///
/// `E` must implement [`Semigroup`] for [`all_vec`](Self::all_vec) to combine failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Fold validations in order.
    ///
    /// Succeeds with every value when nothing failed. Otherwise the errors of every
    /// failure are combined in iteration order and the successful values are dropped.
    pub fn all_vec<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut successes = Vec::new();
        let mut failure: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => successes.push(value),
                Validation::Failure(error) => {
                    failure = Some(match failure {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        match failure {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(successes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vec_empty() {
        let validations: Vec<Validation<i32, Vec<&str>>> = vec![];
        assert_eq!(Validation::all_vec(validations), Validation::Success(vec![]));
    }

    #[test]
    fn test_all_vec_keeps_success_order() {
        let validations = vec![
            Validation::<_, Vec<&str>>::success("a"),
            Validation::success("b"),
            Validation::success("c"),
        ];
        assert_eq!(
            Validation::all_vec(validations),
            Validation::Success(vec!["a", "b", "c"])
        );
    }

    #[test]
    fn test_all_vec_drops_successes_once_anything_fails() {
        let validations = vec![
            Validation::success(1),
            Validation::failure(vec!["Field 'n' was required and not present"]),
            Validation::success(2),
        ];
        assert_eq!(
            Validation::all_vec(validations),
            Validation::Failure(vec!["Field 'n' was required and not present"])
        );
    }

    #[test]
    fn test_all_vec_keeps_error_order() {
        let validations = vec![
            Validation::<i32, _>::failure(vec!["error1"]),
            Validation::success(1),
            Validation::failure(vec!["error2", "error3"]),
        ];
        assert_eq!(
            Validation::all_vec(validations),
            Validation::Failure(vec!["error1", "error2", "error3"])
        );
    }
}
