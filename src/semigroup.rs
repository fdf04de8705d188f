//! Semigroup trait for combining accumulated errors
//!
//! A Semigroup is a type with an associative binary operation. The engine reports every
//! field problem from one call, so field errors are values that combine rather than
//! exceptions that stop at the first failure.
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use sluice::Semigroup;
//!
//! let first = vec!["Field 'a' was required and not present".to_string()];
//! let second = vec!["Field 'b' with value 'x' is unknown".to_string()];
//! assert_eq!(first.combine(second).len(), 2);
//! ```

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// `combine` takes `self` by value; clone first if the originals are still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

// Order-preserving: the left side's errors come first.
impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vec_semigroup_keeps_order() {
        let v1 = vec!["a", "b"];
        let v2 = vec!["c"];
        assert_eq!(v1.combine(v2), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_vec_semigroup_empty() {
        let v1: Vec<&str> = vec![];
        assert_eq!(v1.combine(vec!["x"]), vec!["x"]);
    }

    proptest! {
        #[test]
        fn prop_vec_associative(
            a in prop::collection::vec(any::<i32>(), 0..10),
            b in prop::collection::vec(any::<i32>(), 0..10),
            c in prop::collection::vec(any::<i32>(), 0..10),
        ) {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));
            prop_assert_eq!(left, right);
        }
    }
}
