//! Reusable pre-dispatch validation rules
//!
//! A method's `validate()` is a pure function of its fields. These helpers
//! cover the rules that recur across operations so that each method states
//! its preconditions in one or two lines:
//!
//! ```rust
//! use botwire_core::validation;
//! use botwire_core::ValidationError;
//!
//! fn check(chat_id: &Option<i64>, url: &Option<String>, file: &Option<String>)
//!     -> Result<(), ValidationError>
//! {
//!     validation::require("chat_id", chat_id)?;
//!     validation::mutually_exclusive("url", url, "file", file)?;
//!     Ok(())
//! }
//!
//! assert!(check(&Some(1), &None, &None).is_ok());
//! assert!(check(&None, &None, &None).is_err());
//! ```
//!
//! Each helper reports the first violation only. The caller decides the order
//! in which rules are checked.

use crate::error::ValidationError;
use std::fmt::Display;

/// Fail when a required field is unset
pub fn require<T>(field: &str, value: &Option<T>) -> Result<(), ValidationError> {
    match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::missing(field)),
    }
}

/// Fail when both fields are set
pub fn mutually_exclusive<A, B>(
    first: &str,
    first_value: &Option<A>,
    second: &str,
    second_value: &Option<B>,
) -> Result<(), ValidationError> {
    if first_value.is_some() && second_value.is_some() {
        Err(ValidationError::conflict(first, second))
    } else {
        Ok(())
    }
}

/// Fail when a string field is set but empty (or only whitespace)
pub fn non_empty(field: &str, value: &Option<String>) -> Result<(), ValidationError> {
    match value {
        Some(text) if text.trim().is_empty() => {
            Err(ValidationError::new(field, "must not be empty"))
        }
        _ => Ok(()),
    }
}

/// Fail when a set value falls outside `min..=max`
///
/// Unset values pass; combine with [`require`] for required fields.
pub fn in_range<T>(field: &str, value: &Option<T>, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Display,
{
    match value {
        Some(v) if *v < min || *v > max => Err(ValidationError::new(
            field,
            format!("must be between {} and {}, got {}", min, max, v),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("chat_id", &Some(5)).is_ok());
        let error = require::<i64>("chat_id", &None).unwrap_err();
        assert_eq!(error, ValidationError::missing("chat_id"));
    }

    #[test]
    fn test_mutually_exclusive() {
        let set: Option<String> = Some("x".into());
        let unset: Option<String> = None;

        assert!(mutually_exclusive("a", &set, "b", &unset).is_ok());
        assert!(mutually_exclusive("a", &unset, "b", &set).is_ok());
        assert!(mutually_exclusive("a", &unset, "b", &unset).is_ok());

        let error = mutually_exclusive("a", &set, "b", &Some(1)).unwrap_err();
        assert_eq!(error.field, "a, b");
    }

    #[test]
    fn test_non_empty() {
        assert!(non_empty("text", &None).is_ok());
        assert!(non_empty("text", &Some("hello".into())).is_ok());
        assert!(non_empty("text", &Some("   ".into())).is_err());
    }

    #[test]
    fn test_in_range() {
        assert!(in_range("limit", &None, 1, 100).is_ok());
        assert!(in_range("limit", &Some(1), 1, 100).is_ok());
        assert!(in_range("limit", &Some(100), 1, 100).is_ok());

        let error = in_range("limit", &Some(101), 1, 100).unwrap_err();
        assert_eq!(error.field, "limit");
        assert!(error.reason.contains("101"));
    }
}
