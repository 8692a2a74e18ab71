//! Field-level validation with error accumulation.
//!
//! Independent checks never short-circuit each other: every failing field is
//! reported, in the order the checks were declared. Within a single field,
//! checks are chained with [`Result::and_then`] so that e.g. a missing title
//! is reported once as `CannotBeNull` rather than also as `MustHaveContent`.
//!
//! ```rust
//! use quire_core::domain::validation::{Combine, has_content, required};
//!
//! let title: Option<&str> = None;
//! let body: Option<&str> = Some("   ");
//!
//! let result = (
//!     required("title", title).and_then(|t| has_content("title", t)),
//!     required("body", body).and_then(|b| has_content("body", b)),
//! )
//!     .combine();
//!
//! assert_eq!(result.unwrap_err().len(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{subject} cannot be null")]
    CannotBeNull { subject: String },

    #[error("{subject} cannot be empty")]
    CannotBeEmpty { subject: String },

    #[error("{field_name} must have content")]
    MustHaveContent { field_name: String },

    #[error("invalid value '{value}'")]
    Invalid { value: String },
}

impl ValidationError {
    pub fn cannot_be_null(subject: impl Into<String>) -> Self {
        Self::CannotBeNull {
            subject: subject.into(),
        }
    }

    pub fn cannot_be_empty(subject: impl Into<String>) -> Self {
        Self::CannotBeEmpty {
            subject: subject.into(),
        }
    }

    pub fn must_have_content(field_name: impl Into<String>) -> Self {
        Self::MustHaveContent {
            field_name: field_name.into(),
        }
    }

    pub fn invalid(value: impl Into<String>) -> Self {
        Self::Invalid {
            value: value.into(),
        }
    }
}

/// One or more validation failures collected from a single request attempt.
///
/// Never empty: the only ways to build one go through a failing check, and
/// deserializing an empty list fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValidationErrors")]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

#[derive(Deserialize)]
struct RawValidationErrors {
    errors: Vec<ValidationError>,
}

impl TryFrom<RawValidationErrors> for ValidationErrors {
    type Error = &'static str;

    fn try_from(raw: RawValidationErrors) -> Result<Self, Self::Error> {
        Self::from_vec(raw.errors).ok_or("validation errors cannot be empty")
    }
}

impl ValidationErrors {
    /// Wrap a single failure.
    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Build from a list of failures; `None` when the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// All messages joined with `", "`.
    pub fn joined_messages(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined_messages())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============================================================================
// Accumulator
// ============================================================================

/// Explicit failure accumulator.
///
/// Starts empty, appends on each failed check, and materialises a success
/// only if nothing was appended.
#[derive(Debug, Default)]
pub struct Accumulator {
    errors: Vec<ValidationError>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one check, returning the value if it passed.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(error);
                None
            }
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Run `assemble` only if every check passed.
    pub fn finish<T>(self, assemble: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        match ValidationErrors::from_vec(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(assemble()),
        }
    }
}

/// Validate a dynamic list of independent checks, keeping every failure.
pub fn validate_all<T, I>(checks: I) -> Result<Vec<T>, ValidationErrors>
where
    I: IntoIterator<Item = Result<T, ValidationError>>,
{
    let mut acc = Accumulator::new();
    let values: Vec<T> = checks
        .into_iter()
        .filter_map(|check| acc.check(check))
        .collect();
    acc.finish(|| values)
}

// ============================================================================
// Tuple combinator
// ============================================================================

/// Combine a tuple of independent checks into a tuple of validated values.
pub trait Combine {
    type Output;

    fn combine(self) -> Result<Self::Output, ValidationErrors>;
}

impl Combine for () {
    type Output = ();

    fn combine(self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

macro_rules! impl_combine {
    ($($ty:ident => $var:ident),+) => {
        impl<$($ty),+> Combine for ($(Result<$ty, ValidationError>,)+) {
            type Output = ($($ty,)+);

            fn combine(self) -> Result<Self::Output, ValidationErrors> {
                match self {
                    ($(Ok($var),)+) => Ok(($($var,)+)),
                    // At least one check failed to reach this arm.
                    ($($var,)+) => Err(ValidationErrors {
                        errors: [$($var.err()),+].into_iter().flatten().collect(),
                    }),
                }
            }
        }
    };
}

impl_combine!(A => a);
impl_combine!(A => a, B => b);
impl_combine!(A => a, B => b, C => c);
impl_combine!(A => a, B => b, C => c, D => d);
impl_combine!(A => a, B => b, C => c, D => d, E => e);
impl_combine!(A => a, B => b, C => c, D => d, E => e, F => f);
impl_combine!(A => a, B => b, C => c, D => d, E => e, F => f, G => g);
impl_combine!(A => a, B => b, C => c, D => d, E => e, F => f, G => g, H => h);

// ============================================================================
// Stock validators
// ============================================================================

/// Reject a missing value.
pub fn required<T>(subject: &str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::cannot_be_null(subject))
}

/// Reject a zero-length string.
pub fn not_empty<S: AsRef<str>>(subject: &str, value: S) -> Result<S, ValidationError> {
    if value.as_ref().is_empty() {
        Err(ValidationError::cannot_be_empty(subject))
    } else {
        Ok(value)
    }
}

/// Reject an empty or whitespace-only string.
pub fn has_content<S: AsRef<str>>(field_name: &str, value: S) -> Result<S, ValidationError> {
    if value.as_ref().trim().is_empty() {
        Err(ValidationError::must_have_content(field_name))
    } else {
        Ok(value)
    }
}

/// Reject a value the predicate does not accept.
pub fn matches<S, P>(value: S, predicate: P) -> Result<S, ValidationError>
where
    S: AsRef<str>,
    P: FnOnce(&str) -> bool,
{
    if predicate(value.as_ref()) {
        Ok(value)
    } else {
        Err(ValidationError::invalid(value.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail(n: usize) -> Result<u32, ValidationError> {
        Err(ValidationError::invalid(format!("v{n}")))
    }

    #[test]
    fn zero_checks_succeed() {
        assert_eq!(().combine(), Ok(()));
        assert_eq!(validate_all(Vec::<Result<u8, _>>::new()), Ok(vec![]));
    }

    #[test]
    fn all_passing_checks_assemble() {
        let result = (
            Ok::<_, ValidationError>(1),
            Ok::<_, ValidationError>("two"),
            Ok::<_, ValidationError>(3_u8),
        )
            .combine();
        assert_eq!(result, Ok((1, "two", 3)));
    }

    #[test]
    fn failures_are_all_reported_in_declaration_order() {
        let result = (fail(1), Ok::<u32, ValidationError>(2), fail(3), fail(4)).combine();

        let errors = result.unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::invalid("v1"),
                ValidationError::invalid("v3"),
                ValidationError::invalid("v4"),
            ]
        );
    }

    #[test]
    fn m_failures_out_of_n_yield_exactly_m_errors() {
        for n in 1..=8_usize {
            for m in 1..=n {
                let checks = (0..n).map(|i| if i < m { fail(i) } else { Ok(i as u32) });
                let errors = validate_all(checks).unwrap_err();
                assert_eq!(errors.len(), m, "n={n} m={m}");
                let expected: Vec<_> = (0..m)
                    .map(|i| ValidationError::invalid(format!("v{i}")))
                    .collect();
                assert_eq!(errors.into_vec(), expected);
            }
        }
    }

    #[test]
    fn accumulator_skips_assembly_on_failure() {
        let mut acc = Accumulator::new();
        let a = acc.check(Ok::<_, ValidationError>(1));
        let b = acc.check(required::<u8>("b", None));
        assert_eq!(a, Some(1));
        assert_eq!(b, None);
        assert!(!acc.is_valid());

        let mut assembled = false;
        let result = acc.finish(|| assembled = true);
        assert!(result.is_err());
        assert!(!assembled);
    }

    #[test]
    fn stock_validators_pick_distinct_variants() {
        assert_eq!(
            required::<&str>("title", None),
            Err(ValidationError::cannot_be_null("title"))
        );
        assert_eq!(
            not_empty("id", ""),
            Err(ValidationError::cannot_be_empty("id"))
        );
        assert_eq!(
            has_content("content", "  \t"),
            Err(ValidationError::must_have_content("content"))
        );
        assert_eq!(
            matches("a b", |v| !v.contains(' ')),
            Err(ValidationError::invalid("a b"))
        );
        assert_eq!(has_content("content", "text"), Ok("text"));
    }

    #[test]
    fn joined_messages_use_comma_separator() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationError::cannot_be_null("title"),
            ValidationError::must_have_content("content"),
        ])
        .unwrap();
        assert_eq!(
            errors.to_string(),
            "title cannot be null, content must have content"
        );
    }

    #[test]
    fn from_vec_rejects_empty() {
        assert!(ValidationErrors::from_vec(vec![]).is_none());
    }

    #[test]
    fn empty_list_does_not_deserialize() {
        let err = serde_json::from_str::<ValidationErrors>(r#"{"errors":[]}"#).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn non_empty_list_deserializes() {
        let original = ValidationErrors::single(ValidationError::cannot_be_null("title"));
        let json = serde_json::to_string(&original).unwrap();

        let parsed: ValidationErrors = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, original);
    }
}
