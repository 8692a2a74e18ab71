//! Unified error handling for Quire Core.
//!
//! [`QuireError`] is the closed set of outcomes a handler may report:
//! validation, business, technical, or an aggregate of those. Every value is
//! plain data (cloneable, comparable, serialisable) so it can travel back to
//! the boundary unchanged.
//!
//! Wiring defects (a missing or duplicated handler) are deliberately absent:
//! they live in [`crate::application::bus`] as configuration failures.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::TechnicalError;
use crate::domain::{BusinessError, ValidationErrors};

/// Root error type for Quire Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "error", rename_all = "snake_case")]
pub enum QuireError {
    /// Field-level failures from one request attempt.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Heterogeneous aggregate; elements may themselves be aggregates.
    #[error("{0}")]
    Multiple(MultipleErrors),

    /// Domain rule violation discovered after structural validation.
    #[error("{0}")]
    Business(BusinessError),

    /// Neutralised failure of an infrastructure collaborator.
    #[error("{0}")]
    Technical(TechnicalError),
}

impl QuireError {
    /// Aggregate several errors, preserving order.
    pub fn multiple(errors: impl IntoIterator<Item = QuireError>) -> Self {
        Self::Multiple(MultipleErrors::new(errors))
    }

    /// Error category for logging and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Multiple(_) => ErrorCategory::Multiple,
            Self::Business(_) => ErrorCategory::Business,
            Self::Technical(_) => ErrorCategory::Technical,
        }
    }

    /// Leaf errors, depth-first and left-to-right.
    ///
    /// Aggregates are expanded recursively. A `Validation` error stays a
    /// single leaf no matter how many field failures it holds.
    pub fn leaves(&self) -> Vec<&QuireError> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Owned counterpart of [`Self::leaves`].
    pub fn flatten(self) -> Vec<QuireError> {
        match self {
            Self::Multiple(multiple) => multiple
                .errors
                .into_iter()
                .flat_map(QuireError::flatten)
                .collect(),
            leaf => vec![leaf],
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a QuireError>) {
        match self {
            Self::Multiple(multiple) => {
                for error in &multiple.errors {
                    error.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}

/// An ordered aggregate of errors from independent sub-operations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultipleErrors {
    errors: Vec<QuireError>,
}

impl MultipleErrors {
    pub fn new(errors: impl IntoIterator<Item = QuireError>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
        }
    }

    pub fn errors(&self) -> &[QuireError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: QuireError) {
        self.errors.push(error);
    }
}

impl fmt::Display for MultipleErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors occurred", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultipleErrors {}

impl FromIterator<QuireError> for MultipleErrors {
    fn from_iter<I: IntoIterator<Item = QuireError>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<ValidationErrors> for QuireError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<MultipleErrors> for QuireError {
    fn from(errors: MultipleErrors) -> Self {
        Self::Multiple(errors)
    }
}

impl From<BusinessError> for QuireError {
    fn from(error: BusinessError) -> Self {
        Self::Business(error)
    }
}

impl From<TechnicalError> for QuireError {
    fn from(error: TechnicalError) -> Self {
        Self::Technical(error)
    }
}

/// Error categories for logging and display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Business,
    Technical,
    Multiple,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Business => "business",
            Self::Technical => "technical",
            Self::Multiple => "multiple",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient result type alias.
pub type QuireResult<T> = Result<T, QuireError>;
