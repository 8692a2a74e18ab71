//! Application layer errors.
//!
//! These represent failures of infrastructure collaborators reached through
//! ports, not business logic. Business rule violations are `BusinessError`
//! from `crate::domain`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// An unexpected failure in a dependency.
///
/// The message is opaque: the underlying cause is logged where it happens and
/// never travels with the value, so nothing sensitive reaches the boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TechnicalError {
    #[error("Something went wrong: {message}")]
    SomethingWentWrong { message: String },
}

impl TechnicalError {
    pub fn something_went_wrong(message: impl Into<String>) -> Self {
        Self::SomethingWentWrong {
            message: message.into(),
        }
    }

    /// Neutralise a collaborator failure.
    ///
    /// `source` is logged here; only `context` is kept.
    pub fn from_source<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error,
    {
        let message = context.into();
        error!(error = %source, context = %message, "Collaborator failure");
        Self::something_went_wrong(message)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::SomethingWentWrong { message } => message,
        }
    }
}
