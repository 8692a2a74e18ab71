// ============================================================================
// domain/error.rs - BUSINESS RULE VIOLATIONS
// ============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A structurally valid request that breaks a domain rule.
///
/// Business errors are reported, never retried. Each one is its own leaf when
/// an aggregate error is flattened.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusinessError {
    // ========================================================================
    // 400-level equivalent
    // ========================================================================
    #[error("Invalid article id: '{id}'")]
    InvalidId { id: String },

    // ========================================================================
    // 404-level equivalent
    // ========================================================================
    #[error("Unknown article: '{id}'")]
    UnknownArticle { id: String },
}

impl BusinessError {
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    pub fn unknown_article(id: impl ToString) -> Self {
        Self::UnknownArticle { id: id.to_string() }
    }

    /// The identifier the rule was checked against.
    pub fn id(&self) -> &str {
        match self {
            Self::InvalidId { id } | Self::UnknownArticle { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_id() {
        assert!(BusinessError::invalid_id("nope").to_string().contains("nope"));
        assert!(
            BusinessError::unknown_article("x")
                .to_string()
                .contains("'x'")
        );
    }

    #[test]
    fn id_accessor_covers_every_variant() {
        assert_eq!(BusinessError::invalid_id("a").id(), "a");
        assert_eq!(BusinessError::unknown_article("b").id(), "b");
    }
}
