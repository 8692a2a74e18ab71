//! Domain value objects: ArticleId, AuthorInfo.
//!
//! # Design
//!
//! Pure value types with equality-by-value. Parsing an identifier is a
//! business rule (a malformed id is `InvalidId`, not a validation failure),
//! because messages only check that an id is present.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::error::BusinessError;

// ── ArticleId ────────────────────────────────────────────────────────────────

/// Identity of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, BusinessError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| BusinessError::invalid_id(raw))
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ArticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ArticleId {
    type Err = BusinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── AuthorInfo ───────────────────────────────────────────────────────────────

/// Author details resolved through the author directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub id: String,
    pub name: String,
}

impl AuthorInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for AuthorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        let id = ArticleId::new();
        assert_eq!(ArticleId::parse(&id.to_string()), Ok(id));
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        let id = ArticleId::new();
        assert_eq!(ArticleId::parse(&format!("  {id} ")), Ok(id));
    }

    #[test]
    fn malformed_id_is_a_business_error() {
        assert_eq!(
            "not-a-uuid".parse::<ArticleId>(),
            Err(BusinessError::invalid_id("not-a-uuid"))
        );
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ArticleId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
