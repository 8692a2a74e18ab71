//! The article aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ArticleId, AuthorInfo};

/// A published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub author: AuthorInfo,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Assemble a new article with a fresh identity.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: AuthorInfo) -> Self {
        Self {
            id: ArticleId::new(),
            title: title.into(),
            content: content.into(),
            author,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Copy of this article with a new title and content.
    ///
    /// Identity, author and creation time are preserved.
    pub fn with_changes(&self, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            updated_at: Some(Utc::now()),
            ..self.clone()
        }
    }
}
