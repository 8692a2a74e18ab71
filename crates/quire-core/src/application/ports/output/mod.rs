//! Driven (output) ports - implemented by infrastructure.
//!
//! Every method reports failure as a [`QuireError`](crate::error::QuireError)
//! value: an absent article is `BusinessError::UnknownArticle`, anything
//! unexpected is `TechnicalError::SomethingWentWrong`.

use crate::domain::{Article, ArticleId, AuthorInfo};
use crate::error::QuireResult;

/// Port for article persistence.
///
/// Implemented by:
/// - `quire_adapters::InMemoryArticleStore`
#[cfg_attr(test, mockall::automock)]
pub trait ArticleStore: Send + Sync {
    /// Fetch one article.
    fn find(&self, id: &ArticleId) -> QuireResult<Article>;

    /// Store a new article.
    fn save(&self, article: &Article) -> QuireResult<()>;

    /// Replace an existing article.
    fn update(&self, article: &Article) -> QuireResult<()>;

    /// Remove an existing article.
    fn delete(&self, id: &ArticleId) -> QuireResult<()>;

    /// Every stored article.
    fn find_all(&self) -> QuireResult<Vec<Article>>;
}

/// Port for author lookup.
///
/// Implemented by:
/// - `quire_adapters::StubAuthorDirectory`
#[cfg_attr(test, mockall::automock)]
pub trait AuthorDirectory: Send + Sync {
    fn lookup(&self, author_id: &str) -> QuireResult<AuthorInfo>;
}
