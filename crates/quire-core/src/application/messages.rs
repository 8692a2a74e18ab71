//! Commands and queries understood by the article buses.
//!
//! Every message is built through a validating factory that reports all
//! failing fields at once. Fields are private: a constructed message is
//! valid by construction and is never re-validated.
//!
//! Identifier *format* is not checked here. A present but malformed id is a
//! business error (`InvalidId`) raised by the handler.

use crate::application::bus::{Message, Read, Write};
use crate::domain::{
    Article, ArticleId, ValidationError, ValidationErrors,
    validation::{Combine, has_content, matches, not_empty, required},
};

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

fn title(raw: Option<&str>) -> Result<String, ValidationError> {
    required("title", raw)
        .and_then(|t| has_content("title", t))
        .map(str::trim)
        .and_then(|t| matches(t, |t| t.chars().count() <= MAX_TITLE_CHARS))
        .map(str::to_owned)
}

fn content(raw: Option<&str>) -> Result<String, ValidationError> {
    required("content", raw)
        .and_then(|c| has_content("content", c))
        .map(str::to_owned)
}

fn author_id(raw: Option<&str>) -> Result<String, ValidationError> {
    required("authorId", raw)
        .and_then(|a| not_empty("authorId", a))
        .and_then(|a| matches(a, |a| !a.chars().any(char::is_whitespace)))
        .map(str::to_owned)
}

fn article_id(raw: Option<&str>) -> Result<String, ValidationError> {
    required("id", raw)
        .and_then(|id| not_empty("id", id))
        .map(str::to_owned)
}

// ── Commands ─────────────────────────────────────────────────────────────────

/// Publish a new article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArticle {
    title: String,
    content: String,
    author_id: String,
}

impl CreateArticle {
    pub fn new(
        title_raw: Option<&str>,
        content_raw: Option<&str>,
        author_id_raw: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        (title(title_raw), content(content_raw), author_id(author_id_raw))
            .combine()
            .map(|(title, content, author_id)| Self {
                title,
                content,
                author_id,
            })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }
}

impl Message for CreateArticle {
    type Output = Article;
    type Intent = Write;
}

/// Replace the title and content of an existing article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArticle {
    id: String,
    title: String,
    content: String,
}

impl UpdateArticle {
    pub fn new(
        id_raw: Option<&str>,
        title_raw: Option<&str>,
        content_raw: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        (article_id(id_raw), title(title_raw), content(content_raw))
            .combine()
            .map(|(id, title, content)| Self { id, title, content })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Message for UpdateArticle {
    type Output = Article;
    type Intent = Write;
}

/// Remove an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteArticle {
    id: String,
}

impl DeleteArticle {
    pub fn new(id_raw: Option<&str>) -> Result<Self, ValidationErrors> {
        (article_id(id_raw),).combine().map(|(id,)| Self { id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Message for DeleteArticle {
    type Output = ArticleId;
    type Intent = Write;
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Fetch one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetArticle {
    id: String,
}

impl GetArticle {
    pub fn new(id_raw: Option<&str>) -> Result<Self, ValidationErrors> {
        (article_id(id_raw),).combine().map(|(id,)| Self { id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Message for GetArticle {
    type Output = Article;
    type Intent = Read;
}

/// Fetch every article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListArticles;

impl Message for ListArticles {
    type Output = Vec<Article>;
    type Intent = Read;
}
