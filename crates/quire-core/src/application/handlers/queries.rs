//! Handlers for read-only article messages.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    application::{
        bus::Handler,
        chain::Chain,
        messages::{GetArticle, ListArticles},
        ports::ArticleStore,
    },
    domain::{Article, ArticleId},
    error::QuireResult,
};

/// Fetches one article by id.
pub struct GetArticleHandler {
    store: Arc<dyn ArticleStore>,
}

impl GetArticleHandler {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}

impl Handler<GetArticle> for GetArticleHandler {
    #[instrument(skip_all, fields(article_id = %query.id()))]
    fn handle(&self, query: GetArticle) -> QuireResult<Article> {
        Chain::start(query)
            .then("parse_id", |q| Ok(ArticleId::parse(q.id())?))
            .then("find", |id| self.store.find(&id))
            .finish()
    }
}

/// Fetches every article.
pub struct ListArticlesHandler {
    store: Arc<dyn ArticleStore>,
}

impl ListArticlesHandler {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}

impl Handler<ListArticles> for ListArticlesHandler {
    fn handle(&self, _query: ListArticles) -> QuireResult<Vec<Article>> {
        self.store.find_all()
    }
}
