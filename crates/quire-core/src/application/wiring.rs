//! Start-up registration of every article handler.
//!
//! Called once, single-threaded, before any request is served. The returned
//! buses are immutable and can be shared freely between threads.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::{
    bus::{CommandBus, DispatchError, QueryBus, RegistrationError},
    handlers::{
        CreateArticleHandler, DeleteArticleHandler, GetArticleHandler, ListArticlesHandler,
        UpdateArticleHandler,
    },
    messages::{CreateArticle, DeleteArticle, GetArticle, ListArticles, UpdateArticle},
    ports::{ArticleStore, AuthorDirectory},
};
use crate::domain::{Article, ArticleId};

/// The command and query buses for the article domain.
#[derive(Debug)]
pub struct ArticleBuses {
    pub commands: CommandBus,
    pub queries: QueryBus,
}

impl ArticleBuses {
    /// Register one handler per article message.
    #[instrument(skip_all)]
    pub fn wire(
        store: Arc<dyn ArticleStore>,
        authors: Arc<dyn AuthorDirectory>,
    ) -> Result<Self, RegistrationError> {
        let commands = CommandBus::builder()
            .register::<CreateArticle, _>(CreateArticleHandler::new(
                Arc::clone(&store),
                authors,
            ))?
            .register::<UpdateArticle, _>(UpdateArticleHandler::new(Arc::clone(&store)))?
            .register::<DeleteArticle, _>(DeleteArticleHandler::new(Arc::clone(&store)))?
            .build();

        let queries = QueryBus::builder()
            .register::<GetArticle, _>(GetArticleHandler::new(Arc::clone(&store)))?
            .register::<ListArticles, _>(ListArticlesHandler::new(store))?
            .build();

        info!(
            commands = commands.len(),
            queries = queries.len(),
            "Article buses wired"
        );

        Ok(Self { commands, queries })
    }

    pub fn create(&self, command: CreateArticle) -> Result<Article, DispatchError> {
        self.commands.dispatch(command)
    }

    pub fn update(&self, command: UpdateArticle) -> Result<Article, DispatchError> {
        self.commands.dispatch(command)
    }

    pub fn delete(&self, command: DeleteArticle) -> Result<ArticleId, DispatchError> {
        self.commands.dispatch(command)
    }

    pub fn get(&self, query: GetArticle) -> Result<Article, DispatchError> {
        self.queries.dispatch(query)
    }

    pub fn list(&self) -> Result<Vec<Article>, DispatchError> {
        self.queries.dispatch(ListArticles)
    }
}
