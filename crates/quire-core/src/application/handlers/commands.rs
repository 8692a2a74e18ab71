//! Handlers for state-changing article messages.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        bus::Handler,
        chain::Chain,
        messages::{CreateArticle, DeleteArticle, UpdateArticle},
        ports::{ArticleStore, AuthorDirectory},
    },
    domain::{Article, ArticleId},
    error::QuireResult,
};

/// Looks up the author, assembles the article, then persists it.
pub struct CreateArticleHandler {
    store: Arc<dyn ArticleStore>,
    authors: Arc<dyn AuthorDirectory>,
}

impl CreateArticleHandler {
    pub fn new(store: Arc<dyn ArticleStore>, authors: Arc<dyn AuthorDirectory>) -> Self {
        Self { store, authors }
    }
}

impl Handler<CreateArticle> for CreateArticleHandler {
    #[instrument(skip_all, fields(author_id = %command.author_id()))]
    fn handle(&self, command: CreateArticle) -> QuireResult<Article> {
        let article = Chain::start(command)
            .then("lookup_author", |cmd| {
                let author = self.authors.lookup(cmd.author_id())?;
                Ok((cmd, author))
            })
            .map(|(cmd, author)| Article::new(cmd.title(), cmd.content(), author))
            .then("persist", |article| {
                self.store.save(&article)?;
                Ok(article)
            })
            .finish()?;

        info!(article_id = %article.id, "Article created");
        Ok(article)
    }
}

/// Replaces title and content of an existing article.
pub struct UpdateArticleHandler {
    store: Arc<dyn ArticleStore>,
}

impl UpdateArticleHandler {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}

impl Handler<UpdateArticle> for UpdateArticleHandler {
    #[instrument(skip_all, fields(article_id = %command.id()))]
    fn handle(&self, command: UpdateArticle) -> QuireResult<Article> {
        Chain::start(command)
            .then("parse_id", |cmd| Ok((ArticleId::parse(cmd.id())?, cmd)))
            .then("find", |(id, cmd)| Ok((self.store.find(&id)?, cmd)))
            .map(|(existing, cmd)| existing.with_changes(cmd.title(), cmd.content()))
            .then("persist", |article| {
                self.store.update(&article)?;
                Ok(article)
            })
            .finish()
    }
}

/// Removes an article.
pub struct DeleteArticleHandler {
    store: Arc<dyn ArticleStore>,
}

impl DeleteArticleHandler {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}

impl Handler<DeleteArticle> for DeleteArticleHandler {
    #[instrument(skip_all, fields(article_id = %command.id()))]
    fn handle(&self, command: DeleteArticle) -> QuireResult<ArticleId> {
        Chain::start(command)
            .then("parse_id", |cmd| Ok(ArticleId::parse(cmd.id())?))
            .then("delete", |id| {
                self.store.delete(&id)?;
                Ok(id)
            })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{
            TechnicalError,
            ports::output::{MockArticleStore, MockAuthorDirectory},
        },
        domain::{AuthorInfo, BusinessError},
        error::QuireError,
    };

    fn create(author: &str) -> CreateArticle {
        CreateArticle::new(Some("Hello"), Some("World"), Some(author)).unwrap()
    }

    fn stored(title: &str) -> Article {
        Article::new(title, "body", AuthorInfo::new("author-1", "Ada"))
    }

    #[test]
    fn create_looks_up_author_then_saves() {
        let mut authors = MockAuthorDirectory::new();
        authors
            .expect_lookup()
            .withf(|id: &str| id == "author-1")
            .times(1)
            .returning(|id| Ok(AuthorInfo::new(id, "Ada")));

        let mut store = MockArticleStore::new();
        store
            .expect_save()
            .withf(|a: &Article| a.title == "Hello" && a.author.name == "Ada")
            .times(1)
            .returning(|_| Ok(()));

        let handler = CreateArticleHandler::new(Arc::new(store), Arc::new(authors));
        let article = handler.handle(create("author-1")).unwrap();

        assert_eq!(article.title, "Hello");
        assert_eq!(article.content, "World");
        assert_eq!(article.author, AuthorInfo::new("author-1", "Ada"));
    }

    #[test]
    fn create_stops_when_author_lookup_fails() {
        let mut authors = MockAuthorDirectory::new();
        authors
            .expect_lookup()
            .returning(|_| Err(TechnicalError::something_went_wrong("directory down").into()));

        let mut store = MockArticleStore::new();
        store.expect_save().never();

        let handler = CreateArticleHandler::new(Arc::new(store), Arc::new(authors));
        let err = handler.handle(create("author-1")).unwrap_err();

        assert_eq!(
            err,
            QuireError::Technical(TechnicalError::something_went_wrong("directory down"))
        );
    }

    #[test]
    fn update_rejects_malformed_id_before_touching_the_store() {
        let mut store = MockArticleStore::new();
        store.expect_find().never();
        store.expect_update().never();

        let handler = UpdateArticleHandler::new(Arc::new(store));
        let cmd = UpdateArticle::new(Some("nope"), Some("t"), Some("c")).unwrap();

        assert_eq!(
            handler.handle(cmd).unwrap_err(),
            QuireError::from(BusinessError::invalid_id("nope"))
        );
    }

    #[test]
    fn update_of_unknown_article_is_not_persisted() {
        let id = ArticleId::new();
        let mut store = MockArticleStore::new();
        store
            .expect_find()
            .returning(|id| Err(QuireError::from(BusinessError::unknown_article(id))));
        store.expect_update().never();

        let handler = UpdateArticleHandler::new(Arc::new(store));
        let cmd = UpdateArticle::new(Some(&id.to_string()), Some("t"), Some("c")).unwrap();

        assert_eq!(
            handler.handle(cmd).unwrap_err(),
            QuireError::from(BusinessError::unknown_article(id))
        );
    }

    #[test]
    fn update_applies_changes_to_the_stored_article() {
        let existing = stored("old");
        let id = existing.id;
        let found = existing.clone();

        let mut store = MockArticleStore::new();
        store.expect_find().times(1).returning(move |_| Ok(found.clone()));
        store
            .expect_update()
            .withf(move |a: &Article| a.id == id && a.title == "new")
            .times(1)
            .returning(|_| Ok(()));

        let handler = UpdateArticleHandler::new(Arc::new(store));
        let cmd = UpdateArticle::new(Some(&id.to_string()), Some("new"), Some("fresh")).unwrap();
        let updated = handler.handle(cmd).unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.content, "fresh");
        assert_eq!(updated.author, existing.author);
    }

    #[test]
    fn delete_returns_the_removed_id() {
        let id = ArticleId::new();
        let mut store = MockArticleStore::new();
        store
            .expect_delete()
            .withf(move |d: &ArticleId| *d == id)
            .times(1)
            .returning(|_| Ok(()));

        let handler = DeleteArticleHandler::new(Arc::new(store));
        let cmd = DeleteArticle::new(Some(&id.to_string())).unwrap();

        assert_eq!(handler.handle(cmd), Ok(id));
    }
}
