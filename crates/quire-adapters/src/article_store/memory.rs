//! In-memory article store, optionally seeded from a JSON file.

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use thiserror::Error;
use tracing::{debug, info, instrument};

use quire_core::{
    application::{TechnicalError, ports::ArticleStore},
    domain::{Article, ArticleId, BusinessError},
    error::QuireResult,
};

/// Thread-safe in-memory article store.
///
/// Stands in for a database: nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArticleStore {
    inner: Arc<RwLock<HashMap<ArticleId, Article>>>,
}

/// Why a seed file could not be loaded. Never leaves this module; callers
/// see a neutralised [`TechnicalError`].
#[derive(Debug, Error)]
enum SeedError {
    #[error("cannot read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file is not a JSON array of articles: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InMemoryArticleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `articles`.
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let map = articles.into_iter().map(|a| (a.id, a)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Create a store from a JSON array of articles.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_seed(path: impl AsRef<Path>) -> QuireResult<Self> {
        let articles = read_seed(path.as_ref())
            .map_err(|e| TechnicalError::from_source("article seed could not be loaded", e))?;
        info!(count = articles.len(), "Article seed loaded");
        Ok(Self::with_articles(articles))
    }

    /// Number of stored articles. Fails like every other read once the
    /// lock is poisoned.
    pub fn len(&self) -> QuireResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> QuireResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Remove every article.
    pub fn clear(&self) -> QuireResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> QuireResult<RwLockReadGuard<'_, HashMap<ArticleId, Article>>> {
        self.inner
            .read()
            .map_err(|_| TechnicalError::something_went_wrong("article store lock poisoned").into())
    }

    fn write(&self) -> QuireResult<RwLockWriteGuard<'_, HashMap<ArticleId, Article>>> {
        self.inner
            .write()
            .map_err(|_| TechnicalError::something_went_wrong("article store lock poisoned").into())
    }
}

fn read_seed(path: &Path) -> Result<Vec<Article>, SeedError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl ArticleStore for InMemoryArticleStore {
    fn find(&self, id: &ArticleId) -> QuireResult<Article> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| BusinessError::unknown_article(id).into())
    }

    fn save(&self, article: &Article) -> QuireResult<()> {
        self.write()?.insert(article.id, article.clone());
        debug!(article_id = %article.id, "Article saved");
        Ok(())
    }

    fn update(&self, article: &Article) -> QuireResult<()> {
        let mut inner = self.write()?;
        match inner.get_mut(&article.id) {
            Some(slot) => {
                *slot = article.clone();
                debug!(article_id = %article.id, "Article updated");
                Ok(())
            }
            None => Err(BusinessError::unknown_article(article.id).into()),
        }
    }

    fn delete(&self, id: &ArticleId) -> QuireResult<()> {
        if self.write()?.remove(id).is_none() {
            return Err(BusinessError::unknown_article(id).into());
        }
        debug!(article_id = %id, "Article deleted");
        Ok(())
    }

    /// Oldest first; ties broken by id so the order is stable.
    fn find_all(&self) -> QuireResult<Vec<Article>> {
        let mut articles: Vec<Article> = self.read()?.values().cloned().collect();
        articles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(articles)
    }
}
