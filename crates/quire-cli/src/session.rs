//! One CLI invocation's view of the article service.
//!
//! Opens the store (optionally seeded), wires the buses, and owns the
//! request reference that every reported problem is stamped with.

use std::sync::Arc;

use tracing::{debug, instrument};

use quire_adapters::{InMemoryArticleStore, StubAuthorDirectory};
use quire_core::prelude::*;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Wired buses plus the reference of the current request.
#[derive(Debug)]
pub struct Session {
    buses: ArticleBuses,
    store: InMemoryArticleStore,
    request: String,
}

impl Session {
    /// Build the adapters described by `config`, with CLI flags taking
    /// precedence, and wire them into a fresh pair of buses.
    #[instrument(skip_all)]
    pub fn open(global: &GlobalArgs, config: &AppConfig) -> CliResult<Self> {
        let request = request_reference(
            &config.problems.instance_prefix,
            global.request_id.as_deref(),
        );

        let seed = global.seed.as_ref().or(config.store.seed_path.as_ref());
        let store = match seed {
            Some(path) => InMemoryArticleStore::load_seed(path)
                .map_err(|e| problems(&e, &request))?,
            None => InMemoryArticleStore::new(),
        };
        let authors = StubAuthorDirectory::with_author(AuthorInfo::new(
            config.author.id.clone(),
            config.author.name.clone(),
        ));

        let buses = ArticleBuses::wire(Arc::new(store.clone()), Arc::new(authors))?;
        debug!(request = %request, articles = ?store.len().ok(), "Session opened");

        Ok(Self {
            buses,
            store,
            request,
        })
    }

    pub fn buses(&self) -> &ArticleBuses {
        &self.buses
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    /// Number of articles currently held.
    pub fn article_count(&self) -> QuireResult<usize> {
        self.store.len()
    }

    /// Build a message, dispatch it, and turn any failure into a stamped
    /// problem report.
    pub fn execute<M, T, F>(
        &self,
        message: Result<M, ValidationErrors>,
        dispatch: F,
    ) -> CliResult<T>
    where
        F: FnOnce(&ArticleBuses, M) -> Result<T, DispatchError>,
    {
        let message = message.map_err(|e| self.fail(e))?;
        dispatch(&self.buses, message).map_err(|e| self.dispatch_failed(e))
    }

    /// Render a domain failure for this request.
    pub fn fail(&self, error: impl Into<QuireError>) -> CliError {
        problems(&error.into(), &self.request)
    }

    /// Split a dispatch failure into a wiring defect or a domain failure.
    pub fn dispatch_failed(&self, error: DispatchError) -> CliError {
        match error {
            DispatchError::Handler(domain) => self.fail(domain),
            wiring => CliError::Dispatch(wiring),
        }
    }
}

fn problems(error: &QuireError, request: &str) -> CliError {
    CliError::Problems(ProblemReport::from_error(error).with_instance(request))
}

/// `<prefix><id>`, generating a random id when none was given.
pub fn request_reference(prefix: &str, request_id: Option<&str>) -> String {
    match request_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("{prefix}{id}"),
        None => format!("{prefix}{}", uuid::Uuid::new_v4()),
    }
}
