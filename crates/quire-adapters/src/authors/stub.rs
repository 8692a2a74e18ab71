//! Fixed-answer author directory.

use tracing::debug;

use quire_core::{application::ports::AuthorDirectory, domain::AuthorInfo, error::QuireResult};

/// Author directory that resolves every id to the same configured author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubAuthorDirectory {
    author: AuthorInfo,
}

impl StubAuthorDirectory {
    pub const DEFAULT_ID: &'static str = "author-0";
    pub const DEFAULT_NAME: &'static str = "Jane Doe";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(author: AuthorInfo) -> Self {
        Self { author }
    }

    pub fn author(&self) -> &AuthorInfo {
        &self.author
    }
}

impl Default for StubAuthorDirectory {
    fn default() -> Self {
        Self::with_author(AuthorInfo::new(Self::DEFAULT_ID, Self::DEFAULT_NAME))
    }
}

impl AuthorDirectory for StubAuthorDirectory {
    fn lookup(&self, author_id: &str) -> QuireResult<AuthorInfo> {
        debug!(author_id, resolved = %self.author, "Author looked up");
        Ok(self.author.clone())
    }
}
