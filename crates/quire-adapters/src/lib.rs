//! Infrastructure adapters for Quire.
//!
//! This crate implements the ports defined in `quire_core::application::ports`.
//! Storage is in-process; author lookup is a fixed stub.

pub mod article_store;
pub mod authors;

// Re-export commonly used adapters
pub use article_store::InMemoryArticleStore;
pub use authors::StubAuthorDirectory;
