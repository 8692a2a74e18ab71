//! Article storage adapters.

pub mod memory;

pub use memory::InMemoryArticleStore;
