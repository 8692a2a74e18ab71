//! Bus handlers for the article messages.
//!
//! Each handler runs a [`Chain`](crate::application::chain::Chain) of
//! dependent steps against the driven ports and returns the first failure
//! unchanged.

pub mod commands;
pub mod queries;

pub use commands::{CreateArticleHandler, DeleteArticleHandler, UpdateArticleHandler};
pub use queries::{GetArticleHandler, ListArticlesHandler};
