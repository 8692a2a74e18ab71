//! What handlers need from the outside world.
//!
//! Both traits are driven ports: handlers call them and `quire-adapters`
//! implements them. The driving side is the bus itself, see
//! [`crate::application::bus`].

pub mod output;

pub use output::{ArticleStore, AuthorDirectory};
