//! Domain and application layers of Quire.
//!
//! Quire stores articles, but most of this crate is the part that does not
//! care about articles: a typed command/query dispatcher and the error
//! values that flow back out of it.
//!
//! ```text
//!  quire-cli ── builds a message ──► CommandBus / QueryBus
//!                                        │ exactly one handler
//!                                        ▼
//!                                   handler chain
//!                          (validate, look up, persist)
//!                                        │ ports
//!                                        ▼
//!                        ArticleStore · AuthorDirectory
//!                                        ▲
//!                     quire-adapters ────┘ (in-memory, stub)
//! ```
//!
//! Every failure travels back as a [`error::QuireError`] value; the
//! [`problem`] module turns it into status-coded problems for the boundary.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quire_core::prelude::*;
//!
//! # fn adapters() -> (Arc<dyn ArticleStore>, Arc<dyn AuthorDirectory>) { unimplemented!() }
//! let (store, authors) = adapters();
//! let buses = ArticleBuses::wire(store, authors).unwrap();
//!
//! let command = CreateArticle::new(Some("Hello"), Some("World"), Some("author-1")).unwrap();
//! match buses.create(command) {
//!     Ok(article) => println!("created {}", article.id),
//!     Err(DispatchError::Handler(error)) => {
//!         let report = ProblemReport::from_error(&error);
//!         println!("{}", report.status);
//!     }
//!     Err(wiring) => panic!("{wiring}"),
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod problem;

/// Everything a boundary crate needs in one import.
pub mod prelude {
    pub use crate::application::{
        ArticleBuses, Chain, CommandBus, DispatchError, Handler, Message, QueryBus,
        RegistrationError, TechnicalError,
        messages::{CreateArticle, DeleteArticle, GetArticle, ListArticles, UpdateArticle},
        ports::{ArticleStore, AuthorDirectory},
    };
    pub use crate::domain::{
        Article, ArticleId, AuthorInfo, BusinessError, Combine, ValidationError,
        ValidationErrors,
    };
    pub use crate::error::{MultipleErrors, QuireError, QuireResult};
    pub use crate::problem::{Problem, ProblemReport, ProblemStatus, map_to_problems};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
