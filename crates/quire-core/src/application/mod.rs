//! Application layer for Quire.
//!
//! This layer contains:
//! - **Bus**: Typed command/query routing to exactly one handler
//! - **Chain**: Short-circuiting composition of dependent steps
//! - **Messages**: Validated commands and queries
//! - **Handlers**: Use case orchestration behind the bus
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Technical (infrastructure) failures
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod bus;
pub mod chain;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod ports;
pub mod wiring;

// Re-export the driving surface
pub use bus::{
    BusBuilder, Command, CommandBus, DispatchError, Handler, Message, MessageBus, Query, QueryBus,
    RegistrationError,
};
pub use chain::Chain;
pub use wiring::ArticleBuses;

// Re-export port traits (for adapter implementation)
pub use ports::{ArticleStore, AuthorDirectory};

pub use error::TechnicalError;
