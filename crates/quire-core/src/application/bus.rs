//! Command and query buses.
//!
//! A bus routes an immutable message to the single handler registered for
//! the message's concrete type. The registry is assembled once through a
//! [`BusBuilder`] and frozen into a [`MessageBus`]; after that, dispatch is a
//! lock-free lookup-and-invoke that is safe to call from many threads.
//!
//! Commands and queries use the same machinery and are kept apart by the
//! message's [`Message::Intent`]: a query cannot be registered on (or
//! dispatched through) a [`CommandBus`].
//!
//! ```rust
//! use quire_core::application::bus::{CommandBus, Message, Write};
//! use quire_core::error::QuireResult;
//!
//! struct Ping;
//!
//! impl Message for Ping {
//!     type Output = &'static str;
//!     type Intent = Write;
//! }
//!
//! let bus = CommandBus::builder()
//!     .register::<Ping, _>(|_: Ping| -> QuireResult<&'static str> { Ok("pong") })
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(bus.dispatch(Ping).unwrap(), "pong");
//! ```
//!
//! ```compile_fail
//! use quire_core::application::bus::{CommandBus, Message, Read};
//! use quire_core::error::QuireResult;
//!
//! struct Lookup;
//!
//! impl Message for Lookup {
//!     type Output = ();
//!     type Intent = Read;
//! }
//!
//! // Queries only go on a `QueryBus`.
//! let _ = CommandBus::builder().register::<Lookup, _>(|_: Lookup| -> QuireResult<()> { Ok(()) });
//! ```

use std::{
    any::{Any, TypeId, type_name},
    collections::{HashMap, hash_map::Entry},
    fmt,
    marker::PhantomData,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::error::{QuireError, QuireResult};

// ============================================================================
// Messages and handlers
// ============================================================================

/// Read/write intent of a message. Sealed to [`Write`] and [`Read`].
pub trait Intent: sealed::Sealed + Send + Sync + 'static {
    const NAME: &'static str;
}

/// Intent of commands: may change state.
#[derive(Debug)]
pub enum Write {}

/// Intent of queries: must not change state.
#[derive(Debug)]
pub enum Read {}

impl Intent for Write {
    const NAME: &'static str = "command";
}

impl Intent for Read {
    const NAME: &'static str = "query";
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Write {}
    impl Sealed for super::Read {}
}

/// An immutable value identified by its concrete type.
///
/// The bus never looks inside a message; only its type selects the handler.
pub trait Message: Send + 'static {
    /// Success value produced by the handler.
    type Output: Send + 'static;

    /// [`Write`] for commands, [`Read`] for queries.
    type Intent: Intent;
}

/// A message that changes state.
pub trait Command: Message<Intent = Write> {}

impl<M: Message<Intent = Write>> Command for M {}

/// A message that only reads state.
pub trait Query: Message<Intent = Read> {}

impl<M: Message<Intent = Read>> Query for M {}

/// The single procedure that performs the work for one message type.
///
/// Expected failures (validation, not found, dependency failure) are
/// returned as [`QuireError`] values, never raised as panics.
pub trait Handler<M: Message>: Send + Sync + 'static {
    fn handle(&self, message: M) -> QuireResult<M::Output>;
}

impl<M, F> Handler<M> for F
where
    M: Message,
    F: Fn(M) -> QuireResult<M::Output> + Send + Sync + 'static,
{
    fn handle(&self, message: M) -> QuireResult<M::Output> {
        self(message)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Start-up wiring defect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("A handler for {intent} '{message_type}' is already registered")]
    DuplicateHandler {
        intent: &'static str,
        message_type: &'static str,
    },
}

/// Failure of a dispatch call.
///
/// `NoHandler` is a deployment bug, not a business outcome, and is kept
/// apart from the handler's own [`QuireError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No handler registered for {intent} '{message_type}'")]
    NoHandler {
        intent: &'static str,
        message_type: &'static str,
    },

    /// The handler ran and reported this error.
    #[error(transparent)]
    Handler(#[from] QuireError),
}

impl DispatchError {
    /// `true` for wiring defects.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoHandler { .. })
    }

    /// The handler's error, if the handler was reached.
    pub fn into_domain(self) -> Option<QuireError> {
        match self {
            Self::Handler(error) => Some(error),
            Self::NoHandler { .. } => None,
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

struct Registration {
    message_type: &'static str,
    /// Always a `Box<dyn Handler<M>>` for the `M` whose `TypeId` keys it.
    handler: Box<dyn Any + Send + Sync>,
}

/// Collects handler registrations during start-up.
pub struct BusBuilder<I: Intent> {
    handlers: HashMap<TypeId, Registration>,
    _intent: PhantomData<fn() -> I>,
}

impl<I: Intent> BusBuilder<I> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            _intent: PhantomData,
        }
    }

    /// Register `handler` as the one handler for `M`.
    ///
    /// Fails if `M` already has a handler.
    pub fn register<M, H>(mut self, handler: H) -> Result<Self, RegistrationError>
    where
        M: Message<Intent = I>,
        H: Handler<M>,
    {
        let message_type = type_name::<M>();

        match self.handlers.entry(TypeId::of::<M>()) {
            Entry::Occupied(_) => Err(RegistrationError::DuplicateHandler {
                intent: I::NAME,
                message_type,
            }),
            Entry::Vacant(slot) => {
                let boxed: Box<dyn Handler<M>> = Box::new(handler);
                slot.insert(Registration {
                    message_type,
                    handler: Box::new(boxed),
                });
                info!(intent = I::NAME, message_type, "Handler registered");
                Ok(self)
            }
        }
    }

    /// Freeze the registry.
    pub fn build(self) -> MessageBus<I> {
        MessageBus {
            handlers: self.handlers,
            _intent: PhantomData,
        }
    }
}

impl<I: Intent> Default for BusBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes messages of one intent to their registered handlers.
///
/// Holds no per-call state; the registry is read-only once built.
pub struct MessageBus<I: Intent> {
    handlers: HashMap<TypeId, Registration>,
    _intent: PhantomData<fn() -> I>,
}

/// Bus for state-changing messages.
pub type CommandBus = MessageBus<Write>;

/// Bus for read-only messages.
pub type QueryBus = MessageBus<Read>;

impl<I: Intent> MessageBus<I> {
    pub fn builder() -> BusBuilder<I> {
        BusBuilder::new()
    }

    /// Route `message` to its handler and return the handler's result.
    pub fn dispatch<M>(&self, message: M) -> Result<M::Output, DispatchError>
    where
        M: Message<Intent = I>,
    {
        let message_type = type_name::<M>();
        let handler = self
            .handler_for::<M>()
            .ok_or(DispatchError::NoHandler {
                intent: I::NAME,
                message_type,
            })?;

        debug!(intent = I::NAME, message_type, "Dispatching message");

        handler.handle(message).map_err(|e| {
            debug!(
                intent = I::NAME,
                message_type,
                category = %e.category(),
                "Handler reported an error"
            );
            DispatchError::Handler(e)
        })
    }

    /// Whether a handler is registered for `M`.
    pub fn handles<M>(&self) -> bool
    where
        M: Message<Intent = I>,
    {
        self.handler_for::<M>().is_some()
    }

    /// Type names of every registered message, sorted.
    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|r| r.message_type).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn handler_for<M: Message>(&self) -> Option<&dyn Handler<M>> {
        self.handlers
            .get(&TypeId::of::<M>())?
            .handler
            .downcast_ref::<Box<dyn Handler<M>>>()
            .map(|handler| &**handler)
    }
}

impl<I: Intent> fmt::Debug for MessageBus<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBus")
            .field("intent", &I::NAME)
            .field("handlers", &self.registered())
            .finish()
    }
}
