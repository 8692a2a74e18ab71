//! Sequential, short-circuiting composition of dependent steps.
//!
//! A handler typically validates, then looks something up, then persists.
//! Each stage either forwards a value or aborts the whole chain with a
//! [`QuireError`]; stages after the first failure never run.
//!
//! ```rust
//! use quire_core::application::chain::Chain;
//! use quire_core::domain::BusinessError;
//!
//! let result = Chain::start("42")
//!     .then("parse", |raw| raw.parse::<u32>().map_err(|_| BusinessError::invalid_id(raw).into()))
//!     .then("double", |n| Ok(n * 2))
//!     .finish();
//!
//! assert_eq!(result, Ok(84));
//! ```

use tracing::debug;

use crate::error::{QuireError, QuireResult};

/// A left-to-right pipe of fallible steps.
#[derive(Debug)]
#[must_use = "a chain does nothing until `finish` is called"]
pub struct Chain<T> {
    state: QuireResult<T>,
}

impl<T> Chain<T> {
    /// Start a chain from a known-good value.
    pub fn start(value: T) -> Self {
        Self { state: Ok(value) }
    }

    /// Start a chain from an earlier outcome; anything convertible into a
    /// [`QuireError`] (e.g. `ValidationErrors`) is accepted.
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<QuireError>,
    {
        Self {
            state: result.map_err(Into::into),
        }
    }

    /// Run `step` if every previous step succeeded.
    pub fn then<U, F>(self, name: &'static str, step: F) -> Chain<U>
    where
        F: FnOnce(T) -> QuireResult<U>,
    {
        let state = match self.state {
            Ok(value) => {
                debug!(step = name, "Running chain step");
                step(value).inspect_err(|e| {
                    debug!(step = name, category = %e.category(), "Chain short-circuited");
                })
            }
            Err(e) => Err(e),
        };
        Chain { state }
    }

    /// Infallible transformation of the success value.
    pub fn map<U, F>(self, f: F) -> Chain<U>
    where
        F: FnOnce(T) -> U,
    {
        Chain {
            state: self.state.map(f),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.state.is_ok()
    }

    /// The outcome of the first failing step, or the final value.
    pub fn finish(self) -> QuireResult<T> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::application::TechnicalError;
    use crate::domain::{BusinessError, ValidationError, ValidationErrors};

    #[test]
    fn all_steps_run_in_order_on_success() {
        let trace = std::cell::RefCell::new(Vec::new());

        let result = Chain::start(1)
            .then("a", |n| {
                trace.borrow_mut().push("a");
                Ok(n + 1)
            })
            .then("b", |n| {
                trace.borrow_mut().push("b");
                Ok(n * 10)
            })
            .finish();

        assert_eq!(result, Ok(20));
        assert_eq!(*trace.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn first_failure_wins_and_later_steps_never_run() {
        let later = Cell::new(0);

        let result: QuireResult<u32> = Chain::start(())
            .then("lookup", |()| {
                Err::<u32, _>(BusinessError::unknown_article("x").into())
            })
            .then("persist", |_| {
                later.set(later.get() + 1);
                Err(TechnicalError::something_went_wrong("should not happen").into())
            })
            .map(|n| {
                later.set(later.get() + 1);
                n
            })
            .finish();

        assert_eq!(result, Err(BusinessError::unknown_article("x").into()));
        assert_eq!(later.get(), 0);
    }

    #[test]
    fn from_result_lifts_validation_errors() {
        let invalid: Result<u8, ValidationErrors> =
            Err(ValidationError::cannot_be_null("title").into());
        let ran = Cell::new(false);

        let chain = Chain::from_result(invalid).then("next", |n| {
            ran.set(true);
            Ok(n)
        });

        assert!(!chain.is_ok());
        assert!(matches!(chain.finish(), Err(QuireError::Validation(_))));
        assert!(!ran.get());
    }
}
