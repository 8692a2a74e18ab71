//! Article entity, value objects and the validation vocabulary.
//!
//! Nothing here performs I/O or knows about buses. Validation and business
//! failures are plain values returned to the caller.

pub mod entities;
pub mod error;
pub mod validation;
pub mod value_objects;

pub use entities::article::Article;
pub use error::BusinessError;
pub use validation::{Accumulator, Combine, ValidationError, ValidationErrors, validate_all};
pub use value_objects::{ArticleId, AuthorInfo};
