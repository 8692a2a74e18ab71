//! Author directory adapters.

pub mod stub;

pub use stub::StubAuthorDirectory;
