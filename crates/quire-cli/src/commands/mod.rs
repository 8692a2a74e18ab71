//! One module per subcommand.

pub mod batch;
pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
