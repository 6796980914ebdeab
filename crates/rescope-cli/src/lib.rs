//! Command-line front end for instrumented resource access.
//!
//! Wires the local file transport behind the instrumented wrappers from
//! `rescope-transfer` and exposes them as `fetch`, `meta`, `list` and `put`.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod transport;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, log_directives};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
