//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<T, CliError>`
//! - Parse the URI, call the instrumented port, print the outcome, and
//!   return it so tests can check it without capturing stdout.

pub mod fetch;
pub mod list;
pub mod meta;
pub mod put;
