//! Transports wired into the CLI.

pub mod file;

pub use file::{FileContent, FileResourceAccessor};
