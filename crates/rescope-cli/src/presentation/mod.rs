//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: values come in, lines go out.

pub mod metadata;
pub mod progress;

pub use metadata::metadata_rows;
pub use progress::TerminalProgressReporterFactory;
