//! Progress tracking for streamed transfers.
//!
//! This module opens progress sessions, counts streamed bytes against them,
//! and rate-limits the resulting messages.

mod config;
mod logging;
mod session;
mod stream;
mod throttle;

pub use config::{DEFAULT_PROGRESS_INTERVAL, ProgressConfig};
pub use logging::LoggingProgressReporterFactory;
pub use session::{ProgressLogging, ProgressSession, length_text};
pub use stream::CountingProgressStream;
pub use throttle::ProgressThrottle;
