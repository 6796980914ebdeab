//! Tracing and progress instrumentation for external resource access.
//!
//! This crate wraps the ports defined in `rescope-core`:
//!
//! - `progress` - progress sessions, byte-counting streams, throttling
//! - `instrumented` - accessor, uploader, lister and resource handle wrappers
//!   that run every call as a traced operation
//! - `executor` - an operation executor that records operations as
//!   `tracing` spans and events

pub mod executor;
pub mod instrumented;
pub mod progress;

pub use executor::TracingOperationExecutor;
pub use instrumented::{
    OperationFiringResource, ProgressLoggingResourceAccessor, ProgressLoggingResourceLister,
    ProgressLoggingResourceUploader,
};
pub use progress::{
    CountingProgressStream, DEFAULT_PROGRESS_INTERVAL, LoggingProgressReporterFactory,
    ProgressConfig, ProgressLogging, ProgressSession, ProgressThrottle, length_text,
};
