//! Progress reporter port.
//!
//! This port abstracts the progress display backend (terminal bar, log line,
//! GUI event). The instrumentation layer only starts reporters, feeds them
//! messages, and completes them.

/// Creates progress reporters.
///
/// # Implementations
///
/// - `NoopProgressReporterFactory` - For tests and contexts without a display
/// - Adapter-specific implementations (terminal spinner, tracing log lines)
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporterFactory: Send + Sync {
    /// Start a reporter.
    ///
    /// `category` names the component that owns the work (used as a log
    /// category); `header` is the human readable title of the work.
    fn start(&self, category: &str, header: &str) -> Box<dyn ProgressReporter>;
}

/// A live progress display for one unit of work.
///
/// A reporter receives zero or more `progress` calls followed by exactly one
/// `completed` call.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send {
    /// Report an intermediate status message.
    fn progress(&mut self, message: &str);

    /// Mark the work as finished; no further messages follow.
    fn completed(&mut self);
}

/// A progress factory whose reporters discard everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressReporterFactory;

impl NoopProgressReporterFactory {
    /// Create a new no-op factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProgressReporterFactory for NoopProgressReporterFactory {
    fn start(&self, _category: &str, _header: &str) -> Box<dyn ProgressReporter> {
        Box::new(NoopProgressReporter)
    }
}

#[derive(Debug)]
struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn progress(&mut self, _message: &str) {
        // Intentionally do nothing
    }

    fn completed(&mut self) {
        // Intentionally do nothing
    }
}
