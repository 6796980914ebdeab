//! Progress reporter that writes to the tracing log.

use rescope_core::{ProgressReporter, ProgressReporterFactory};

/// Reports progress as `info` log lines.
///
/// Suitable for headless contexts (CI, services) where no terminal display
/// is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProgressReporterFactory;

impl LoggingProgressReporterFactory {
    /// Create a new logging factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProgressReporterFactory for LoggingProgressReporterFactory {
    fn start(&self, category: &str, header: &str) -> Box<dyn ProgressReporter> {
        tracing::info!(category, header, "Started");
        Box::new(LoggingProgressReporter {
            category: category.to_string(),
            header: header.to_string(),
        })
    }
}

struct LoggingProgressReporter {
    category: String,
    header: String,
}

impl ProgressReporter for LoggingProgressReporter {
    fn progress(&mut self, message: &str) {
        tracing::info!(category = %self.category, header = %self.header, "{message}");
    }

    fn completed(&mut self) {
        tracing::info!(category = %self.category, header = %self.header, "Completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_messages_are_logged_with_header() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut reporter = LoggingProgressReporterFactory::new().start("tests", "Download a.jar");
            reporter.progress("1 KB downloaded");
            reporter.completed();
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("1 KB downloaded"));
        assert!(output.contains("Download a.jar"));
        assert!(output.contains("Completed"));
    }
}
