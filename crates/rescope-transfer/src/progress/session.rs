//! Progress sessions.
//!
//! [`ProgressLogging`] opens a [`ProgressSession`] per streamed transfer. The
//! session is a scope guard: dropping it completes the underlying reporter,
//! so completion happens exactly once on every exit path of the owning scope,
//! including early returns and panics.

use std::cell::{Cell, RefCell};
use std::io::Read;
use std::sync::Arc;

use rescope_core::{OperationKind, ProgressReporter, ProgressReporterFactory, ResourceLocation};

use super::config::ProgressConfig;
use super::stream::CountingProgressStream;
use super::throttle::ProgressThrottle;

// ============================================================================
// Constants
// ============================================================================

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;

// ============================================================================
// Progress Logging
// ============================================================================

/// Opens progress sessions against a reporter factory.
#[derive(Clone)]
pub struct ProgressLogging {
    factory: Arc<dyn ProgressReporterFactory>,
    config: ProgressConfig,
}

impl ProgressLogging {
    /// Create a helper with the default configuration.
    pub fn new(factory: Arc<dyn ProgressReporterFactory>) -> Self {
        Self::with_config(factory, ProgressConfig::default())
    }

    /// Create a helper with an explicit configuration.
    pub fn with_config(factory: Arc<dyn ProgressReporterFactory>, config: ProgressConfig) -> Self {
        Self { factory, config }
    }

    /// Start reporting progress for `kind` on `location`.
    ///
    /// `originator` names the component doing the work and becomes the
    /// reporter's category. `total_bytes` may be unknown; messages then only
    /// report the bytes processed so far.
    pub fn begin(
        &self,
        location: &ResourceLocation,
        kind: OperationKind,
        originator: &str,
        total_bytes: Option<u64>,
    ) -> ProgressSession {
        let header = format!("{} {}", kind.capitalized(), location.display_name());
        let reporter = self.factory.start(originator, &header);
        tracing::trace!(header = %header, total_bytes, "Progress session opened");
        ProgressSession {
            kind,
            header,
            total_bytes,
            processed: Cell::new(0),
            state: RefCell::new(SessionState {
                reporter,
                throttle: ProgressThrottle::new(self.config.min_interval),
                reported: 0,
                completed: false,
            }),
        }
    }
}

// ============================================================================
// Progress Session
// ============================================================================

struct SessionState {
    reporter: Box<dyn ProgressReporter>,
    throttle: ProgressThrottle,
    /// Processed count carried by the last message sent.
    reported: u64,
    completed: bool,
}

/// A live progress lifecycle: open, zero or more notifications, completed.
///
/// Owned by the scope that opened it and never shared across threads.
pub struct ProgressSession {
    kind: OperationKind,
    header: String,
    total_bytes: Option<u64>,
    processed: Cell<u64>,
    state: RefCell<SessionState>,
}

impl ProgressSession {
    /// Bind a raw stream to this session.
    pub fn wrap<R: Read>(&self, inner: R) -> CountingProgressStream<'_, R> {
        CountingProgressStream::new(inner, self)
    }

    /// Record `bytes` more processed bytes and report them.
    pub fn log_processed_bytes(&self, bytes: u64) {
        let processed = self.processed.get().saturating_add(bytes);
        self.processed.set(processed);

        let mut state = self.state.borrow_mut();
        if state.completed || !state.throttle.should_emit() {
            return;
        }
        state.reported = processed;
        let message = progress_message(processed, self.total_bytes, self.kind);
        state.reporter.progress(&message);
    }

    /// Total bytes processed so far.
    pub fn processed_bytes(&self) -> u64 {
        self.processed.get()
    }

    /// Expected total, if known.
    pub const fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Header the reporter was started with.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Complete the session now instead of at the end of the scope.
    pub fn completed(self) {
        self.finish();
    }

    fn finish(&self) {
        let mut state = self.state.borrow_mut();
        if state.completed {
            return;
        }
        state.completed = true;
        // Throttled counts are flushed so the final total is always reported.
        let processed = self.processed.get();
        if processed != state.reported {
            state.reported = processed;
            let message = progress_message(processed, self.total_bytes, self.kind);
            state.reporter.progress(&message);
        }
        state.reporter.completed();
        tracing::trace!(
            header = %self.header,
            processed_bytes = self.processed.get(),
            "Progress session completed"
        );
    }
}

impl Drop for ProgressSession {
    fn drop(&mut self) {
        self.finish();
    }
}

// ============================================================================
// Message Formatting
// ============================================================================

/// Format a byte count with a 1024-based integer unit.
pub fn length_text(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{} MB", bytes / MIB)
    }
}

fn progress_message(processed: u64, total: Option<u64>, kind: OperationKind) -> String {
    let suffix = kind.progress_suffix();
    match total {
        Some(total) => {
            let percent = if total == 0 {
                100
            } else {
                (u128::from(processed) * 100 / u128::from(total)).min(100)
            };
            format!(
                "{}/{} {suffix} ({percent}%)",
                length_text(processed),
                length_text(total)
            )
        }
        None => format!("{} {suffix}", length_text(processed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rescope_core::testing::{Event, EventLog, RecordingProgressReporterFactory};

    fn logging(log: &EventLog) -> ProgressLogging {
        ProgressLogging::with_config(
            Arc::new(RecordingProgressReporterFactory::new(log.clone())),
            ProgressConfig::unthrottled(),
        )
    }

    fn location() -> ResourceLocation {
        ResourceLocation::parse("http://example/repo/a.jar").unwrap()
    }

    #[test]
    fn test_length_text_units() {
        assert_eq!(length_text(0), "0 B");
        assert_eq!(length_text(1023), "1023 B");
        assert_eq!(length_text(2048), "2 KB");
        assert_eq!(length_text(5 * MIB + 1), "5 MB");
    }

    #[test]
    fn test_message_with_known_total_reports_percentage() {
        let message = progress_message(250, Some(500), OperationKind::Download);
        assert_eq!(message, "250 B/500 B downloaded (50%)");
    }

    #[test]
    fn test_message_with_unknown_total_reports_bytes_only() {
        let message = progress_message(3 * KIB, None, OperationKind::Upload);
        assert_eq!(message, "3 KB uploaded");
    }

    #[test]
    fn test_percentage_is_capped() {
        let message = progress_message(900, Some(300), OperationKind::Download);
        assert!(message.ends_with("(100%)"));
        let message = progress_message(0, Some(0), OperationKind::Download);
        assert!(message.ends_with("(100%)"));
    }

    #[test]
    fn test_begin_starts_reporter_with_header_and_category() {
        let log = EventLog::new();
        let session = logging(&log).begin(&location(), OperationKind::Download, "tests", Some(10));

        assert_eq!(session.header(), "Download a.jar");
        assert_eq!(session.total_bytes(), Some(10));
        assert_eq!(
            log.events(),
            vec![Event::ProgressStarted {
                category: "tests".to_string(),
                header: "Download a.jar".to_string(),
            }]
        );
    }

    #[test]
    fn test_session_accumulates_processed_bytes() {
        let log = EventLog::new();
        let session = logging(&log).begin(&location(), OperationKind::Download, "tests", Some(10));

        session.log_processed_bytes(4);
        session.log_processed_bytes(6);

        assert_eq!(session.processed_bytes(), 10);
        assert_eq!(
            log.progress_messages(),
            vec![
                "4 B/10 B downloaded (40%)".to_string(),
                "10 B/10 B downloaded (100%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_drop_completes_once() {
        let log = EventLog::new();
        {
            let _session = logging(&log).begin(&location(), OperationKind::Upload, "tests", None);
        }
        assert_eq!(log.progress_completed(), 1);
    }

    #[test]
    fn test_explicit_completion_is_not_repeated_on_drop() {
        let log = EventLog::new();
        let session = logging(&log).begin(&location(), OperationKind::Download, "tests", None);
        session.completed();
        assert_eq!(log.progress_completed(), 1);
    }

    #[test]
    fn test_completion_runs_when_scope_panics() {
        let log = EventLog::new();
        let helper = logging(&log);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = helper.begin(&location(), OperationKind::Download, "tests", None);
            panic!("action failed");
        }));

        assert!(outcome.is_err());
        assert_eq!(log.progress_completed(), 1);
    }

    #[test]
    fn test_throttled_session_reports_final_count_on_completion() {
        let log = EventLog::new();
        let helper = ProgressLogging::with_config(
            Arc::new(RecordingProgressReporterFactory::new(log.clone())),
            ProgressConfig::default().with_min_interval(std::time::Duration::from_secs(60)),
        );
        let session = helper.begin(&location(), OperationKind::Download, "tests", None);

        session.log_processed_bytes(1);
        session.log_processed_bytes(1);
        session.log_processed_bytes(1);

        assert_eq!(session.processed_bytes(), 3);
        assert_eq!(log.progress_messages(), vec!["1 B downloaded".to_string()]);

        session.completed();

        assert_eq!(
            log.progress_messages(),
            vec!["1 B downloaded".to_string(), "3 B downloaded".to_string()]
        );
        let events = log.events();
        assert!(matches!(
            &events[events.len() - 2],
            Event::Progress { message, .. } if message == "3 B downloaded"
        ));
        assert!(matches!(events.last(), Some(Event::ProgressCompleted { .. })));
    }

    #[test]
    fn test_completion_sends_nothing_extra_when_up_to_date() {
        let log = EventLog::new();
        let session = logging(&log).begin(&location(), OperationKind::Download, "tests", Some(4));

        session.log_processed_bytes(4);
        session.completed();

        assert_eq!(log.progress_messages(), vec!["4 B/4 B downloaded (100%)".to_string()]);
    }
}
