//! Terminal progress rendering.
//!
//! One spinner per progress session, drawn on stderr so command output on
//! stdout stays clean. indicatif hides the spinner when stderr is not a
//! terminal.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rescope_core::{ProgressReporter, ProgressReporterFactory};

// ============================================================================
// Constants
// ============================================================================

const TICK_INTERVAL: Duration = Duration::from_millis(120);
const TEMPLATE: &str = "{spinner} {prefix} {msg}";

// ============================================================================
// Factory
// ============================================================================

/// Draws each progress session as an indicatif spinner.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProgressReporterFactory;

impl TerminalProgressReporterFactory {
    /// Create a new terminal factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl ProgressReporterFactory for TerminalProgressReporterFactory {
    fn start(&self, category: &str, header: &str) -> Box<dyn ProgressReporter> {
        tracing::trace!(category, header, "Drawing progress");
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(Self::style());
        bar.set_prefix(header.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        Box::new(SpinnerReporter { bar })
    }
}

// ============================================================================
// Reporter
// ============================================================================

struct SpinnerReporter {
    bar: ProgressBar,
}

impl ProgressReporter for SpinnerReporter {
    fn progress(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn completed(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid() {
        assert!(ProgressStyle::with_template(TEMPLATE).is_ok());
    }

    #[test]
    fn test_reporter_lifecycle_on_hidden_target() {
        let factory = TerminalProgressReporterFactory::new();
        let mut reporter = factory.start("tests", "Download a.jar");
        reporter.progress("1 KB/2 KB downloaded (50%)");
        reporter.completed();
    }
}
