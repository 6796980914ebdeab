//! Progress reporting configuration.

use std::time::Duration;

/// Default minimum interval between two progress messages.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for progress sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Minimum time between two messages sent to a reporter.
    pub min_interval: Duration,
}

impl ProgressConfig {
    /// Report every read, with no rate limiting.
    pub const fn unthrottled() -> Self {
        Self {
            min_interval: Duration::ZERO,
        }
    }

    /// Set the minimum interval between messages.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
