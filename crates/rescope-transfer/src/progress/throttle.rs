//! Progress message throttling.
//!
//! Keeps a fast reader from flooding a progress display with one message
//! per `read` call.

use std::time::{Duration, Instant};

/// Rate-limiter for progress messages.
///
/// The first check always passes; later checks pass once `min_interval`
/// has elapsed since the last passing check. A zero interval never limits.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    /// Create a throttle with the specified minimum interval.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// A throttle that lets every message through.
    pub const fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Check if enough time has passed to report another message.
    pub fn should_emit(&mut self) -> bool {
        if self.min_interval.is_zero() {
            return true;
        }
        let now = Instant::now();
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_first_emit() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.should_emit());
        assert!(!throttle.should_emit());
    }

    #[test]
    fn test_throttle_respects_interval() {
        let mut throttle = ProgressThrottle::new(Duration::from_millis(50));
        assert!(throttle.should_emit());
        assert!(!throttle.should_emit()); // Too soon

        std::thread::sleep(Duration::from_millis(60));
        assert!(throttle.should_emit()); // Enough time passed
    }

    #[test]
    fn test_unthrottled_always_emits() {
        let mut throttle = ProgressThrottle::unthrottled();
        assert!((0..5).all(|_| throttle.should_emit()));
    }
}
