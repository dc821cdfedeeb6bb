//! Inactivity tracking.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{instrument, trace};

/// Remembers the last input and reports when the kiosk has gone quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimer {
    timeout: Duration,
    last_activity: Instant,
}

impl IdleTimer {
    /// Starts counting from `now`.
    #[instrument]
    pub fn new(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            last_activity: now,
        }
    }

    /// Records input at `now`.
    #[instrument(skip(self))]
    pub fn touch(&mut self, now: Instant) {
        trace!("Activity");
        self.last_activity = now;
    }

    /// Time since the last input. Zero if `now` precedes it.
    #[instrument(skip(self))]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    /// True once the elapsed time reaches the timeout.
    #[instrument(skip(self))]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.timeout
    }

    /// Configured timeout.
    #[instrument(skip(self))]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(120_000);

    #[test]
    fn test_fires_at_boundary_not_before() {
        let start = Instant::now();
        let timer = IdleTimer::new(TIMEOUT, start);
        assert!(!timer.is_expired(start + Duration::from_millis(119_999)));
        assert!(timer.is_expired(start + Duration::from_millis(120_000)));
        assert!(timer.is_expired(start + Duration::from_millis(180_000)));
    }

    #[test]
    fn test_touch_restarts_the_clock() {
        let start = Instant::now();
        let mut timer = IdleTimer::new(TIMEOUT, start);
        timer.touch(start + Duration::from_millis(119_999));
        assert!(!timer.is_expired(start + Duration::from_millis(120_000)));
        assert!(timer.is_expired(start + Duration::from_millis(239_999)));
    }

    #[test]
    fn test_clock_going_backwards_is_not_expired() {
        let start = Instant::now() + Duration::from_secs(10);
        let timer = IdleTimer::new(TIMEOUT, start);
        assert_eq!(timer.elapsed(start - Duration::from_secs(5)), Duration::ZERO);
    }
}
