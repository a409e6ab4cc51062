//! Request pacing for the TMDB API.

use std::time::{Duration, Instant};

/// Default spacing between requests (TMDB tolerates ~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Keeps consecutive requests at least `min_interval` apart.
///
/// Each client owns one throttle behind a mutex, so the primary and
/// access-token transports are paced independently.
#[derive(Debug)]
pub struct RequestThrottle {
    /// Minimum spacing between two requests.
    min_interval: Duration,
    /// Earliest instant at which the next request may leave.
    next_allowed: Option<Instant>,
}

impl RequestThrottle {
    /// Creates a throttle with the given spacing.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_allowed: None,
        }
    }

    /// Creates a throttle with the default spacing (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Sleeps until the next request slot and reserves the one after it.
    pub async fn acquire(&mut self) {
        if let Some(next) = self.next_allowed {
            let now = Instant::now();
            if next > now {
                tokio::time::sleep(next.saturating_duration_since(now)).await;
            }
        }

        self.next_allowed = Instant::now().checked_add(self.min_interval);
    }
}
