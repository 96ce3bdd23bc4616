//! Fixed-interval request pacing for provider politeness.
//!
//! The provider rate-limits aggressive callers, so successive calls within a
//! stage are separated by a minimum interval. The pacer is injected into the
//! I/O stages so tests can run with a zero interval instead of real sleeps.

use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum interval between successive calls.
///
/// The first call never waits; each later call sleeps for whatever remains
/// of the interval since the previous call returned.
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    last: Option<Instant>,
}

impl RequestPacer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// A pacer that never sleeps, for tests.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits until at least `interval` has passed since the previous call.
    pub async fn pause(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}
