use std::time::Duration;

use tokio::time::Instant;

/// Leading-edge rate limiter. A call inside the open window is dropped, not
/// queued: the caller learns it did not run and nothing is deferred.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        if let Some(last_run) = self.last_run {
            if now.saturating_duration_since(last_run) < self.interval {
                return false;
            }
        }
        self.last_run = Some(now);
        true
    }
}
