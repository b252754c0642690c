//! Per-instance pacing of outgoing requests.

use log::{debug, warn};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps consecutive network calls at least `min_interval` apart.
///
/// Each provider owns its own limiter, so pacing is tracked per service instance rather
/// than per process. Only real network calls go through [`RateLimiter::wait`]; cache
/// hits never touch it.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    service: &'static str,
    min_interval: Duration,
    last_call: Option<Instant>,
    calls: u64,
}

impl RateLimiter {
    pub fn new(service: &'static str, min_interval: Duration) -> Self {
        Self {
            service,
            min_interval,
            last_call: None,
            calls: 0,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Number of network calls that have been let through.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Blocks until the next call is allowed, then records it.
    pub async fn wait(&mut self) {
        if self.calls == 0 {
            warn!(
                "Performing a non-cached {} lookup. The first run fills the cache and may take some minutes.",
                self.service
            );
        }

        if let Some(last) = self.last_call {
            let ready_at = last + self.min_interval;
            if ready_at > Instant::now() {
                debug!(
                    "Pacing {} request for {:?}",
                    self.service,
                    ready_at - Instant::now()
                );
                sleep_until(ready_at).await;
            }
        }

        self.last_call = Some(Instant::now());
        self.calls += 1;
    }
}
