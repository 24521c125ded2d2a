//! Politeness interval between consecutive fetches
//!
//! The crawler fetches one page at a time. A `Pacer` remembers when the last
//! fetch started and holds the next one back until the configured interval,
//! plus an optional random jitter, has passed.

use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Pacer {
    /// Minimum time between the start of two fetches
    interval: Duration,

    /// Upper bound of the random delay added on top of the interval
    jitter: Duration,

    /// When the previous fetch was let through
    last_fetch: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration, jitter: Duration) -> Self {
        Self {
            interval,
            jitter,
            last_fetch: None,
        }
    }

    pub fn from_millis(interval_ms: u64, jitter_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(interval_ms),
            Duration::from_millis(jitter_ms),
        )
    }

    /// Changes the interval for subsequent fetches
    ///
    /// The last fetch instant is kept, so the next fetch still waits for the
    /// new interval measured from the previous fetch.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns how long the next fetch must wait, ignoring jitter
    ///
    /// # Returns
    ///
    /// * `Some(Duration)` - Time remaining until the interval has passed
    /// * `None` - A fetch may start now
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_fetch?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.interval {
            None
        } else {
            Some(self.interval - elapsed)
        }
    }

    /// Waits until the next fetch may start and records it
    ///
    /// The first call never waits.
    pub async fn wait_turn(&mut self) {
        if self.last_fetch.is_some() {
            let wait = self.time_until_next(Instant::now()).unwrap_or_default() + self.sample_jitter();
            if !wait.is_zero() {
                tracing::trace!("Politeness wait of {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }

        self.last_fetch = Some(Instant::now());
    }

    fn sample_jitter(&self) -> Duration {
        let max_ms = self.jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }
}
