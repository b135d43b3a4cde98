//! Queue configuration.

use std::time::Duration;

use crate::retry::RateLimitPolicy;

/// Settings for an [`ImageQueue`](crate::ImageQueue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Delay before the worker takes the next pending request on its own.
    /// A new request arriving sooner starts the worker immediately.
    pub throttle: Duration,
    /// Backoff when the provider is rate limited.
    pub rate_limit: RateLimitPolicy,
    /// Attach duplicate requests to a queued or in-flight request for the
    /// same key instead of enqueuing them again.
    pub dedupe_in_flight: bool,
}

impl QueueConfig {
    pub fn new() -> Self {
        Self {
            throttle: Duration::from_secs(4),
            rate_limit: RateLimitPolicy::default(),
            dedupe_in_flight: false,
        }
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe_in_flight = dedupe;
        self
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new()
    }
}
