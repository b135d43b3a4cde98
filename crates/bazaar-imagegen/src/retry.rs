//! Backoff policy for rate-limited generation attempts.

use std::time::Duration;

/// What to do when the provider reports quota exhaustion.
///
/// The rate-limited item goes back to the front of the queue and the queue
/// pauses for [`pause`](Self::pause). Without a retry cap this repeats for as
/// long as the provider keeps refusing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Fixed pause before the queue resumes.
    pub pause: Duration,
    /// Rate-limited attempts tolerated per item before giving up.
    pub max_retries: Option<u32>,
}

impl RateLimitPolicy {
    /// Fixed 60 second pause, unbounded retries.
    pub fn new() -> Self {
        Self {
            pause: Duration::from_secs(60),
            max_retries: None,
        }
    }

    /// Set the pause.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Cap the number of retries per item.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Check whether an item rate-limited `hits` times should be retried.
    pub fn should_retry(&self, hits: u32) -> bool {
        match self.max_retries {
            Some(max) => hits <= max,
            None => true,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_by_default() {
        let policy = RateLimitPolicy::default();
        assert_eq!(policy.pause, Duration::from_secs(60));
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(10_000));
    }

    #[test]
    fn test_capped() {
        let policy = RateLimitPolicy::new().with_max_retries(2);
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));

        assert!(!RateLimitPolicy::new().with_max_retries(0).should_retry(1));
    }
}
