//! Retry strategies for HTTP requests.

use std::time::Duration;

/// Strategy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of attempts (first try included).
    pub max_attempts: u32,
    /// Base delay between retries in seconds.
    pub base_delay_secs: u64,
    /// Whether to use exponential backoff.
    pub exponential_backoff: bool,
    /// Maximum delay between retries.
    pub max_delay_secs: u64,
}

impl RetryStrategy {
    /// Creates a new retry strategy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_secs: 1,
            exponential_backoff: true,
            max_delay_secs: 60,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 0,
            exponential_backoff: false,
            max_delay_secs: 0,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, secs: u64) -> Self {
        self.base_delay_secs = secs;
        self
    }

    /// Enables or disables exponential backoff.
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Sets the delay cap.
    pub fn with_max_delay(mut self, secs: u64) -> Self {
        self.max_delay_secs = secs;
        self
    }

    /// Calculates the delay for a given attempt number.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            self.base_delay_secs * 2u64.pow(attempt.saturating_sub(1))
        } else {
            self.base_delay_secs
        };

        Duration::from_secs(delay.min(self.max_delay_secs))
    }

    /// Determines if a request error should be retried.
    pub fn should_retry(&self, error: &reqwest::Error) -> bool {
        // Retry on connection errors and timeouts
        error.is_connect() || error.is_timeout()
    }

    /// Determines if an HTTP status is worth retrying.
    pub fn retryable_status(&self, status: reqwest::StatusCode) -> bool {
        status.is_server_error()
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}
