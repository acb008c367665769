use payrail_primitives::error::ProviderError;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry policy for outbound provider calls. A value, not behavior baked
/// into the transport loop, so the policy can be tested without network I/O.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Exponential backoff after a failed attempt (attempts are 1-based):
    /// 2s after the first failure, 4s after the second, and so on.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(2u64.saturating_pow(attempt))
    }

    /// Whether attempt number `attempt` should be followed by another try.
    /// Client errors fail fast; only 5xx and transport failures repeat.
    pub fn should_retry(&self, err: &ProviderError, attempt: u32) -> bool {
        attempt < self.max_attempts && err.is_retryable()
    }
}
