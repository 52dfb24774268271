use crate::core::{HelperError, HelperResult};
use std::future::Future;
use std::time::Duration;

/// Default attempt budget per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Per-request retry policy
///
/// Retrying is opt-in: a policy without `max_attempts` makes exactly one
/// attempt. The delay is fixed, not exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::ZERO,
        }
    }

    /// Total attempts this policy allows (at least one).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(1).max(1)
    }
}

/// Whether an error is worth another attempt.
///
/// A 404 or an empty page is an answer, not a transient failure.
pub fn is_retryable(error: &HelperError) -> bool {
    matches!(
        error,
        HelperError::NetworkError(_) | HelperError::Timeout(_) | HelperError::Http(_)
    )
}

/// Run `op` under `policy`, sleeping `policy.delay` between failed attempts.
///
/// `op` receives the 1-based attempt number. The last error is returned once
/// the budget is spent; non-retryable errors are returned immediately.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, label: &str, mut op: F) -> HelperResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = HelperResult<T>>,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts && is_retryable(&e) => {
                tracing::warn!(
                    "Request failed ({}), retry {} of {}: {}",
                    label,
                    attempt,
                    attempts - 1,
                    e
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
