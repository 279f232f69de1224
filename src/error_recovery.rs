// src/error_recovery.rs
//! Retry with exponential backoff for API operations.

use crate::constants::{API_INITIAL_BACKOFF_MS, API_MAX_ATTEMPTS, API_MAX_BACKOFF_MS};
use crate::error::AppError;
use rand::Rng;
use std::time::Duration;

/// How hard to retry a failed request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: API_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(API_INITIAL_BACKOFF_MS),
            max_delay: Duration::from_millis(API_MAX_BACKOFF_MS),
        }
    }
}

/// Retries an async operation with exponential backoff.
///
/// Only errors that report themselves retryable are retried; anything else
/// is returned on the first failure.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    policy: RetryPolicy,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < policy.max_attempts && e.is_retryable() => {
                let jitter = rand::rng().random_range(0..=delay.as_millis() as u64 / 4);
                let wait = delay + Duration::from_millis(jitter);
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    e,
                    wait
                );
                tokio::time::sleep(wait).await;

                // Exponential backoff with cap
                delay = std::cmp::min(delay * 2, policy.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(AppError::AssetFetch {
                        url: "u".to_string(),
                        status: 503,
                    })
                } else {
                    Ok(7)
                }
            },
            quick(),
        )
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), AppError> = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::AssetFetch {
                    url: "u".to_string(),
                    status: 404,
                })
            },
            quick(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), AppError> = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::AssetFetch {
                    url: "u".to_string(),
                    status: 500,
                })
            },
            quick(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
