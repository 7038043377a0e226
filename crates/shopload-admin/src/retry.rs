//! Bounded retry for Admin API requests.
//!
//! Only HTTP statuses in the transient set are retried. GraphQL-level errors,
//! other statuses and network failures surface on the first attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::error::AdminError;

/// Statuses that indicate throttling or a temporary upstream failure.
const TRANSIENT_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

pub(crate) fn is_transient(status: StatusCode) -> bool {
    TRANSIENT_STATUSES.contains(&status)
}

/// Attempt cap and exponential backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub base: Duration,
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base: Duration::from_secs(1),
            cap: Duration::from_secs(16),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &shopload_core::ImportConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base: Duration::from_secs(config.backoff_base_secs),
            cap: Duration::from_secs(config.backoff_cap_secs),
        }
    }

    /// Sleep before retry number `retry` (0-based): `base * 2^retry`, capped.
    ///
    /// With the default policy this yields 1, 2, 4, 8, 16, 16, … seconds.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base
            .saturating_mul(1u32 << retry.min(31))
            .min(self.cap)
    }
}

/// Result of one attempt: a finished value or a transient status to retry on.
pub(crate) enum Attempt<T> {
    Done(T),
    Transient(StatusCode),
}

/// Runs `operation` until it yields [`Attempt::Done`], fails, or
/// `policy.max_attempts` transient statuses have been seen.
///
/// Errors returned by `operation` are propagated immediately. There is no
/// sleep after the final attempt.
///
/// # Errors
///
/// Returns [`AdminError::TransportExhausted`] once every attempt ended in a
/// transient status, or whatever error `operation` returned.
pub(crate) async fn retry_transient<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, AdminError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt<T>, AdminError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_status = StatusCode::SERVICE_UNAVAILABLE;

    for attempt in 1..=max_attempts {
        match operation().await? {
            Attempt::Done(value) => return Ok(value),
            Attempt::Transient(status) => last_status = status,
        }

        if attempt < max_attempts {
            let delay = policy.delay_for(attempt - 1);
            tracing::warn!(
                attempt,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                status = last_status.as_u16(),
                "transient Admin API status, retrying after backoff"
            );
            tokio::time::sleep(delay).await;
        }
    }

    Err(AdminError::TransportExhausted {
        attempts: max_attempts,
        last_status: last_status.as_u16(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base: Duration::ZERO,
            cap: Duration::ZERO,
        }
    }

    #[test]
    fn default_schedule_doubles_up_to_cap() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..7).map(|n| policy.delay_for(n).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16, 16, 16]);
    }

    #[test]
    fn delay_does_not_overflow_on_large_retry_index() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(200), Duration::from_secs(16));
    }

    #[test]
    fn transient_set_is_exact() {
        for code in [429u16, 500, 502, 503, 504] {
            assert!(is_transient(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [200u16, 400, 401, 404, 501] {
            assert!(!is_transient(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_transient(&instant_policy(5), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(Attempt::Done(42))
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_transient(&instant_policy(5), || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Ok(Attempt::Transient(StatusCode::TOO_MANY_REQUESTS))
                } else {
                    Ok(Attempt::Done(99))
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausts_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_transient(&instant_policy(5), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<Attempt<u32>, AdminError>(Attempt::Transient(StatusCode::SERVICE_UNAVAILABLE))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(matches!(
            result,
            Err(AdminError::TransportExhausted {
                attempts: 5,
                last_status: 503
            })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_transient(&instant_policy(5), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<Attempt<u32>, _>(AdminError::Transport {
                    status: 404,
                    body: "Not Found".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(AdminError::Transport { status: 404, .. })));
    }
}
