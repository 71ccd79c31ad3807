//! Bounded exponential backoff for transient provider failures.

use std::time::Duration;

use tracing::warn;

use crate::{DeliveryError, GitError};

/// Retry policy for provider calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial call.
    pub max_retries: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier applied after each attempt.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Disable retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

/// Run an async operation, retrying transient failures with backoff.
///
/// Fatal errors surface immediately as [`DeliveryError::Fatal`]; transient
/// ones are retried up to the budget, then escalate as
/// [`DeliveryError::RetriesExhausted`].
pub async fn with_backoff<T, F, Fut>(
    config: &RetryConfig,
    context: &str,
    mut op: F,
) -> Result<T, DeliveryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GitError>>,
{
    let mut attempts = 0;
    let mut backoff = config.initial_backoff;

    loop {
        attempts += 1;

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                if attempts > config.max_retries {
                    return Err(DeliveryError::RetriesExhausted {
                        attempts,
                        source: e,
                    });
                }
                warn!(
                    "{context} failed: {e}, retrying in {backoff:?} (attempt {attempts}/{max})",
                    max = config.max_retries
                );
                tokio::time::sleep(backoff).await;
                backoff = std::cmp::min(
                    Duration::from_secs_f64(backoff.as_secs_f64() * config.multiplier),
                    config.max_backoff,
                );
            }
            Err(e) => return Err(DeliveryError::Fatal(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast() -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(4),
            multiplier: 2.0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_are_retried_until_success() {
        let calls = AtomicU32::new(0);

        let result = with_backoff(&fast(), "get file", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(GitError::Timeout {
                        context: "get file".into(),
                    })
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn budget_exhaustion_escalates() {
        let calls = AtomicU32::new(0);

        let err = with_backoff(&fast(), "get file", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<(), _>(GitError::RateLimited {
                    context: "get file".into(),
                })
            }
        })
        .await
        .unwrap_err();

        // Initial call plus three retries.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(matches!(
            err,
            DeliveryError::RetriesExhausted { attempts: 4, .. }
        ));
    }

    #[tokio::test]
    async fn fatal_errors_skip_the_retry_budget() {
        let calls = AtomicU32::new(0);

        let err = with_backoff(&fast(), "get repository", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(GitError::Auth) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, DeliveryError::Fatal(GitError::Auth)));
    }
}
