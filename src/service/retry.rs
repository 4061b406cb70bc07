use anyhow::{anyhow, Result};
use std::future::Future;
use std::time::Duration;

/// Retry schedule for outbound delivery calls: bounded attempts, a fixed
/// backoff table indexed by completed attempt, and a per-attempt timeout.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Vec<Duration>,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: vec![Duration::from_secs(2), Duration::from_secs(4)],
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

/// Runs `op` until it succeeds or the attempt budget is spent. No wait
/// follows the final attempt; the last error is returned as-is.
pub async fn retry_with_backoff<F, Fut, T>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_err = anyhow!("no attempts were made");

    for attempt in 1..=max_attempts {
        match tokio::time::timeout(policy.attempt_timeout, op(attempt)).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => last_err = err,
            Err(_) => {
                last_err = anyhow!(
                    "attempt {attempt} timed out after {:?}",
                    policy.attempt_timeout
                )
            }
        }

        if attempt < max_attempts {
            if let Some(delay) = policy.backoff.get((attempt - 1) as usize) {
                tokio::time::sleep(*delay).await;
            }
        }
    }

    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_with_scheduled_waits() {
        let attempts = Arc::new(AtomicU32::new(0));
        let start = tokio::time::Instant::now();

        let counter = attempts.clone();
        let result = retry_with_backoff(&RetryPolicy::default(), |attempt| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if attempt < 3 {
                    Err(anyhow!("transient failure"))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // 2s after attempt 1, 4s after attempt 2
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_attempts_without_trailing_wait() {
        let attempts = Arc::new(AtomicU32::new(0));
        let start = tokio::time::Instant::now();

        let counter = attempts.clone();
        let result: Result<()> = retry_with_backoff(&RetryPolicy::default(), |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(anyhow!("permanent failure"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn bounds_each_attempt_with_the_timeout() {
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff: vec![Duration::from_secs(1)],
            attempt_timeout: Duration::from_secs(5),
        };

        let result: Result<()> = retry_with_backoff(&policy, |_| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn first_success_skips_all_waits() {
        let result = retry_with_backoff(&RetryPolicy::default(), |attempt| async move {
            Ok::<u32, anyhow::Error>(attempt)
        })
        .await;

        assert_eq!(result.unwrap(), 1);
    }
}
