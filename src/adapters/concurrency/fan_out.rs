//! Bounded fan-out of independent requests.
//!
//! Runs N read-only sub-requests on a `JoinSet` with at most `max_concurrency`
//! in flight. The whole group shares one deadline. The first failure aborts
//! everything still running.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::ports::ServiceError;

/// Default number of sub-requests allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Concurrency bound and deadline for a group of sub-requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    max_concurrency: usize,
    timeout: Duration,
}

impl FanOut {
    /// A zero bound is treated as one.
    pub fn new(max_concurrency: usize, timeout: Duration) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            timeout,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `make(0)..make(count)` concurrently.
    ///
    /// Results come back in submission order. `service` labels errors.
    pub async fn run<T, F, Fut>(
        &self,
        service: &str,
        count: usize,
        make: F,
    ) -> Result<Vec<T>, ServiceError>
    where
        T: Send + 'static,
        F: Fn(usize) -> Fut,
        Fut: Future<Output = Result<T, ServiceError>> + Send + 'static,
    {
        if count == 0 {
            return Ok(Vec::new());
        }

        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for index in 0..count {
            let permits = Arc::clone(&permits);
            let request = make(index);
            let label = service.to_string();
            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| ServiceError::task(label, e.to_string()))?;
                request.await.map(|value| (index, value))
            });
        }

        tracing::debug!(service, count, max_concurrency = self.max_concurrency, "Fan-out started");

        let collect = async {
            let mut slots: Vec<Option<T>> = (0..count).map(|_| None).collect();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Ok((index, value))) => slots[index] = Some(value),
                    Ok(Err(err)) => return Err(err),
                    Err(join_err) => return Err(ServiceError::task(service, join_err.to_string())),
                }
            }
            Ok(slots.into_iter().flatten().collect())
        };

        let outcome = match tokio::time::timeout(self.timeout, collect).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::timeout(service, self.timeout.as_secs())),
        };

        if let Err(err) = &outcome {
            tracing::warn!(service, error = %err, "Fan-out aborted");
            tasks.abort_all();
        }

        outcome
    }
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY, Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn results_keep_submission_order() {
        let fan_out = FanOut::new(3, Duration::from_secs(2));

        let results = fan_out
            .run("test", 3, |index| async move {
                // Later submissions finish first.
                tokio::time::sleep(Duration::from_millis(60 - index as u64 * 20)).await;
                Ok::<_, ServiceError>(index * 10)
            })
            .await
            .unwrap();

        assert_eq!(results, vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn zero_requests_is_empty() {
        let fan_out = FanOut::default();
        let results: Vec<u8> = fan_out
            .run("test", 0, |_| async { Ok(1) })
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let fan_out = FanOut::new(2, Duration::from_secs(2));
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        fan_out
            .run("test", 6, |_| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, ServiceError>(())
                }
            })
            .await
            .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn first_error_cancels_the_rest() {
        let fan_out = FanOut::new(4, Duration::from_secs(10));
        let finished = Arc::new(AtomicUsize::new(0));
        let started = Instant::now();

        let result = fan_out
            .run("test", 3, |index| {
                let finished = Arc::clone(&finished);
                async move {
                    if index == 1 {
                        return Err(ServiceError::status("test", 500));
                    }
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                    Ok(index)
                }
            })
            .await;

        assert!(matches!(result, Err(ServiceError::Status { status: 500, .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn group_deadline_applies() {
        let fan_out = FanOut::new(2, Duration::from_millis(50));

        let result = fan_out
            .run("slow", 2, |_| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, ServiceError>(())
            })
            .await;

        assert!(matches!(result, Err(ServiceError::Timeout { .. })));
    }
}
