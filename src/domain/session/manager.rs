use chrono::Duration;
use std::future::Future;
use tokio::sync::Mutex;

use crate::domain::foundation::Timestamp;

/// Idle timeout applied when none is configured.
pub const DEFAULT_IDLE_TIMEOUT_SECS: i64 = 5 * 60;

/// An opaque provider session id and when it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: String,
    pub created_at: Timestamp,
}

/// Hands out a session id, renewing it lazily once it has expired.
#[derive(Debug)]
pub struct SessionManager {
    idle_timeout: Duration,
    current: Mutex<Option<SessionHandle>>,
}

impl SessionManager {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            current: Mutex::new(None),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Returns a live session id, calling `create` when none is live.
    ///
    /// Errors from `create` propagate unchanged and leave no session behind.
    pub async fn session_id<F, Fut, E>(&self, create: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        self.session_id_at(Timestamp::now(), create).await
    }

    /// Same as [`SessionManager::session_id`] with an explicit clock reading.
    pub async fn session_id_at<F, Fut, E>(&self, now: Timestamp, create: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        // Held across the remote call so concurrent callers share one renewal.
        let mut current = self.current.lock().await;

        if let Some(handle) = current.as_ref() {
            if !handle.created_at.is_older_than(self.idle_timeout, &now) {
                return Ok(handle.id.clone());
            }
            tracing::debug!(session_id = %handle.id, "Assistant session expired");
        }
        *current = None;

        let id = create().await?;
        tracing::info!(session_id = %id, "Assistant session renewed");
        *current = Some(SessionHandle {
            id: id.clone(),
            created_at: now,
        });
        Ok(id)
    }

    /// The session currently held, live or not.
    pub async fn current(&self) -> Option<SessionHandle> {
        self.current.lock().await.clone()
    }

    /// Drops the held session so the next call renews it.
    pub async fn invalidate(&self) {
        *self.current.lock().await = None;
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_IDLE_TIMEOUT_SECS))
    }
}
