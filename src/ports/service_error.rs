//! Errors shared by the domain service ports (weather, jokes, encyclopedia).

/// Failure talking to a domain service.
///
/// Not-found conditions are not errors; ports report them as `None` or an
/// empty list.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Network error during request.
    #[error("{service}: network error: {message}")]
    Network { service: String, message: String },

    /// Request or request group exceeded its deadline.
    #[error("{service}: timed out after {timeout_secs}s")]
    Timeout { service: String, timeout_secs: u64 },

    /// Unexpected HTTP status.
    #[error("{service}: returned status {status}")]
    Status { service: String, status: u16 },

    /// Response body did not match the expected shape.
    #[error("{service}: parse error: {message}")]
    Parse { service: String, message: String },

    /// A concurrent sub-request panicked or was cancelled.
    #[error("{service}: task failed: {message}")]
    Task { service: String, message: String },
}

impl ServiceError {
    pub fn network(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn timeout(service: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            service: service.into(),
            timeout_secs,
        }
    }

    pub fn status(service: impl Into<String>, status: u16) -> Self {
        Self::Status {
            service: service.into(),
            status,
        }
    }

    pub fn parse(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn task(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Task {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Maps a reqwest failure, keeping timeouts distinct.
    pub fn from_reqwest(service: &str, error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::timeout(service, timeout_secs)
        } else if error.is_decode() {
            Self::parse(service, error.to_string())
        } else {
            Self::network(service, error.to_string())
        }
    }
}
