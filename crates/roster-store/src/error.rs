//! Error types for store operations.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by the athlete store and the uploader.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Backend asked the client to slow down.
    #[error("rate limited by the backend")]
    RateLimited {
        /// Server-provided wait hint, if any.
        retry_after: Option<Duration>,
    },

    /// Backend temporarily unreachable.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the payload.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// Upload was cancelled before this batch was written.
    #[error("upload cancelled")]
    Cancelled,

    /// I/O error in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Unavailable(_))
    }

    /// Wait hint carried by a rate-limit response.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Returns a user-friendly error message suitable for a banner.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::RateLimited { .. } => "The server is busy. Please try again in a moment.",
            Self::Unavailable(_) => "Could not reach the server. Please check your connection.",
            Self::Rejected(_) => "The server rejected some of the data.",
            Self::Cancelled => "The import was cancelled.",
            Self::Io(_) | Self::Json(_) => "An unexpected storage error occurred.",
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(StoreError::RateLimited { retry_after: None }.is_retryable());
        assert!(StoreError::Unavailable("timeout".to_string()).is_retryable());
        assert!(!StoreError::Rejected("bad value".to_string()).is_retryable());
        assert!(!StoreError::Cancelled.is_retryable());
    }

    #[test]
    fn test_retry_after_hint() {
        let err = StoreError::RateLimited {
            retry_after: Some(Duration::from_secs(3)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
        assert_eq!(StoreError::Cancelled.retry_after(), None);
    }

    #[test]
    fn test_user_messages() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert!(err.user_message().contains("connection"));
    }
}
