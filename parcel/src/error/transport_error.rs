//! Transport-level errors.

use thiserror::Error;

/// Errors reported by a [`Transport`](crate::Transport).
///
/// These represent network-level failures; HTTP error statuses are not
/// errors at this layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The `reqwest` transport failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Request(e) => e.is_timeout(),
            Self::Connection(_) => false,
        }
    }

    /// Returns `true` if no connection could be established.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Request(e) => e.is_connect(),
            Self::Timeout { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout() {
        let err = TransportError::Timeout { duration_ms: 5000 };
        assert!(err.is_timeout());
        assert!(!err.is_connect());
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_connection() {
        let err = TransportError::Connection("connection refused".to_string());
        assert!(err.is_connect());
        assert!(!err.is_timeout());
    }
}
