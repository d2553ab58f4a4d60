//! Client configuration errors.

use thiserror::Error;

use super::TransportError;

/// Errors in [`HttpClientBuilder`](crate::HttpClientBuilder) configuration.
///
/// These errors occur when the client is built, typically indicating
/// programmer errors or invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A header name cannot be sent.
    #[error("Invalid header name '{name}': {message}")]
    InvalidHeader {
        /// The rejected header name.
        name: String,
        /// Why the name was rejected.
        message: String,
    },

    /// The default transport could not be constructed.
    #[error("Failed to construct transport: {0}")]
    Transport(#[from] TransportError),
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("endpoint");
        assert_eq!(err.to_string(), "Missing required field: endpoint");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_header() {
        let err = ConfigError::invalid_header("bad header", "invalid character");
        assert_eq!(
            err.to_string(),
            "Invalid header name 'bad header': invalid character"
        );
    }
}
