//! Resolver errors.

use thiserror::Error;

use crate::element::ElementKind;
use crate::resolver::Operation;

/// Errors raised by a [`ContentResolver`](crate::ContentResolver).
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The resolver does not handle this element kind for this operation.
    #[error("Cannot {operation} element kind '{kind}': no resolver supports it")]
    NotSupported {
        /// The element kind that was requested.
        kind: ElementKind,
        /// The operation that was attempted.
        operation: Operation,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a caller-supplied resolver.
    #[error("Resolver failed: {message}")]
    Custom {
        /// Description of the failure.
        message: String,
    },
}

impl ResolverError {
    /// Creates a not-supported error.
    pub fn not_supported(kind: ElementKind, operation: Operation) -> Self {
        Self::NotSupported { kind, operation }
    }

    /// Creates a custom resolver error.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// Returns `true` if the resolver did not handle the requested kind.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }

    /// Returns `true` if the bytes could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Json(e) if e.is_syntax() || e.is_data() || e.is_eof())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_supported_display() {
        let err = ResolverError::not_supported(ElementKind::Form, Operation::Wrap);
        assert_eq!(
            err.to_string(),
            "Cannot wrap element kind 'form': no resolver supports it"
        );
        assert!(err.is_not_supported());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_json_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ResolverError::from(json_err);
        assert!(err.is_parse_error());
        assert!(!err.is_not_supported());
    }

    #[test]
    fn test_custom_display() {
        let err = ResolverError::custom("unsupported parent");
        assert_eq!(err.to_string(), "Resolver failed: unsupported parent");
    }
}
