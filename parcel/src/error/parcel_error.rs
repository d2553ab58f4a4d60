//! Top-level error type.

use super::{
    ClientError, ConfigError, NegotiationError, PayloadError, RegistryError, ResolverError,
};
use thiserror::Error;

/// Top-level error type for all crate operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use parcel::ParcelError;
///
/// fn handle_error(err: ParcelError) {
///     match err {
///         ParcelError::Registry(e) => eprintln!("Content type table: {e}"),
///         ParcelError::Resolver(e) => eprintln!("Conversion failed: {e}"),
///         ParcelError::Payload(e) => eprintln!("Invalid payload: {e}"),
///         ParcelError::Negotiation(e) => eprintln!("Unusable response: {e}"),
///         ParcelError::Config(e) => eprintln!("Configuration error: {e}"),
///         ParcelError::Client(e) => eprintln!("Request failed: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ParcelError {
    /// Content type registration or lookup errors.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Resolver errors surfaced outside of payload construction.
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Payload construction errors.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Response content negotiation errors.
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request execution errors.
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_registry_error() {
        let err = RegistryError::NotFound {
            media_type: "text/csv".to_string(),
        };
        let parcel_err: ParcelError = err.into();
        assert!(matches!(parcel_err, ParcelError::Registry(_)));
    }

    #[test]
    fn test_from_negotiation_error() {
        let err = NegotiationError::NoMatchingContentType {
            media_type: "application/unknown-xyz".to_string(),
        };
        let parcel_err: ParcelError = err.into();
        assert!(matches!(parcel_err, ParcelError::Negotiation(_)));
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = ParcelError::Config(ConfigError::missing_field("endpoint"));
        assert_eq!(err.to_string(), "Missing required field: endpoint");
    }
}
