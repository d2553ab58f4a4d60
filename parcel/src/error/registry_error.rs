//! Content type registry errors.

use thiserror::Error;

/// Errors from [`ContentTypeRegistry`](crate::ContentTypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A content type is already registered under this normalized media type.
    #[error("Content type already registered for '{media_type}'")]
    DuplicateRegistration {
        /// The normalized media type.
        media_type: String,
    },

    /// No content type is registered for the media type.
    #[error("No content type registered for '{media_type}'")]
    NotFound {
        /// The media type as it was looked up.
        media_type: String,
    },
}
