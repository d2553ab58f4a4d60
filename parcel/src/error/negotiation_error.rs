//! Response content negotiation errors.

use thiserror::Error;

use super::PayloadError;

/// Errors turning a response body into a [`Payload`](crate::Payload).
#[derive(Debug, Error)]
pub enum NegotiationError {
    /// The declared media type matched neither the accepted content types nor
    /// the basic registry.
    #[error(
        "No content type matches '{media_type}'; declare a matching accept type on the request"
    )]
    NoMatchingContentType {
        /// The media type declared by the response.
        media_type: String,
    },

    /// A content type matched but the body could not be decoded with it.
    #[error("Failed to decode response body: {0}")]
    Payload(#[from] PayloadError),
}

impl NegotiationError {
    /// Returns `true` if no content type matched the response.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::NoMatchingContentType { .. })
    }
}
