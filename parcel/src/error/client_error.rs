//! Request execution errors.

use thiserror::Error;

use super::{NegotiationError, TransportError};
use crate::client::Request;

/// Errors from [`HttpClient::execute`](crate::HttpClient::execute).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed. Carries the request that was attempted and the
    /// original cause; the request is never retried.
    #[error("HTTP {} {} failed: {source}", .request.method(), .request.endpoint())]
    Execution {
        /// The request that was attempted.
        request: Box<Request>,
        /// The transport failure.
        #[source]
        source: TransportError,
    },

    /// The response body could not be turned into a payload.
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
}

impl ClientError {
    /// Returns the attempted request for execution failures.
    pub fn request(&self) -> Option<&Request> {
        match self {
            Self::Execution { request, .. } => Some(request),
            Self::Negotiation(_) => None,
        }
    }
}
