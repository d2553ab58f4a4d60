//! Picking the content type of a response body.
//!
//! The declared media type is matched by prefix, first against the content
//! types the caller accepts and then against the basic registry:
//!
//! | Declared media type | Body | Result |
//! |---------------------|------|--------|
//! | absent | empty | [`Payload::empty`] |
//! | absent | non-empty | `application/octet-stream` payload |
//! | present | any | first accept type, else basic registry, else error |

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::content::{basic, media_type, ContentType, ContentTypeRegistry};
use crate::error::NegotiationError;
use crate::payload::Payload;
use crate::resolver::ContentResolver;

/// Matches response media types to content types.
///
/// ```rust
/// use parcel::{basic, ContentTypeRegistry, Negotiator};
///
/// let registry = ContentTypeRegistry::basic();
/// let accept = [basic::JSON_ELEMENT.clone()];
/// let negotiator = Negotiator::new(&registry).accept(&accept);
///
/// let payload = negotiator
///     .negotiate(Some("application/json; charset=utf-8"), r#"{"id":1}"#)
///     .unwrap();
/// assert_eq!(payload.element().as_json().unwrap()["id"], 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Negotiator<'a> {
    basic: &'a ContentTypeRegistry,
    accept: &'a [ContentType],
    resolver: Option<&'a Arc<dyn ContentResolver>>,
}

impl<'a> Negotiator<'a> {
    /// Creates a negotiator that falls back to `basic`.
    pub fn new(basic: &'a ContentTypeRegistry) -> Self {
        Self {
            basic,
            accept: &[],
            resolver: None,
        }
    }

    /// Sets the content types tried before the basic registry, in order.
    pub fn accept(mut self, accept: &'a [ContentType]) -> Self {
        self.accept = accept;
        self
    }

    /// Sets a resolver that replaces the chosen content type's own resolver.
    pub fn resolver(mut self, resolver: Option<&'a Arc<dyn ContentResolver>>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Finds the content type for a declared media type.
    ///
    /// ## Errors
    ///
    /// Returns [`NegotiationError::NoMatchingContentType`] when neither the
    /// accept types nor the basic registry match.
    pub fn resolve_content_type(&self, declared: &str) -> Result<ContentType, NegotiationError> {
        let normalized = media_type::normalize(declared);

        if let Some(accepted) = self
            .accept
            .iter()
            .find(|ct| ct.normalized_media_type().starts_with(&normalized))
        {
            debug!(media_type = %normalized, content_type = %accepted, "Matched accept type");
            return Ok(accepted.clone());
        }

        if let Some(fallback) = self.basic.find_by_prefix(&normalized) {
            debug!(media_type = %normalized, content_type = %fallback, "Matched basic registry");
            return Ok(fallback);
        }

        Err(NegotiationError::NoMatchingContentType {
            media_type: declared.trim().to_string(),
        })
    }

    /// Builds the response payload for `bytes` declared as `declared`.
    ///
    /// A blank declared media type counts as absent.
    pub fn negotiate(
        &self,
        declared: Option<&str>,
        bytes: impl Into<Bytes>,
    ) -> Result<Payload, NegotiationError> {
        let bytes = bytes.into();
        match declared.filter(|raw| !media_type::normalize(raw).is_empty()) {
            None if bytes.is_empty() => Ok(Payload::empty()),
            None => {
                debug!(len = bytes.len(), "No media type declared, treating body as octet stream");
                Ok(Payload::from_bytes(&basic::APPLICATION_OCTET_STREAM, bytes)?)
            }
            Some(raw) => {
                let content_type = self.resolve_content_type(raw)?;
                Ok(Payload::from_bytes_with(&content_type, bytes, self.resolver)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn csv() -> ContentType {
        ContentType::new("text/csv", ElementKind::Text)
    }

    #[test]
    fn test_empty_response() {
        let registry = ContentTypeRegistry::basic();
        let payload = Negotiator::new(&registry).negotiate(None, Bytes::new()).unwrap();
        assert!(payload.is_empty_body());

        let payload = Negotiator::new(&registry).negotiate(Some("  "), Bytes::new()).unwrap();
        assert!(payload.is_empty_body());
    }

    #[test]
    fn test_untyped_bytes_are_octet_stream() {
        let registry = ContentTypeRegistry::basic();
        let payload = Negotiator::new(&registry)
            .negotiate(None, vec![0xCA, 0xFE])
            .unwrap();
        assert_eq!(payload.media_type(), media_type::APPLICATION_OCTET_STREAM);
        assert_eq!(payload.element().as_bytes().unwrap().as_ref(), &[0xCA_u8, 0xFE]);
    }

    #[test]
    fn test_accept_types_win() {
        let registry = ContentTypeRegistry::basic();
        let accept = [basic::JSON_ELEMENT.clone()];
        let negotiator = Negotiator::new(&registry).accept(&accept);

        let ct = negotiator.resolve_content_type("application/json").unwrap();
        assert_eq!(ct, *basic::JSON_ELEMENT);

        let ct = Negotiator::new(&registry)
            .resolve_content_type("application/json")
            .unwrap();
        assert_eq!(ct, *basic::APPLICATION_JSON);
    }

    #[test]
    fn test_prefix_match() {
        let registry = ContentTypeRegistry::new();
        let accept = [ContentType::new("application/vnd.api+json", ElementKind::Json)];
        let ct = Negotiator::new(&registry)
            .accept(&accept)
            .resolve_content_type("application/vnd.api")
            .unwrap();
        assert_eq!(ct.media_type(), "application/vnd.api+json");
    }

    #[test]
    fn test_basic_registry_fallback() {
        let registry = ContentTypeRegistry::basic();
        let accept = [csv()];
        let payload = Negotiator::new(&registry)
            .accept(&accept)
            .negotiate(Some("text/plain; charset=utf-8"), "hello")
            .unwrap();
        assert_eq!(payload.content_type(), &*basic::TEXT_PLAIN);
        assert_eq!(payload.element().as_text(), Some("hello"));
    }

    #[test]
    fn test_no_match() {
        let registry = ContentTypeRegistry::basic();
        let err = Negotiator::new(&registry)
            .negotiate(Some("application/unknown-xyz"), "data")
            .unwrap_err();
        assert!(err.is_unmatched());
        assert!(err.to_string().contains("application/unknown-xyz"));
    }

    #[test]
    fn test_decode_failure_is_payload_error() {
        let registry = ContentTypeRegistry::basic();
        let accept = [basic::JSON_ELEMENT.clone()];
        let err = Negotiator::new(&registry)
            .accept(&accept)
            .negotiate(Some("application/json"), "{not json")
            .unwrap_err();
        assert!(matches!(err, NegotiationError::Payload(_)));
    }
}
