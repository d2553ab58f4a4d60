//! Resolver for the built-in element kinds.

use bytes::Bytes;

use super::{ContentResolver, Operation};
use crate::element::{Element, ElementKind, Form};
use crate::error::ResolverError;

/// Converts the built-in element kinds.
///
/// | Kind | Bytes |
/// |------|-------|
/// | `Bytes` | identity |
/// | `Text` | UTF-8 (invalid sequences are replaced when decoding) |
/// | `Form` | `application/x-www-form-urlencoded` |
/// | `Json` | compact JSON |
/// | `OAuthToken`, `OAuthError` | JSON objects |
///
/// Custom kinds, wrapping and extraction are not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl ContentResolver for DefaultResolver {
    fn serialize(&self, _kind: ElementKind, element: &Element) -> Result<Vec<u8>, ResolverError> {
        match element {
            Element::Bytes(bytes) => Ok(bytes.to_vec()),
            Element::Text(text) => Ok(text.as_bytes().to_vec()),
            Element::Form(form) => Ok(form.encode().into_bytes()),
            Element::Json(value) => Ok(serde_json::to_vec(value)?),
            Element::OAuthToken(token) => Ok(serde_json::to_vec(token)?),
            Element::OAuthError(error) => Ok(serde_json::to_vec(error)?),
            Element::Custom(_) => Err(ResolverError::not_supported(
                element.kind(),
                Operation::Serialize,
            )),
        }
    }

    fn deserialize(&self, kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError> {
        match kind {
            ElementKind::Bytes => Ok(Element::Bytes(Bytes::copy_from_slice(bytes))),
            ElementKind::Text => Ok(Element::Text(String::from_utf8_lossy(bytes).into_owned())),
            ElementKind::Form => Ok(Element::Form(Form::decode_bytes(bytes))),
            ElementKind::Json => Ok(Element::Json(serde_json::from_slice(bytes)?)),
            ElementKind::OAuthToken => Ok(Element::OAuthToken(serde_json::from_slice(bytes)?)),
            ElementKind::OAuthError => Ok(Element::OAuthError(serde_json::from_slice(bytes)?)),
            ElementKind::Custom(_) => Err(ResolverError::not_supported(kind, Operation::Deserialize)),
        }
    }
}
