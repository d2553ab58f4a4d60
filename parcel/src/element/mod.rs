//! Decoded payload elements.
//!
//! [`Element`] is a closed sum type over the kinds the default resolver knows
//! (raw bytes, text, forms, JSON trees, OAuth records) plus a `Custom` variant
//! for caller-defined types. [`ElementKind`] is the matching tag, checked at
//! payload construction.

mod custom;
mod form;
mod kind;
mod oauth;

use bytes::Bytes;

pub use custom::{CustomElement, CustomValue};
pub use form::Form;
pub use kind::{CustomKind, ElementKind};
pub use oauth::{AccessToken, OAuthErrorResponse, OAuthTokenResponse};

/// A decoded payload value.
///
/// ## Examples
///
/// ```rust
/// use parcel::{Element, ElementKind};
///
/// #[derive(Debug, PartialEq)]
/// struct Product { id: String }
///
/// let text = Element::from("hello");
/// assert_eq!(text.kind(), ElementKind::Text);
///
/// let product = Element::custom(Product { id: "5".into() });
/// assert_eq!(product.kind(), ElementKind::custom::<Product>());
/// assert_eq!(product.downcast_ref::<Product>().unwrap().id, "5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Bytes(Bytes),
    Text(String),
    Form(Form),
    Json(serde_json::Value),
    OAuthToken(OAuthTokenResponse),
    OAuthError(OAuthErrorResponse),
    Custom(CustomElement),
}

impl Element {
    /// Wraps a caller-defined value.
    pub fn custom<T: CustomValue>(value: T) -> Self {
        Self::Custom(CustomElement::new(value))
    }

    /// Returns the runtime kind tag of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Bytes(_) => ElementKind::Bytes,
            Self::Text(_) => ElementKind::Text,
            Self::Form(_) => ElementKind::Form,
            Self::Json(_) => ElementKind::Json,
            Self::OAuthToken(_) => ElementKind::OAuthToken,
            Self::OAuthError(_) => ElementKind::OAuthError,
            Self::Custom(custom) => ElementKind::Custom(custom.kind()),
        }
    }

    /// Borrows a custom element as `T`.
    pub fn downcast_ref<T: CustomValue>(&self) -> Option<&T> {
        match self {
            Self::Custom(custom) => custom.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Self::Form(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_oauth_token(&self) -> Option<&OAuthTokenResponse> {
        match self {
            Self::OAuthToken(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_oauth_error(&self) -> Option<&OAuthErrorResponse> {
        match self {
            Self::OAuthError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Bytes> for Element {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for Element {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Form> for Element {
    fn from(value: Form) -> Self {
        Self::Form(value)
    }
}

impl From<serde_json::Value> for Element {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<OAuthTokenResponse> for Element {
    fn from(value: OAuthTokenResponse) -> Self {
        Self::OAuthToken(value)
    }
}

impl From<OAuthErrorResponse> for Element {
    fn from(value: OAuthErrorResponse) -> Self {
        Self::OAuthError(value)
    }
}

impl From<CustomElement> for Element {
    fn from(value: CustomElement) -> Self {
        Self::Custom(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Product {
        id: String,
    }

    #[test]
    fn test_kind_of_builtins() {
        assert_eq!(Element::from(vec![1u8, 2]).kind(), ElementKind::Bytes);
        assert_eq!(Element::from("x").kind(), ElementKind::Text);
        assert_eq!(Element::from(Form::new()).kind(), ElementKind::Form);
        assert_eq!(Element::from(json!({"a": 1})).kind(), ElementKind::Json);
    }

    #[test]
    fn test_kind_of_custom() {
        let element = Element::custom(Product { id: "1".into() });
        assert_eq!(element.kind(), ElementKind::custom::<Product>());
        assert!(element.as_text().is_none());
    }

    #[test]
    fn test_downcast_on_builtin_is_none() {
        assert!(Element::from("x").downcast_ref::<Product>().is_none());
    }

    #[test]
    fn test_accessors() {
        let element = Element::from("hello");
        assert_eq!(element.as_text(), Some("hello"));
        assert!(element.as_json().is_none());
        assert!(element.as_form().is_none());
    }
}
