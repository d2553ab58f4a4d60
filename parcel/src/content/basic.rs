//! Built-in content types.
//!
//! Each static is created on first use and shared; cloning one is a
//! reference count increment.
//!
//! [`ContentTypeRegistry::basic`](crate::ContentTypeRegistry::basic) holds
//! the entries with a unique media type. [`JSON_ELEMENT`], [`OAUTH_TOKEN`] and
//! [`OAUTH_ERROR`] share `application/json` with [`APPLICATION_JSON`] and
//! must be requested explicitly as accept types; [`EMPTY`] is never matched.

use once_cell::sync::Lazy;

use super::media_type;
use super::ContentType;
use crate::element::ElementKind;

/// Sentinel for responses without a body or a declared media type.
pub static EMPTY: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::EMPTY_BODY, ElementKind::Text));

/// `text/plain` as text.
pub static TEXT_PLAIN: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::TEXT_PLAIN, ElementKind::Text));

/// `text/xml` as text.
pub static TEXT_XML: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::TEXT_XML, ElementKind::Text));

/// `text/html` as text.
pub static TEXT_HTML: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::TEXT_HTML, ElementKind::Text));

/// `application/xml` as text.
pub static APPLICATION_XML: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::APPLICATION_XML, ElementKind::Text));

/// `application/json` as text.
pub static APPLICATION_JSON: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::APPLICATION_JSON, ElementKind::Text));

/// `application/octet-stream` as raw bytes.
pub static APPLICATION_OCTET_STREAM: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::APPLICATION_OCTET_STREAM, ElementKind::Bytes));

/// `application/x-www-form-urlencoded` as a form.
pub static FORM_URL_ENCODED: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::FORM_URL_ENCODED, ElementKind::Form));

/// `application/json` as a JSON tree.
pub static JSON_ELEMENT: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::APPLICATION_JSON, ElementKind::Json));

/// `application/json` as an OAuth token response.
pub static OAUTH_TOKEN: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::APPLICATION_JSON, ElementKind::OAuthToken));

/// `application/json` as an OAuth error response.
pub static OAUTH_ERROR: Lazy<ContentType> =
    Lazy::new(|| ContentType::new(media_type::APPLICATION_JSON, ElementKind::OAuthError));

/// The entries of the basic registry, one per media type.
pub fn registered() -> Vec<ContentType> {
    [
        &TEXT_PLAIN,
        &TEXT_XML,
        &TEXT_HTML,
        &APPLICATION_XML,
        &APPLICATION_JSON,
        &APPLICATION_OCTET_STREAM,
        &FORM_URL_ENCODED,
    ]
    .into_iter()
    .map(|ct| ContentType::clone(ct))
    .collect()
}

/// Every built-in content type.
pub fn all() -> Vec<ContentType> {
    let mut all = vec![EMPTY.clone()];
    all.extend(registered());
    all.extend([JSON_ELEMENT.clone(), OAUTH_TOKEN.clone(), OAUTH_ERROR.clone()]);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registered_media_types_are_unique() {
        let registered = registered();
        let keys: HashSet<String> = registered
            .iter()
            .map(ContentType::normalized_media_type)
            .collect();
        assert_eq!(keys.len(), registered.len());
        assert!(!keys.contains(&EMPTY.normalized_media_type()));
    }

    #[test]
    fn test_statics_are_shared() {
        assert_eq!(*TEXT_PLAIN, TEXT_PLAIN.clone());
        assert_ne!(*APPLICATION_JSON, *JSON_ELEMENT);
        assert_eq!(all().len(), 11);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(EMPTY.element_kind(), ElementKind::Text);
        assert_eq!(APPLICATION_OCTET_STREAM.element_kind(), ElementKind::Bytes);
        assert_eq!(FORM_URL_ENCODED.element_kind(), ElementKind::Form);
        assert_eq!(OAUTH_TOKEN.element_kind(), ElementKind::OAuthToken);
    }
}
