//! Integration tests for payload construction.
//!
//! Covers:
//! - Round trips of every built-in element kind
//! - The form scenario with characters that need percent-encoding
//! - Parent/child wrapping built from elements and from bytes
//! - Custom resolver fallback policies

mod common;

use std::sync::Arc;

use common::{bananas, container, product_content_type, Product, ProductContainer};
use parcel::{
    basic, ContentResolver, ContentType, Element, ElementKind, FallbackPolicy, Form, Operation,
    Payload, PayloadError, ResolverError,
};
use serde_json::json;
use tracing_test::traced_test;

/// Every built-in kind survives bytes → element → bytes.
#[test]
fn test_builtin_round_trips() {
    let cases: Vec<(&ContentType, Element)> = vec![
        (&basic::TEXT_PLAIN, Element::from("")),
        (&basic::TEXT_PLAIN, Element::from("Ünïcödé ✓ 日本")),
        (&basic::APPLICATION_OCTET_STREAM, Element::from(vec![0u8, 159, 146, 150])),
        (&basic::FORM_URL_ENCODED, Element::from(Form::new())),
        (
            &basic::FORM_URL_ENCODED,
            Element::from(Form::from([("a b", "c&d"), ("e=f", "g+h")])),
        ),
        (&basic::JSON_ELEMENT, Element::from(json!({"list": [1, "two", null]}))),
    ];

    for (content_type, element) in cases {
        let encoded = Payload::from_element(content_type, element.clone()).unwrap();
        let decoded = Payload::from_bytes(content_type, encoded.bytes().clone()).unwrap();
        assert_eq!(decoded.element(), &element, "round trip via {content_type}");
    }
}

/// The multi-key form with non-ASCII keys and values.
#[test]
fn test_form_scenario() {
    let form = Form::from([
        ("key1", "value1"),
        ("SomeKey", "SomeValue"),
        ("Niña", "Ötztal-Express"),
    ]);
    let payload = Payload::from_element(&basic::FORM_URL_ENCODED, form.clone()).unwrap();

    let text = payload.text();
    assert!(text.contains("key1=value1"));
    assert!(text.contains("SomeKey=SomeValue"));
    assert!(text.contains("Ni%C3%B1a=%C3%96tztal-Express"));
    assert_eq!(text.matches('&').count(), 2);

    let decoded = Payload::from_bytes(&basic::FORM_URL_ENCODED, payload.bytes().clone()).unwrap();
    assert_eq!(decoded.element().as_form(), Some(&form));
}

/// Values may contain `=`; only the first one splits a pair.
#[test]
fn test_form_value_with_equals_sign() {
    let payload = Payload::from_bytes(&basic::FORM_URL_ENCODED, "token=abc==&empty=").unwrap();
    let form = payload.element().as_form().unwrap();
    assert_eq!(form.get("token"), Some("abc=="));
    assert_eq!(form.get("empty"), Some(""));
}

/// OAuth records decode with absent optional fields.
#[test]
fn test_oauth_records() {
    let token = Payload::from_bytes(
        &basic::OAUTH_TOKEN,
        r#"{"token_type":"bearer","expires_in":300,"access_token":"eyJ"}"#,
    )
    .unwrap();
    let record = token.element().as_oauth_token().unwrap();
    assert_eq!(record.refresh_token, None);
    let access = record.to_access_token().unwrap();
    assert_eq!(access.authorization_value(), "Bearer eyJ");
    assert!(!access.is_expired());

    let error = Payload::from_bytes(&basic::OAUTH_ERROR, r#"{"error":"invalid_client"}"#).unwrap();
    let record = error.element().as_oauth_error().unwrap();
    assert_eq!(record.error, "invalid_client");
    assert_eq!(record.description, None);
}

/// Built from the parent or from the child, the payload is the same.
#[test]
fn test_parent_and_child_construction_agree() {
    let ct = product_content_type(FallbackPolicy::FallbackToDefault);
    let from_child = Payload::from_element(&ct, Element::custom(bananas())).unwrap();
    let from_parent = Payload::from_element(&ct, Element::custom(container(bananas()))).unwrap();

    assert_eq!(from_child.element(), from_parent.element());
    assert_eq!(from_child.bytes(), from_parent.bytes());
    assert_eq!(from_child.parent_bytes(), from_parent.parent_bytes());
    assert_eq!(from_child.parent_as::<ProductContainer>(), Some(&container(bananas())));
}

/// `extract(wrap(x)) == x` through the resolver the content type carries.
#[test]
fn test_wrap_extract_law() {
    let ct = product_content_type(FallbackPolicy::Propagate);
    let resolver = ct.resolver().unwrap();
    let parent_kind = ct.wrapping_kind().unwrap();

    for name in ["", "Bananas", "Äpfel & Birnen"] {
        let child = Element::custom(Product {
            name: name.to_string(),
            ..bananas()
        });
        let parent = resolver.wrap(parent_kind, &child).unwrap();
        assert_eq!(resolver.extract(parent_kind, &parent).unwrap(), child);
    }
}

/// Parent-shaped wire bytes are kept verbatim as the parent bytes.
#[test]
fn test_decode_parent_bytes() {
    let ct = product_content_type(FallbackPolicy::Propagate);
    let wire = serde_json::to_vec(&container(bananas())).unwrap();
    let payload = Payload::from_bytes(&ct, wire.clone()).unwrap();

    assert_eq!(payload.element_as::<Product>(), Some(&bananas()));
    assert_eq!(payload.parent_bytes().unwrap().as_ref(), wire.as_slice());
    assert_eq!(payload.bytes().as_ref(), serde_json::to_vec(&bananas()).unwrap().as_slice());
    assert_eq!(payload.wire_bytes().as_ref(), wire.as_slice());
}

/// Child-shaped bytes are accepted after the parent decode fails.
#[test]
fn test_decode_child_bytes() {
    let ct = product_content_type(FallbackPolicy::Propagate);
    let wire = serde_json::to_vec(&bananas()).unwrap();
    let payload = Payload::from_bytes(&ct, wire.clone()).unwrap();

    assert_eq!(payload.element_as::<Product>(), Some(&bananas()));
    assert_eq!(payload.bytes().as_ref(), wire.as_slice());
    assert_eq!(payload.parent_as::<ProductContainer>(), Some(&container(bananas())));
}

/// Neither parent nor child: rejected at construction.
#[test]
fn test_unsupported_element() {
    let ct = product_content_type(FallbackPolicy::Propagate);
    let err = Payload::from_element(&ct, json!({"id": "p-1"})).unwrap_err();
    match err {
        PayloadError::UnsupportedElement {
            actual,
            element,
            wrapping,
        } => {
            assert_eq!(actual, ElementKind::Json);
            assert_eq!(element, ElementKind::custom::<Product>());
            assert_eq!(wrapping, ElementKind::custom::<ProductContainer>());
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A resolver that fails every serialization and only decodes text.
#[derive(Debug)]
struct BrokenSerializer;

impl ContentResolver for BrokenSerializer {
    fn serialize(&self, _kind: ElementKind, _element: &Element) -> Result<Vec<u8>, ResolverError> {
        Err(ResolverError::custom("serializer offline"))
    }

    fn deserialize(&self, kind: ElementKind, _bytes: &[u8]) -> Result<Element, ResolverError> {
        Err(ResolverError::not_supported(kind, Operation::Deserialize))
    }
}

fn text_with(policy: FallbackPolicy) -> ContentType {
    ContentType::builder("text/plain", ElementKind::Text)
        .resolver(Arc::new(BrokenSerializer))
        .fallback(policy)
        .build()
}

/// The default policy recovers through the default resolver and warns.
#[traced_test]
#[test]
fn test_fallback_to_default() {
    let payload = Payload::from_element(&text_with(FallbackPolicy::FallbackToDefault), "hi").unwrap();
    assert_eq!(payload.bytes().as_ref(), b"hi");
    assert!(logs_contain("Custom resolver failed"));
    assert!(logs_contain("serializer offline"));
}

/// `Propagate` surfaces the custom resolver's own error.
#[test]
fn test_propagate() {
    let err = Payload::from_element(&text_with(FallbackPolicy::Propagate), "hi").unwrap_err();
    assert!(matches!(
        err,
        PayloadError::Resolver(ResolverError::Custom { ref message }) if message == "serializer offline"
    ));

    let err = Payload::from_bytes(&text_with(FallbackPolicy::Propagate), "hi").unwrap_err();
    assert!(matches!(
        err,
        PayloadError::Resolver(ResolverError::NotSupported { kind: ElementKind::Text, .. })
    ));
}
