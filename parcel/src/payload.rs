//! Payloads: a content type with consistent byte and element views.
//!
//! A [`Payload`] is built either from an element or from bytes; the missing
//! view is computed through the content type's converter. For wrapping
//! content types (element `Product` sent inside a `ProductContainer`), the
//! payload additionally holds the parent element and its bytes, and either
//! the child or the parent may be supplied.
//!
//! ## Examples
//!
//! ```rust
//! use parcel::{basic, Form, Payload};
//!
//! let form = Form::from([("grant_type", "client_credentials")]);
//! let payload = Payload::from_element(&basic::FORM_URL_ENCODED, form).unwrap();
//! assert_eq!(payload.bytes(), "grant_type=client_credentials".as_bytes());
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::content::{basic, media_type, ContentType};
use crate::element::{CustomValue, Element, ElementKind};
use crate::error::PayloadError;
use crate::resolver::{ContentResolver, Converter, WireShape};

#[derive(Debug, Clone, PartialEq)]
struct Wrapped {
    parent: Element,
    parent_bytes: Bytes,
}

/// A content type together with matching bytes and decoded element.
///
/// Invariants, established at construction:
/// - `element().kind()` equals the content type's element kind
/// - `bytes()` is the serialized element
/// - for wrapping content types, `parent().kind()` equals the wrapping kind
///   and `parent_bytes()` holds the serialized parent
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    content_type: ContentType,
    bytes: Bytes,
    element: Element,
    wrapped: Option<Wrapped>,
}

impl Payload {
    /// The empty payload: `EMPTY_BODY` content type, no bytes, empty text.
    pub fn empty() -> Self {
        Self {
            content_type: basic::EMPTY.clone(),
            bytes: Bytes::new(),
            element: Element::Text(String::new()),
            wrapped: None,
        }
    }

    /// Builds a payload from an element using the content type's resolver.
    ///
    /// ## Errors
    ///
    /// Fails if the element's kind does not fit the content type or the
    /// element cannot be converted.
    pub fn from_element(
        content_type: &ContentType,
        element: impl Into<Element>,
    ) -> Result<Self, PayloadError> {
        Self::from_element_with(content_type, element, None)
    }

    /// Builds a payload from an element, with `resolver` taking the place of
    /// the content type's own resolver when given.
    pub fn from_element_with(
        content_type: &ContentType,
        element: impl Into<Element>,
        resolver: Option<&Arc<dyn ContentResolver>>,
    ) -> Result<Self, PayloadError> {
        let element = element.into();
        trace!(content_type = %content_type, kind = %element.kind(), "Creating payload from element");
        let builder = Builder::new(content_type, resolver);
        if content_type.is_wrapping() {
            builder.wrapped(element, None)
        } else {
            builder.plain_from_element(element)
        }
    }

    /// Builds a payload from bytes using the content type's resolver.
    ///
    /// ## Errors
    ///
    /// Fails if the bytes cannot be decoded or decode to the wrong kind.
    pub fn from_bytes(content_type: &ContentType, bytes: impl Into<Bytes>) -> Result<Self, PayloadError> {
        Self::from_bytes_with(content_type, bytes, None)
    }

    /// Builds a payload from bytes, with `resolver` taking the place of the
    /// content type's own resolver when given.
    pub fn from_bytes_with(
        content_type: &ContentType,
        bytes: impl Into<Bytes>,
        resolver: Option<&Arc<dyn ContentResolver>>,
    ) -> Result<Self, PayloadError> {
        let bytes = bytes.into();
        trace!(content_type = %content_type, len = bytes.len(), "Creating payload from bytes");
        let builder = Builder::new(content_type, resolver);
        if content_type.is_wrapping() {
            builder.wrapped_from_bytes(bytes)
        } else {
            builder.plain_from_bytes(bytes)
        }
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// The declared media type, as sent in the `content-type` header.
    pub fn media_type(&self) -> &str {
        self.content_type.media_type()
    }

    /// The serialized element.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The element as a caller-defined type.
    pub fn element_as<T: CustomValue>(&self) -> Option<&T> {
        self.element.downcast_ref()
    }

    /// Consumes the payload, returning its element.
    pub fn into_element(self) -> Element {
        self.element
    }

    /// Returns `true` if the payload holds a parent element.
    pub fn is_wrapped(&self) -> bool {
        self.wrapped.is_some()
    }

    /// The parent element of a wrapping content type.
    pub fn parent(&self) -> Option<&Element> {
        self.wrapped.as_ref().map(|w| &w.parent)
    }

    /// The parent as a caller-defined type.
    pub fn parent_as<T: CustomValue>(&self) -> Option<&T> {
        self.parent().and_then(|parent| parent.downcast_ref())
    }

    /// The serialized parent of a wrapping content type.
    pub fn parent_bytes(&self) -> Option<&Bytes> {
        self.wrapped.as_ref().map(|w| &w.parent_bytes)
    }

    /// The bytes that go on the wire: the parent bytes when wrapped,
    /// otherwise the element bytes.
    pub fn wire_bytes(&self) -> &Bytes {
        self.parent_bytes().unwrap_or(&self.bytes)
    }

    /// The wire bytes as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.wire_bytes())
    }

    /// Returns `true` for the empty payload.
    pub fn is_empty_body(&self) -> bool {
        self.content_type.media_type() == media_type::EMPTY_BODY && self.bytes.is_empty()
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

/// One payload construction: a content type and the converter resolved for it.
struct Builder<'a> {
    content_type: &'a ContentType,
    converter: Converter,
}

impl<'a> Builder<'a> {
    fn new(content_type: &'a ContentType, resolver: Option<&Arc<dyn ContentResolver>>) -> Self {
        Self {
            content_type,
            converter: content_type.converter_with(resolver),
        }
    }

    fn element_kind(&self) -> ElementKind {
        self.content_type.element_kind()
    }

    fn wrapping_kind(&self) -> ElementKind {
        self.content_type
            .wrapping_kind()
            .unwrap_or_else(|| self.content_type.element_kind())
    }

    fn check(&self, expected: ElementKind, element: &Element) -> Result<(), PayloadError> {
        let actual = element.kind();
        if actual == expected {
            Ok(())
        } else {
            Err(PayloadError::TypeMismatch { expected, actual })
        }
    }

    fn plain_from_element(self, element: Element) -> Result<Payload, PayloadError> {
        self.check(self.element_kind(), &element)?;
        let bytes = self.converter.serialize(self.element_kind(), &element)?;
        Ok(self.finish(bytes.into(), element, None))
    }

    fn plain_from_bytes(self, bytes: Bytes) -> Result<Payload, PayloadError> {
        let element = self.converter.deserialize(self.element_kind(), &bytes)?;
        self.check(self.element_kind(), &element)?;
        Ok(self.finish(bytes, element, None))
    }

    fn wrapped_from_bytes(self, bytes: Bytes) -> Result<Payload, PayloadError> {
        let shape = self
            .converter
            .custom()
            .and_then(|resolver| resolver.wire_shape(self.content_type, &bytes));

        let decoded = match shape {
            Some(WireShape::Parent) => self.converter.deserialize(self.wrapping_kind(), &bytes)?,
            Some(WireShape::Child) => self.converter.deserialize(self.element_kind(), &bytes)?,
            None => match self.converter.try_deserialize(self.wrapping_kind(), &bytes) {
                Ok(parent) => parent,
                Err(err) => {
                    debug!(
                        content_type = %self.content_type,
                        error = %err,
                        "Bytes are not the wrapping kind, decoding as element kind"
                    );
                    self.converter.deserialize(self.element_kind(), &bytes)?
                }
            },
        };
        self.wrapped(decoded, Some(bytes))
    }

    /// Resolves a parent or child element. `wire` holds the bytes it was
    /// decoded from, which are kept as given.
    fn wrapped(self, element: Element, wire: Option<Bytes>) -> Result<Payload, PayloadError> {
        let actual = element.kind();
        if actual == self.wrapping_kind() {
            self.resolve_parent(element, wire)
        } else if actual == self.element_kind() {
            self.resolve_child(element, wire)
        } else {
            Err(PayloadError::UnsupportedElement {
                actual,
                element: self.element_kind(),
                wrapping: self.wrapping_kind(),
            })
        }
    }

    fn resolve_parent(self, parent: Element, wire: Option<Bytes>) -> Result<Payload, PayloadError> {
        let parent_bytes = match wire {
            Some(bytes) => bytes,
            None => self.converter.serialize(self.wrapping_kind(), &parent)?.into(),
        };
        let element = self.converter.extract(self.wrapping_kind(), &parent)?;
        self.check(self.element_kind(), &element)?;
        let bytes = self.converter.serialize(self.element_kind(), &element)?;
        Ok(self.finish(
            bytes.into(),
            element,
            Some(Wrapped {
                parent,
                parent_bytes,
            }),
        ))
    }

    fn resolve_child(self, element: Element, wire: Option<Bytes>) -> Result<Payload, PayloadError> {
        let parent = self.converter.wrap(self.wrapping_kind(), &element)?;
        self.check(self.wrapping_kind(), &parent)?;
        let parent_bytes = self.converter.serialize(self.wrapping_kind(), &parent)?;
        let bytes = match wire {
            Some(bytes) => bytes,
            None => self.converter.serialize(self.element_kind(), &element)?.into(),
        };
        Ok(self.finish(
            bytes,
            element,
            Some(Wrapped {
                parent,
                parent_bytes: parent_bytes.into(),
            }),
        ))
    }

    fn finish(self, bytes: Bytes, element: Element, wrapped: Option<Wrapped>) -> Payload {
        Payload {
            content_type: self.content_type.clone(),
            bytes,
            element,
            wrapped,
        }
    }
}
