//! Bytes ⇄ element conversion strategies.
//!
//! A [`ContentResolver`] serializes and deserializes elements of the kinds it
//! understands and, for wrapping content types, converts between a child
//! element and its parent container. [`DefaultResolver`] covers the built-in
//! kinds; [`JsonResolver`] binds caller `serde` types. A content type may carry
//! its own resolver, which is consulted before the default one according to
//! its [`FallbackPolicy`](crate::FallbackPolicy).
//!
//! ## Examples
//!
//! ```rust
//! use parcel::{ContentResolver, Element, ElementKind, Operation, ResolverError};
//!
//! #[derive(Debug)]
//! struct Shouting;
//!
//! impl ContentResolver for Shouting {
//!     fn serialize(&self, kind: ElementKind, element: &Element) -> Result<Vec<u8>, ResolverError> {
//!         match element.as_text() {
//!             Some(text) => Ok(text.to_uppercase().into_bytes()),
//!             None => Err(ResolverError::not_supported(kind, Operation::Serialize)),
//!         }
//!     }
//!
//!     fn deserialize(&self, kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError> {
//!         match kind {
//!             ElementKind::Text => Ok(Element::from(String::from_utf8_lossy(bytes).to_lowercase())),
//!             other => Err(ResolverError::not_supported(other, Operation::Deserialize)),
//!         }
//!     }
//! }
//! ```

mod converter;
mod default;
mod json;

use std::fmt;

use strum::Display;

use crate::content::ContentType;
use crate::element::{Element, ElementKind};
use crate::error::ResolverError;

pub use converter::Converter;
pub use default::DefaultResolver;
pub use json::JsonResolver;

/// The conversion a resolver is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Serialize,
    Deserialize,
    Wrap,
    Extract,
}

/// Which representation a byte sequence is in, for wrapping content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    /// The bytes encode the wrapping (parent) kind.
    Parent,
    /// The bytes encode the element (child) kind.
    Child,
}

/// Pluggable conversion strategy for a content type.
///
/// Implementations must return [`ResolverError::NotSupported`] for kinds they
/// do not handle rather than guessing.
pub trait ContentResolver: fmt::Debug + Send + Sync {
    /// Serializes `element`, declared as `kind`, into bytes.
    fn serialize(&self, kind: ElementKind, element: &Element) -> Result<Vec<u8>, ResolverError>;

    /// Deserializes `bytes` into an element of `kind`.
    fn deserialize(&self, kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError>;

    /// Wraps a child element into a parent of `parent_kind`.
    fn wrap(&self, parent_kind: ElementKind, _child: &Element) -> Result<Element, ResolverError> {
        Err(ResolverError::not_supported(parent_kind, Operation::Wrap))
    }

    /// Extracts the child element from a parent of `parent_kind`.
    fn extract(&self, parent_kind: ElementKind, _parent: &Element) -> Result<Element, ResolverError> {
        Err(ResolverError::not_supported(parent_kind, Operation::Extract))
    }

    /// Declares whether `bytes` are parent- or child-shaped for a wrapping
    /// content type.
    ///
    /// `None` means the resolver cannot tell; payload construction then tries
    /// the parent kind first and falls back to the element kind.
    fn wire_shape(&self, _content_type: &ContentType, _bytes: &[u8]) -> Option<WireShape> {
        None
    }
}
