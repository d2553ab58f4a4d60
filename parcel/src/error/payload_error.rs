//! Payload construction errors.

use thiserror::Error;

use super::ResolverError;
use crate::element::ElementKind;

/// Errors constructing a [`Payload`](crate::Payload).
///
/// All of these are raised while the payload is built; a constructed payload
/// is always consistent.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The element's kind is not the one declared by the content type.
    #[error("Element kind '{actual}' does not match content type kind '{expected}'")]
    TypeMismatch {
        /// Kind declared by the content type.
        expected: ElementKind,
        /// Kind of the given or decoded element.
        actual: ElementKind,
    },

    /// A wrapping content type was given an element that is neither its
    /// element kind nor its wrapping kind.
    #[error(
        "Element kind '{actual}' is neither the element kind '{element}' nor the wrapping kind '{wrapping}'"
    )]
    UnsupportedElement {
        /// Kind of the given or decoded element.
        actual: ElementKind,
        /// Element kind of the content type.
        element: ElementKind,
        /// Wrapping kind of the content type.
        wrapping: ElementKind,
    },

    /// Converting between bytes and elements failed.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

impl PayloadError {
    /// Returns `true` for element kind violations (as opposed to conversion
    /// failures).
    pub fn is_kind_violation(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::UnsupportedElement { .. }
        )
    }
}
