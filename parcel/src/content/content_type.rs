//! The content type descriptor.

use std::fmt;
use std::sync::Arc;

use super::media_type::normalize;
use crate::element::ElementKind;
use crate::resolver::{ContentResolver, Converter};

/// What happens when a content type's custom resolver fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Log the failure at `warn` and retry with the default resolver.
    #[default]
    FallbackToDefault,
    /// Return the custom resolver's error unchanged.
    Propagate,
}

#[derive(Debug)]
struct Inner {
    media_type: String,
    element_kind: ElementKind,
    wrapping_kind: Option<ElementKind>,
    resolver: Option<Arc<dyn ContentResolver>>,
    fallback: FallbackPolicy,
}

/// A media type bound to an element kind and a conversion strategy.
///
/// Content types are immutable and cheap to clone; clones share one record.
///
/// ```rust
/// use parcel::{ContentType, ElementKind};
///
/// let csv = ContentType::new("text/csv", ElementKind::Text);
/// assert_eq!(csv.media_type(), "text/csv");
/// assert!(!csv.is_wrapping());
/// ```
#[derive(Debug, Clone)]
pub struct ContentType {
    inner: Arc<Inner>,
}

impl ContentType {
    /// Creates a content type converted by the default resolver.
    pub fn new(media_type: impl Into<String>, element_kind: ElementKind) -> Self {
        Self::builder(media_type, element_kind).build()
    }

    /// Starts building a content type with a wrapping kind or custom resolver.
    pub fn builder(media_type: impl Into<String>, element_kind: ElementKind) -> ContentTypeBuilder {
        ContentTypeBuilder {
            media_type: media_type.into(),
            element_kind,
            wrapping_kind: None,
            resolver: None,
            fallback: FallbackPolicy::default(),
        }
    }

    /// The media type as declared.
    pub fn media_type(&self) -> &str {
        &self.inner.media_type
    }

    /// The media type as used for registry keys and matching.
    pub fn normalized_media_type(&self) -> String {
        normalize(&self.inner.media_type)
    }

    /// The logical kind of decoded elements.
    pub fn element_kind(&self) -> ElementKind {
        self.inner.element_kind
    }

    /// The wire-level container kind, if configured.
    pub fn wrapping_kind(&self) -> Option<ElementKind> {
        self.inner.wrapping_kind
    }

    /// Returns `true` when a wrapping kind is set and differs from the
    /// element kind.
    pub fn is_wrapping(&self) -> bool {
        self.inner
            .wrapping_kind
            .is_some_and(|kind| kind != self.inner.element_kind)
    }

    /// The custom resolver bound to this content type.
    pub fn resolver(&self) -> Option<&Arc<dyn ContentResolver>> {
        self.inner.resolver.as_ref()
    }

    /// Policy applied when the custom resolver fails.
    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.inner.fallback
    }

    /// Converter using this content type's own resolver.
    pub fn converter(&self) -> Converter {
        self.converter_with(None)
    }

    /// Converter using `resolver` in place of this content type's own
    /// resolver, when given.
    pub fn converter_with(&self, resolver: Option<&Arc<dyn ContentResolver>>) -> Converter {
        let custom = resolver.or(self.inner.resolver.as_ref()).cloned();
        Converter::new(custom, self.inner.fallback)
    }
}

impl PartialEq for ContentType {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        let same_resolver = match (&self.inner.resolver, &other.inner.resolver) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_resolver
            && self.inner.media_type == other.inner.media_type
            && self.inner.element_kind == other.inner.element_kind
            && self.inner.wrapping_kind == other.inner.wrapping_kind
            && self.inner.fallback == other.inner.fallback
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.inner.media_type, self.inner.element_kind)?;
        if let Some(wrapping) = self.inner.wrapping_kind.filter(|_| self.is_wrapping()) {
            write!(f, " (wrapped in {wrapping})")?;
        }
        Ok(())
    }
}

/// Builder for [`ContentType`].
#[derive(Debug)]
pub struct ContentTypeBuilder {
    media_type: String,
    element_kind: ElementKind,
    wrapping_kind: Option<ElementKind>,
    resolver: Option<Arc<dyn ContentResolver>>,
    fallback: FallbackPolicy,
}

impl ContentTypeBuilder {
    /// Declares the container kind the bytes are shaped as on the wire.
    pub fn wrapping(mut self, kind: ElementKind) -> Self {
        self.wrapping_kind = Some(kind);
        self
    }

    /// Binds a custom resolver, consulted before the default one.
    pub fn resolver(mut self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the policy applied when the custom resolver fails.
    pub fn fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    /// Builds the content type.
    pub fn build(self) -> ContentType {
        ContentType {
            inner: Arc::new(Inner {
                media_type: self.media_type,
                element_kind: self.element_kind,
                wrapping_kind: self.wrapping_kind,
                resolver: self.resolver,
                fallback: self.fallback,
            }),
        }
    }
}
