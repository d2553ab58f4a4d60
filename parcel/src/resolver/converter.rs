//! Custom-then-default resolver dispatch.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::{ContentResolver, DefaultResolver, Operation};
use crate::content::FallbackPolicy;
use crate::element::{Element, ElementKind};
use crate::error::ResolverError;

/// The resolver chain used for one payload construction.
///
/// A converter consults its custom resolver first (if any) and the
/// [`DefaultResolver`] second. What happens when the custom resolver fails
/// is decided by the [`FallbackPolicy`]: with
/// [`FallbackToDefault`](FallbackPolicy::FallbackToDefault) the failure is
/// logged at `warn` and the default resolver is tried, with
/// [`Propagate`](FallbackPolicy::Propagate) the error is returned unchanged.
#[derive(Debug, Clone)]
pub struct Converter {
    custom: Option<Arc<dyn ContentResolver>>,
    policy: FallbackPolicy,
}

impl Converter {
    /// Creates a converter from an optional custom resolver and a policy.
    pub fn new(custom: Option<Arc<dyn ContentResolver>>, policy: FallbackPolicy) -> Self {
        Self { custom, policy }
    }

    /// The custom resolver consulted before the default one.
    pub fn custom(&self) -> Option<&Arc<dyn ContentResolver>> {
        self.custom.as_ref()
    }

    /// The policy applied when the custom resolver fails.
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Serializes `element` as `kind`.
    pub fn serialize(&self, kind: ElementKind, element: &Element) -> Result<Vec<u8>, ResolverError> {
        self.dispatch(kind, Operation::Serialize, |resolver| {
            resolver.serialize(kind, element)
        })
    }

    /// Deserializes `bytes` as `kind`.
    pub fn deserialize(&self, kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError> {
        self.dispatch(kind, Operation::Deserialize, |resolver| {
            resolver.deserialize(kind, bytes)
        })
    }

    /// Deserializes `bytes` as `kind` where failure is an expected outcome.
    ///
    /// Follows the same policy as [`deserialize`](Self::deserialize) but
    /// logs a custom resolver failure at `debug` only. When the default
    /// resolver does not support `kind` either, the custom resolver's error
    /// is returned instead of `NotSupported`.
    pub fn try_deserialize(&self, kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError> {
        let Some(custom) = &self.custom else {
            return DefaultResolver.deserialize(kind, bytes);
        };
        let err = match custom.deserialize(kind, bytes) {
            Ok(element) => return Ok(element),
            Err(err) => err,
        };
        if self.policy == FallbackPolicy::Propagate {
            return Err(err);
        }
        debug!(%kind, error = %err, "Custom resolver could not decode, trying default resolver");
        DefaultResolver
            .deserialize(kind, bytes)
            .map_err(|default_err| if default_err.is_not_supported() { err } else { default_err })
    }

    /// Wraps `child` into a parent of `parent_kind`.
    pub fn wrap(&self, parent_kind: ElementKind, child: &Element) -> Result<Element, ResolverError> {
        self.dispatch(parent_kind, Operation::Wrap, |resolver| {
            resolver.wrap(parent_kind, child)
        })
    }

    /// Extracts the child from a parent of `parent_kind`.
    pub fn extract(&self, parent_kind: ElementKind, parent: &Element) -> Result<Element, ResolverError> {
        self.dispatch(parent_kind, Operation::Extract, |resolver| {
            resolver.extract(parent_kind, parent)
        })
    }

    fn dispatch<T>(
        &self,
        kind: ElementKind,
        operation: Operation,
        call: impl Fn(&dyn ContentResolver) -> Result<T, ResolverError>,
    ) -> Result<T, ResolverError> {
        if let Some(custom) = &self.custom {
            trace!(%kind, %operation, resolver = ?custom, "Using custom resolver");
            match call(custom.as_ref()) {
                Ok(value) => return Ok(value),
                Err(err) => match self.policy {
                    FallbackPolicy::Propagate => return Err(err),
                    FallbackPolicy::FallbackToDefault => {
                        warn!(
                            %kind,
                            %operation,
                            error = %err,
                            "Custom resolver failed, falling back to default resolver"
                        );
                    }
                },
            }
        }
        trace!(%kind, %operation, "Using default resolver");
        call(&DefaultResolver)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(None, FallbackPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[derive(Debug)]
    struct Failing;

    impl ContentResolver for Failing {
        fn serialize(&self, _kind: ElementKind, _element: &Element) -> Result<Vec<u8>, ResolverError> {
            Err(ResolverError::custom("boom"))
        }

        fn deserialize(&self, _kind: ElementKind, _bytes: &[u8]) -> Result<Element, ResolverError> {
            Err(ResolverError::custom("boom"))
        }
    }

    #[derive(Debug)]
    struct Upper;

    impl ContentResolver for Upper {
        fn serialize(&self, _kind: ElementKind, element: &Element) -> Result<Vec<u8>, ResolverError> {
            Ok(element.as_text().unwrap_or_default().to_uppercase().into_bytes())
        }

        fn deserialize(&self, _kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError> {
            Ok(Element::from(String::from_utf8_lossy(bytes).to_uppercase()))
        }
    }

    #[test]
    fn test_default_only() {
        let converter = Converter::default();
        let bytes = converter
            .serialize(ElementKind::Text, &Element::from("hello"))
            .unwrap();
        assert_eq!(bytes, b"hello");
        assert!(converter.custom().is_none());
        assert_eq!(converter.policy(), FallbackPolicy::FallbackToDefault);
    }

    #[test]
    fn test_custom_resolver_wins() {
        let converter = Converter::new(Some(Arc::new(Upper)), FallbackPolicy::Propagate);
        let element = converter.deserialize(ElementKind::Text, b"hello").unwrap();
        assert_eq!(element.as_text(), Some("HELLO"));
    }

    #[traced_test]
    #[test]
    fn test_fallback_to_default_logs_warning() {
        let converter = Converter::new(Some(Arc::new(Failing)), FallbackPolicy::FallbackToDefault);
        let element = converter.deserialize(ElementKind::Text, b"hello").unwrap();
        assert_eq!(element.as_text(), Some("hello"));
        assert!(logs_contain("Custom resolver failed"));
    }

    #[traced_test]
    #[test]
    fn test_try_deserialize_keeps_custom_error_quietly() {
        let converter = Converter::new(Some(Arc::new(Failing)), FallbackPolicy::FallbackToDefault);
        let err = converter
            .try_deserialize(ElementKind::custom::<u8>(), b"1")
            .unwrap_err();
        assert_eq!(err.to_string(), "Resolver failed: boom");
        assert!(!logs_contain("falling back to default resolver"));

        let element = converter.try_deserialize(ElementKind::Text, b"hello").unwrap();
        assert_eq!(element.as_text(), Some("hello"));
    }

    #[test]
    fn test_propagate_returns_custom_error() {
        let converter = Converter::new(Some(Arc::new(Failing)), FallbackPolicy::Propagate);
        let err = converter
            .serialize(ElementKind::Text, &Element::from("hello"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Resolver failed: boom");
    }

    #[test]
    fn test_default_failure_is_not_absorbed() {
        let converter = Converter::new(Some(Arc::new(Failing)), FallbackPolicy::FallbackToDefault);
        let err = converter.deserialize(ElementKind::Json, b"{oops").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_wrap_without_resolver_not_supported() {
        let converter = Converter::default();
        let err = converter
            .wrap(ElementKind::Json, &Element::from("x"))
            .unwrap_err();
        assert!(err.is_not_supported());
    }
}
