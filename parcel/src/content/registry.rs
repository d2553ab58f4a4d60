//! Media type → content type lookup table.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::media_type::normalize;
use super::{basic, ContentType};
use crate::error::RegistryError;

/// A table of content types keyed by normalized media type.
///
/// The registry only grows. Lookups normalize their input the same way keys
/// are normalized, so `"Text/Plain; charset=UTF-8"` finds `text/plain`.
///
/// ```rust
/// use parcel::{ContentType, ContentTypeRegistry, ElementKind};
///
/// let registry = ContentTypeRegistry::basic();
/// registry
///     .register(ContentType::new("text/csv", ElementKind::Text))
///     .unwrap();
///
/// let csv = registry.find("text/csv; header=present").unwrap();
/// assert_eq!(csv.element_kind(), ElementKind::Text);
/// ```
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
    mapping: RwLock<BTreeMap<String, ContentType>>,
}

impl ContentTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in content types.
    pub fn basic() -> Self {
        let mapping = basic::registered()
            .into_iter()
            .map(|ct| (ct.normalized_media_type(), ct))
            .collect();
        Self {
            mapping: RwLock::new(mapping),
        }
    }

    /// Registers `content_type` under its normalized media type.
    ///
    /// ## Errors
    ///
    /// Returns [`RegistryError::DuplicateRegistration`] if the key is taken;
    /// the existing entry is kept.
    pub fn register(&self, content_type: ContentType) -> Result<(), RegistryError> {
        let key = content_type.normalized_media_type();
        let mut mapping = self.write();
        if mapping.contains_key(&key) {
            return Err(RegistryError::DuplicateRegistration { media_type: key });
        }
        debug!(media_type = %key, content_type = %content_type, "Registered content type");
        mapping.insert(key, content_type);
        Ok(())
    }

    /// Looks up the content type for a raw media type.
    ///
    /// ## Errors
    ///
    /// Returns [`RegistryError::NotFound`] if nothing is registered under the
    /// normalized media type.
    pub fn find(&self, raw_media_type: &str) -> Result<ContentType, RegistryError> {
        let key = normalize(raw_media_type);
        self.read()
            .get(&key)
            .cloned()
            .ok_or(RegistryError::NotFound { media_type: key })
    }

    /// Finds the first entry whose media type starts with `normalized`.
    ///
    /// An exact key match wins; otherwise entries are tried in key order.
    pub fn find_by_prefix(&self, normalized: &str) -> Option<ContentType> {
        let mapping = self.read();
        if let Some(exact) = mapping.get(normalized) {
            return Some(exact.clone());
        }
        mapping
            .iter()
            .find(|(key, _)| key.starts_with(normalized))
            .map(|(_, ct)| ct.clone())
    }

    /// Number of registered content types.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of the registered content types in key order.
    pub fn content_types(&self) -> Vec<ContentType> {
        self.read().values().cloned().collect()
    }

    // Entries are only ever inserted whole, so a poisoned table is still
    // consistent.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, ContentType>> {
        self.mapping.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, ContentType>> {
        self.mapping.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::media_type;
    use crate::element::ElementKind;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_find_normalizes() {
        let registry = ContentTypeRegistry::basic();
        let with_params = registry.find("text/plain; charset=utf-8").unwrap();
        let bare = registry.find("text/plain").unwrap();
        assert_eq!(with_params, bare);
        assert_eq!(registry.find("  TEXT/PLAIN ").unwrap(), bare);
    }

    #[test]
    fn test_find_missing() {
        let registry = ContentTypeRegistry::new();
        assert!(registry.is_empty());
        let err = registry.find("Application/Unknown-XYZ").unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                media_type: "application/unknown-xyz".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let registry = ContentTypeRegistry::new();
        let first = ContentType::new("text/csv", ElementKind::Text);
        registry.register(first.clone()).unwrap();

        let err = registry
            .register(ContentType::new("TEXT/CSV; charset=utf-8", ElementKind::Bytes))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRegistration { ref media_type } if media_type == "text/csv"));
        assert_eq!(registry.find("text/csv").unwrap(), first);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_basic_contents() {
        let registry = ContentTypeRegistry::basic();
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.find(media_type::APPLICATION_JSON).unwrap().element_kind(),
            ElementKind::Text
        );
        assert!(registry.find(media_type::EMPTY_BODY).is_err());
    }

    #[test]
    fn test_find_by_prefix() {
        let registry = ContentTypeRegistry::new();
        registry
            .register(ContentType::new("application/vnd.shop+json", ElementKind::Json))
            .unwrap();
        registry
            .register(ContentType::new("application/vnd.shop", ElementKind::Text))
            .unwrap();

        let exact = registry.find_by_prefix("application/vnd.shop").unwrap();
        assert_eq!(exact.element_kind(), ElementKind::Text);

        let prefix = registry.find_by_prefix("application/vnd.shop+").unwrap();
        assert_eq!(prefix.element_kind(), ElementKind::Json);

        assert!(registry.find_by_prefix("text/").is_none());
    }

    #[test]
    fn test_concurrent_register_and_find() {
        let registry = Arc::new(ContentTypeRegistry::basic());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let media_type = format!("application/vnd.test-{i}");
                    registry
                        .register(ContentType::new(media_type.clone(), ElementKind::Bytes))
                        .unwrap();
                    registry.find(&media_type).unwrap();
                    registry.find("text/plain").unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 15);
        assert_eq!(registry.content_types().len(), 15);
    }
}
