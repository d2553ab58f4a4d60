//! `serde` JSON bindings for caller-defined element types.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ContentResolver, DefaultResolver, Operation};
use crate::element::{CustomValue, Element, ElementKind};
use crate::error::ResolverError;

type Encoder = Box<dyn Fn(&Element) -> Result<Vec<u8>, ResolverError> + Send + Sync>;
type Decoder = Box<dyn Fn(&[u8]) -> Result<Element, ResolverError> + Send + Sync>;
type Transform = Box<dyn Fn(&Element) -> Result<Element, ResolverError> + Send + Sync>;

struct Codec {
    encode: Encoder,
    decode: Decoder,
}

struct Wrapper {
    child: ElementKind,
    wrap: Transform,
    extract: Transform,
}

/// A resolver that encodes caller types as JSON through `serde`.
///
/// Built-in kinds are delegated to [`DefaultResolver`], so one `JsonResolver`
/// can serve every content type of a client.
///
/// ```rust
/// use parcel::{ContentResolver, Element, ElementKind, JsonResolver};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Product { name: String }
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct ProductContainer { product: Product }
///
/// let resolver = JsonResolver::new()
///     .with_type::<Product>()
///     .with_type::<ProductContainer>()
///     .with_wrapper::<ProductContainer, Product>(
///         |product| ProductContainer { product: Product { name: product.name.clone() } },
///         |container| Product { name: container.product.name.clone() },
///     );
///
/// let element = resolver
///     .deserialize(ElementKind::custom::<Product>(), br#"{"name":"Bananas"}"#)
///     .unwrap();
/// assert_eq!(element.downcast_ref::<Product>().unwrap().name, "Bananas");
/// ```
#[derive(Default)]
pub struct JsonResolver {
    codecs: HashMap<ElementKind, Codec>,
    wrappers: HashMap<ElementKind, Wrapper>,
}

impl JsonResolver {
    /// Creates a resolver with no custom bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `T` to JSON. Replaces an earlier binding for the same type.
    pub fn with_type<T>(mut self) -> Self
    where
        T: CustomValue + Serialize + DeserializeOwned,
    {
        let kind = ElementKind::custom::<T>();
        let encode: Encoder = Box::new(move |element| {
            let value = element
                .downcast_ref::<T>()
                .ok_or_else(|| ResolverError::not_supported(element.kind(), Operation::Serialize))?;
            Ok(serde_json::to_vec(value)?)
        });
        let decode: Decoder = Box::new(|bytes| {
            let value: T = serde_json::from_slice(bytes)?;
            Ok(Element::custom(value))
        });
        self.codecs.insert(kind, Codec { encode, decode });
        self
    }

    /// Registers how parent `P` wraps child `C`.
    pub fn with_wrapper<P, C>(
        mut self,
        wrap: impl Fn(&C) -> P + Send + Sync + 'static,
        extract: impl Fn(&P) -> C + Send + Sync + 'static,
    ) -> Self
    where
        P: CustomValue,
        C: CustomValue,
    {
        let parent_kind = ElementKind::custom::<P>();
        let child_kind = ElementKind::custom::<C>();
        let wrap_child: Transform = Box::new(move |child| {
            let child = child
                .downcast_ref::<C>()
                .ok_or_else(|| mismatch(child_kind, child.kind()))?;
            Ok(Element::custom(wrap(child)))
        });
        let extract_child: Transform = Box::new(move |parent| {
            let parent = parent
                .downcast_ref::<P>()
                .ok_or_else(|| mismatch(parent_kind, parent.kind()))?;
            Ok(Element::custom(extract(parent)))
        });
        self.wrappers.insert(
            parent_kind,
            Wrapper {
                child: child_kind,
                wrap: wrap_child,
                extract: extract_child,
            },
        );
        self
    }
}

fn mismatch(expected: ElementKind, actual: ElementKind) -> ResolverError {
    ResolverError::custom(format!("expected element of kind '{expected}', got '{actual}'"))
}

impl ContentResolver for JsonResolver {
    fn serialize(&self, kind: ElementKind, element: &Element) -> Result<Vec<u8>, ResolverError> {
        if element.kind().is_builtin() {
            return DefaultResolver.serialize(kind, element);
        }
        match self.codecs.get(&element.kind()) {
            Some(codec) => (codec.encode)(element),
            None => Err(ResolverError::not_supported(element.kind(), Operation::Serialize)),
        }
    }

    fn deserialize(&self, kind: ElementKind, bytes: &[u8]) -> Result<Element, ResolverError> {
        if kind.is_builtin() {
            return DefaultResolver.deserialize(kind, bytes);
        }
        match self.codecs.get(&kind) {
            Some(codec) => (codec.decode)(bytes),
            None => Err(ResolverError::not_supported(kind, Operation::Deserialize)),
        }
    }

    fn wrap(&self, parent_kind: ElementKind, child: &Element) -> Result<Element, ResolverError> {
        match self.wrappers.get(&parent_kind) {
            Some(wrapper) => (wrapper.wrap)(child),
            None => Err(ResolverError::not_supported(parent_kind, Operation::Wrap)),
        }
    }

    fn extract(&self, parent_kind: ElementKind, parent: &Element) -> Result<Element, ResolverError> {
        match self.wrappers.get(&parent_kind) {
            Some(wrapper) => (wrapper.extract)(parent),
            None => Err(ResolverError::not_supported(parent_kind, Operation::Extract)),
        }
    }
}

impl fmt::Debug for JsonResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self.codecs.keys().map(ToString::to_string).collect();
        types.sort();
        let mut wrappers: Vec<String> = self
            .wrappers
            .iter()
            .map(|(parent, wrapper)| format!("{parent}({})", wrapper.child))
            .collect();
        wrappers.sort();
        f.debug_struct("JsonResolver")
            .field("types", &types)
            .field("wrappers", &wrappers)
            .finish()
    }
}
