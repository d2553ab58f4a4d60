//! Type-erased caller-defined elements.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::kind::CustomKind;

/// Bound for values that can travel as [`Element::Custom`](super::Element::Custom).
///
/// Blanket-implemented for every `'static` type that is `Debug + PartialEq +
/// Send + Sync`.
pub trait CustomValue: Any + fmt::Debug + PartialEq + Send + Sync {}

impl<T: Any + fmt::Debug + PartialEq + Send + Sync> CustomValue for T {}

trait ErasedValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_erased(&self, other: &dyn Any) -> bool;
}

impl<T: CustomValue> ErasedValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// A caller-defined value together with its kind tag.
///
/// Cloning is cheap; the value itself is shared.
#[derive(Clone)]
pub struct CustomElement {
    kind: CustomKind,
    value: Arc<dyn ErasedValue>,
}

impl CustomElement {
    /// Wraps `value`, tagging it with the kind of `T`.
    pub fn new<T: CustomValue>(value: T) -> Self {
        Self {
            kind: CustomKind::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// The kind tag of the wrapped value.
    pub fn kind(&self) -> CustomKind {
        self.kind
    }

    /// Borrows the value as `T` if it is one.
    pub fn downcast_ref<T: CustomValue>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.value, f)
    }
}

impl PartialEq for CustomElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value.eq_erased(other.value.as_any())
    }
}
