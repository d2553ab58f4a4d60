//! Element kind tags.

use std::any::{Any, TypeId};
use std::fmt;

/// Runtime tag for a caller-defined element type.
///
/// Two tags are equal only when they were created for the same Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomKind {
    id: TypeId,
    name: &'static str,
}

impl CustomKind {
    /// Returns the tag for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name of the tagged type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

/// The logical kind of a decoded element.
///
/// Built-in kinds are handled by the default resolver; `Custom` kinds need a
/// caller-supplied [`ContentResolver`](crate::resolver::ContentResolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Raw bytes, passed through unchanged.
    Bytes,
    /// UTF-8 text.
    Text,
    /// URL-encoded form.
    Form,
    /// Generic JSON tree.
    Json,
    /// OAuth 2.0 token response record.
    OAuthToken,
    /// OAuth 2.0 error response record.
    OAuthError,
    /// Caller-defined type.
    Custom(CustomKind),
}

impl ElementKind {
    /// Returns the custom kind tag for `T`.
    pub fn custom<T: Any>() -> Self {
        Self::Custom(CustomKind::of::<T>())
    }

    /// Returns `true` for kinds the default resolver understands.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Text => f.write_str("text"),
            Self::Form => f.write_str("form"),
            Self::Json => f.write_str("json"),
            Self::OAuthToken => f.write_str("oauth-token"),
            Self::OAuthError => f.write_str("oauth-error"),
            Self::Custom(kind) => f.write_str(kind.short_name()),
        }
    }
}
