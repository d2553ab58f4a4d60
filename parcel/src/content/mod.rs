//! Content types and their registry.
//!
//! - [`ContentType`] - media type bound to an element kind and resolver
//! - [`ContentTypeRegistry`] - lookup table keyed by normalized media type
//! - [`basic`] - built-in content types
//! - [`media_type`] - media type constants and normalization

pub mod basic;
mod content_type;
pub mod media_type;
mod registry;

pub use content_type::{ContentType, ContentTypeBuilder, FallbackPolicy};
pub use registry::ContentTypeRegistry;
