//! Content-type driven HTTP payloads.
//!
//! The `parcel` crate binds media types to element kinds and conversion
//! strategies, and keeps the bytes and the decoded value of every request or
//! response body consistent.
//!
//! ## Features
//!
//! - **Content types**: media types bound to an element kind, an optional
//!   wrapping kind and an optional custom resolver
//! - **Registry**: case-insensitive, parameter-agnostic lookup table
//! - **Payloads**: bytes and element views built from either side, including
//!   parent/child wrapping (`Product` sent inside a `ProductContainer`)
//! - **Negotiation**: response media types matched against the caller's
//!   accept types first and a basic registry second
//! - **Blocking client**: request builder on top of a pluggable [`Transport`]
//! - **Layered error handling**: one error type per stage, aggregated by
//!   [`ParcelError`]
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parcel::{ContentType, ElementKind, JsonResolver, Payload};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Product { name: String }
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct ProductContainer { product: Product }
//!
//! let resolver = JsonResolver::new()
//!     .with_type::<Product>()
//!     .with_type::<ProductContainer>()
//!     .with_wrapper::<ProductContainer, Product>(
//!         |product| ProductContainer { product: product.clone() },
//!         |container| container.product.clone(),
//!     );
//! let products = ContentType::builder("application/json", ElementKind::custom::<Product>())
//!     .wrapping(ElementKind::custom::<ProductContainer>())
//!     .resolver(Arc::new(resolver))
//!     .build();
//!
//! let payload = Payload::from_bytes(&products, r#"{"product":{"name":"Bananas"}}"#)?;
//! assert_eq!(payload.element_as::<Product>().unwrap().name, "Bananas");
//! assert_eq!(payload.bytes().as_ref(), br#"{"name":"Bananas"}"#);
//! # Ok::<(), parcel::ParcelError>(())
//! ```

pub mod client;
pub mod content;
pub mod element;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod negotiation;
pub mod payload;
pub mod resolver;

// Re-exports for convenience
pub use client::{
    HeaderMultimap, HttpClient, HttpClientBuilder, RawResponse, Request, ReqwestTransport,
    Response, Transport, TransportConfig, TransportRequest,
};
pub use content::{
    basic, media_type, ContentType, ContentTypeBuilder, ContentTypeRegistry, FallbackPolicy,
};
pub use element::{
    AccessToken, CustomElement, CustomKind, CustomValue, Element, ElementKind, Form,
    OAuthErrorResponse, OAuthTokenResponse,
};
pub use error::{
    ClientError, ConfigError, NegotiationError, ParcelError, PayloadError, RegistryError,
    ResolverError, TransportError,
};
pub use method::HttpMethod;
pub use negotiation::Negotiator;
pub use payload::Payload;
pub use resolver::{
    ContentResolver, Converter, DefaultResolver, JsonResolver, Operation, WireShape,
};
