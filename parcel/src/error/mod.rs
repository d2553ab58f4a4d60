//! Layered error types for the crate.
//!
//! The error hierarchy follows the stages a payload goes through:
//! - [`ParcelError`] - Top-level error type aggregating everything below
//! - [`RegistryError`] - Content type registration and lookup
//! - [`ResolverError`] - Serialization, deserialization, wrapping, extraction
//! - [`PayloadError`] - Payload construction and element kind checks
//! - [`NegotiationError`] - Picking a content type for a response
//! - [`ConfigError`] - Client builder configuration
//! - [`ClientError`] - Request execution
//! - [`TransportError`] - Failures reported by the underlying transport

mod client_error;
mod config_error;
mod negotiation_error;
mod parcel_error;
mod payload_error;
mod registry_error;
mod resolver_error;
mod transport_error;

pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use negotiation_error::NegotiationError;
pub use parcel_error::ParcelError;
pub use payload_error::PayloadError;
pub use registry_error::RegistryError;
pub use resolver_error::ResolverError;
pub use transport_error::TransportError;
