//! The byte-level HTTP transport.
//!
//! A [`Transport`] sends one request and reports status, headers and body
//! bytes. It knows nothing about content types; decoding happens in the
//! client. [`ReqwestTransport`] is the default implementation.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::trace;
use url::Url;

use super::request::HeaderMultimap;
use crate::error::TransportError;
use crate::method::HttpMethod;

/// What a transport puts on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderMultimap,
    /// `None` when the request has no body.
    pub body: Option<Bytes>,
}

/// What a transport got back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawResponse {
    pub status_code: u16,
    pub status_message: Option<String>,
    /// Header names are lowercase.
    pub headers: HeaderMultimap,
    /// The `content-type` header as received, if any.
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Sends requests synchronously.
///
/// Implementations report network-level failures only; an HTTP error status
/// is a successful [`RawResponse`].
pub trait Transport: fmt::Debug + Send + Sync {
    fn send(&self, request: &TransportRequest) -> Result<RawResponse, TransportError>;
}

/// Settings fixed when a [`ReqwestTransport`] is created.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub proxy: Option<Url>,
    /// When `false`, invalid TLS certificates are accepted.
    pub verify_certificates: bool,
}

/// [`Transport`] backed by `reqwest::blocking`.
///
/// The blocking client must not be created or dropped inside an async
/// runtime; use `spawn_blocking` there.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport with the given settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the proxy or TLS backend cannot be set up.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_certificates);
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }
        Ok(Self {
            client: builder.build()?,
            timeout: config.timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Request(err)
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &TransportRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url.clone());
        for (name, values) in &request.headers {
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(|e| self.map_error(e))?;
        let status = response.status();
        trace!(status = status.as_u16(), "Transport received response");

        let mut headers = HeaderMultimap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let body = response.bytes().map_err(|e| self.map_error(e))?;

        Ok(RawResponse {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().map(str::to_string),
            headers,
            content_type,
            body,
        })
    }
}
