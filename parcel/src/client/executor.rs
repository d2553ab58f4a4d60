//! Request execution with tracing instrumentation.
//!
//! This module provides the [`HttpClient`] struct, which sends one configured
//! request through a [`Transport`] and negotiates the response body.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderName;
use tracing::{instrument, trace, warn, Span};
use url::Url;

use super::request::{HeaderMultimap, Request};
use super::response::Response;
use super::transport::{RawResponse, ReqwestTransport, Transport, TransportConfig, TransportRequest};
use crate::content::{ContentType, ContentTypeRegistry};
use crate::element::AccessToken;
use crate::endpoint::parse_endpoint;
use crate::error::{ClientError, ConfigError};
use crate::method::HttpMethod;
use crate::negotiation::Negotiator;
use crate::payload::Payload;
use crate::resolver::ContentResolver;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ACCEPT: &str = "accept";
const AUTHORIZATION: &str = "authorization";
const CONTENT_TYPE: &str = "content-type";
const USER_AGENT: &str = "user-agent";

/// Builder for configuring an [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    method: HttpMethod,
    endpoint: Option<String>,
    params: HashMap<String, String>,
    headers: HeaderMultimap,
    body: Payload,
    accept: Vec<ContentType>,
    access_token: Option<AccessToken>,
    resolver: Option<Arc<dyn ContentResolver>>,
    basic_registry: Option<Arc<ContentTypeRegistry>>,
    timeout: Duration,
    proxy: Option<String>,
    verify_certificates: bool,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Creates a builder for a `GET` request with the default headers
    /// `accept-charset: UTF-8` and `accept-language: en-US`.
    pub fn new() -> Self {
        let headers = HeaderMultimap::from([
            ("accept-charset".to_string(), vec!["UTF-8".to_string()]),
            ("accept-language".to_string(), vec!["en-US".to_string()]),
        ]);
        Self {
            method: HttpMethod::default(),
            endpoint: None,
            params: HashMap::new(),
            headers,
            body: Payload::empty(),
            accept: Vec::new(),
            access_token: None,
            resolver: None,
            basic_registry: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy: None,
            verify_certificates: true,
            transport: None,
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the absolute endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self.params.clear();
        self
    }

    /// Sets an endpoint template whose `${name}` and `$name` variables are
    /// replaced from `params`. Unknown variables are left as written.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use parcel::HttpClient;
    ///
    /// let client = HttpClient::builder()
    ///     .endpoint_with_params("https://shop.test/products/${id}", [("id", "42")])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(client.request().endpoint().as_str(), "https://shop.test/products/42");
    /// ```
    pub fn endpoint_with_params<K, V>(
        mut self,
        template: impl Into<String>,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.endpoint = Some(template.into());
        self.params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Sets header `name` (lowercased), replacing earlier values.
    pub fn header<V>(mut self, name: impl AsRef<str>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<String>,
    {
        let name = name.as_ref().to_ascii_lowercase();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if let Some(previous) = self.headers.get(&name) {
            warn!(header = %name, ?previous, new = ?values, "Overwriting request header");
        }
        self.headers.insert(name, values);
        self
    }

    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        self.header(USER_AGENT, [user_agent.into()])
    }

    /// Declares the content types the response may be decoded as, in order
    /// of preference. Their media types replace the `accept` header.
    pub fn accept(mut self, content_types: impl IntoIterator<Item = ContentType>) -> Self {
        self.accept = content_types.into_iter().collect();
        self
    }

    /// Sets the request body and its `content-type` header.
    pub fn body(mut self, payload: Payload) -> Self {
        let media_type = payload.media_type().to_string();
        self.body = payload;
        self.header(CONTENT_TYPE, [media_type])
    }

    /// Authorizes the request with `token`, replacing any `authorization`
    /// header.
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Resolver used for the response body in place of the negotiated
    /// content type's own resolver.
    pub fn resolver(mut self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Registry consulted when no accept type matches the response.
    /// Defaults to [`ContentTypeRegistry::basic`].
    pub fn basic_registry(mut self, registry: Arc<ContentTypeRegistry>) -> Self {
        self.basic_registry = Some(registry);
        self
    }

    /// Sets the request timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Routes the default transport through a proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Whether the default transport verifies TLS certificates. Defaults to
    /// `true`.
    pub fn verify_certificates(mut self, verify: bool) -> Self {
        self.verify_certificates = verify;
        self
    }

    /// Uses `transport` instead of a [`ReqwestTransport`]. Timeout, proxy
    /// and certificate settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`HttpClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the endpoint is missing or not an absolute URL,
    /// a header name is invalid, or the default transport cannot be created.
    pub fn build(self) -> Result<HttpClient, ConfigError> {
        let template = self
            .endpoint
            .as_deref()
            .ok_or_else(|| ConfigError::missing_field("endpoint"))?;
        let endpoint = parse_endpoint(template, &self.params)?;

        if !self.body.is_empty_body() && !self.method.has_body() {
            warn!(http.method = %self.method, "Request body set on a method that usually has none");
        }

        let mut headers = self.headers;
        if let Some(token) = &self.access_token {
            headers.insert(AUTHORIZATION.to_string(), vec![token.authorization_value()]);
        }
        if !self.accept.is_empty() {
            let media_types = self
                .accept
                .iter()
                .map(|ct| ct.media_type().to_string())
                .collect();
            headers.insert(ACCEPT.to_string(), media_types);
        }
        for name in headers.keys() {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ConfigError::invalid_header(name.as_str(), e.to_string()))?;
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let proxy = self.proxy.as_deref().map(Url::parse).transpose()?;
                let config = TransportConfig {
                    timeout: self.timeout,
                    proxy,
                    verify_certificates: self.verify_certificates,
                };
                Arc::new(ReqwestTransport::new(&config)?)
            }
        };

        let request = Request::new(self.method, endpoint, headers, self.body, self.accept);
        trace!(
            http.method = %request.method(),
            http.url = %request.endpoint(),
            headers = ?request.headers(),
            body = %request.body().text(),
            "Prepared request"
        );

        Ok(HttpClient {
            request,
            transport,
            basic: self
                .basic_registry
                .unwrap_or_else(|| Arc::new(ContentTypeRegistry::basic())),
            resolver: self.resolver,
        })
    }
}

/// Blocking HTTP client for one configured request.
///
/// The request is fixed at build time; [`execute`](Self::execute) may be
/// called repeatedly and sends it each time.
///
/// ## Examples
///
/// ```rust,no_run
/// use parcel::{basic, HttpClient, HttpMethod, Payload};
///
/// let client = HttpClient::builder()
///     .method(HttpMethod::Post)
///     .endpoint("https://shop.test/notes")
///     .accept([basic::JSON_ELEMENT.clone()])
///     .body(Payload::from_element(&basic::TEXT_PLAIN, "buy milk")?)
///     .build()?;
///
/// let response = client.execute()?;
/// if response.is_ok() {
///     println!("{}", response.body().text());
/// }
/// # Ok::<(), parcel::ParcelError>(())
/// ```
#[derive(Debug)]
pub struct HttpClient {
    request: Request,
    transport: Arc<dyn Transport>,
    basic: Arc<ContentTypeRegistry>,
    resolver: Option<Arc<dyn ContentResolver>>,
}

impl HttpClient {
    /// Creates a new builder for configuring a client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The request this client sends.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Sends the request and negotiates the response body.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The transport fails ([`ClientError::Execution`], never retried)
    /// - No content type matches the response or its body cannot be decoded
    #[instrument(
        name = "http_request",
        skip(self),
        fields(
            http.method = %self.request.method(),
            http.url = %self.request.endpoint(),
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub fn execute(&self) -> Result<Response, ClientError> {
        let body = self.request.body();
        let transport_request = TransportRequest {
            method: self.request.method(),
            url: self.request.endpoint().clone(),
            headers: self.request.headers().clone(),
            body: (!body.is_empty_body()).then(|| body.wire_bytes().clone()),
        };

        let raw = self
            .transport
            .send(&transport_request)
            .map_err(|source| ClientError::Execution {
                request: Box::new(self.request.clone()),
                source,
            })?;
        Span::current().record("http.status_code", raw.status_code);

        let RawResponse {
            status_code,
            status_message,
            headers,
            content_type,
            body,
        } = raw;
        let payload = Negotiator::new(&self.basic)
            .accept(self.request.accept_types())
            .resolver(self.resolver.as_ref())
            .negotiate(content_type.as_deref(), body)?;

        let response = Response::new(
            self.request.clone(),
            status_code,
            status_message,
            headers,
            payload,
        );
        trace!(
            http.status_code = response.status_code(),
            headers = ?response.headers(),
            content_type = %response.body().content_type(),
            body = %response.body().text(),
            "Received response"
        );
        Ok(response)
    }
}
