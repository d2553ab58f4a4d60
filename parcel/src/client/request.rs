//! The request record.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::content::ContentType;
use crate::method::HttpMethod;
use crate::payload::Payload;

/// Header names (lowercase) mapped to their values.
pub type HeaderMultimap = BTreeMap<String, Vec<String>>;

/// A fully configured HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: HttpMethod,
    endpoint: Url,
    headers: HeaderMultimap,
    body: Payload,
    accept: Vec<ContentType>,
}

impl Request {
    pub(crate) fn new(
        method: HttpMethod,
        endpoint: Url,
        headers: HeaderMultimap,
        body: Payload,
        accept: Vec<ContentType>,
    ) -> Self {
        Self {
            method,
            endpoint,
            headers,
            body,
            accept,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    /// Values of header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// The request body; [`Payload::empty`] when none was set.
    pub fn body(&self) -> &Payload {
        &self.body
    }

    /// Content types tried first when decoding the response.
    pub fn accept_types(&self) -> &[ContentType] {
        &self.accept
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)
    }
}
