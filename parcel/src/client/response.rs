//! The response record.

use super::request::{HeaderMultimap, Request};
use crate::payload::Payload;

/// A received HTTP response with its negotiated body.
///
/// Any status is a valid response; use [`is_ok`](Self::is_ok) to check for
/// success.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    request: Request,
    status_code: u16,
    status_message: Option<String>,
    headers: HeaderMultimap,
    body: Payload,
}

impl Response {
    pub(crate) fn new(
        request: Request,
        status_code: u16,
        status_message: Option<String>,
        headers: HeaderMultimap,
        body: Payload,
    ) -> Self {
        Self {
            request,
            status_code,
            status_message,
            headers,
            body,
        }
    }

    /// The request this response answers.
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The reason phrase, when the transport reports one.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status_code)
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

    pub fn body(&self) -> &Payload {
        &self.body
    }

    /// Consumes the response, returning its body.
    pub fn into_body(self) -> Payload {
        self.body
    }
}
