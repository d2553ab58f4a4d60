//! Media type strings.

/// `text/plain`
pub const TEXT_PLAIN: &str = "text/plain";
/// `text/xml`
pub const TEXT_XML: &str = "text/xml";
/// `text/html`
pub const TEXT_HTML: &str = "text/html";
/// `application/xml`
pub const APPLICATION_XML: &str = "application/xml";
/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `application/octet-stream`
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
/// `application/x-www-form-urlencoded`
pub const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";
/// Sentinel media type of the empty payload. Never sent on the wire.
pub const EMPTY_BODY: &str = "EMPTY_BODY";

/// Normalizes a raw media type for lookup.
///
/// Everything from the first `;` on is dropped, the rest is trimmed and
/// lowercased.
///
/// ```rust
/// use parcel::media_type::normalize;
///
/// assert_eq!(normalize(" Text/Plain; charset=UTF-8"), "text/plain");
/// ```
pub fn normalize(raw: &str) -> String {
    let essence = raw.split(';').next().unwrap_or(raw);
    essence.trim().to_ascii_lowercase()
}
