//! Endpoint templates with `${name}` and `$name` variables.
//!
//! ```rust
//! use std::collections::HashMap;
//! use parcel::endpoint::resolve_vars;
//!
//! let params = HashMap::from([("id".to_string(), "42".to_string())]);
//! assert_eq!(
//!     resolve_vars("https://shop.test/products/${id}?ref=$source", &params),
//!     "https://shop.test/products/42?ref=$source"
//! );
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

use crate::error::ConfigError;

static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_.\-]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("Invalid regex")
});

/// Substitutes known variables in `template`. Unknown names stay as written.
pub fn resolve_vars<'a>(template: &'a str, params: &HashMap<String, String>) -> Cow<'a, str> {
    VARIABLE_RE.replace_all(template, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        match params.get(name) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        }
    })
}

/// Resolves `template` and parses it as an absolute URL.
///
/// ## Errors
///
/// Returns [`ConfigError::InvalidUrl`] for relative or malformed URLs.
pub fn parse_endpoint(template: &str, params: &HashMap<String, String>) -> Result<Url, ConfigError> {
    Ok(Url::parse(&resolve_vars(template, params))?)
}
