//! URL-encoded form data.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Key/value pairs sent as `application/x-www-form-urlencoded`.
///
/// Keys are unique; adding an existing key replaces its value. Entries are
/// kept in key order so the encoded form is deterministic.
///
/// ## Examples
///
/// ```rust
/// use parcel::Form;
///
/// let form = Form::new().with("grant_type", "client_credentials").with("scope", "read write");
/// assert_eq!(form.encode(), "grant_type=client_credentials&scope=read+write");
/// assert_eq!(Form::decode(&form.encode()), form);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    entries: BTreeMap<String, String>,
}

impl Form {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the value it replaced.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Adds an entry and returns the form.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterates over the entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the form as `k=v` pairs joined by `&`, percent-encoding both
    /// keys and values.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.entries.iter())
            .finish()
    }

    /// Decodes an encoded form.
    ///
    /// Pairs are split on `&`, then each pair on its first `=`, so values may
    /// contain `=`. A pair without `=` decodes to an empty value and empty
    /// input decodes to an empty form. Repeated keys keep the last value.
    pub fn decode(encoded: &str) -> Self {
        Self::decode_bytes(encoded.as_bytes())
    }

    /// Decodes an encoded form from raw bytes.
    ///
    /// Invalid UTF-8 inside percent-escapes is replaced rather than rejected.
    pub fn decode_bytes(encoded: &[u8]) -> Self {
        form_urlencoded::parse(encoded).into_owned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Form {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
