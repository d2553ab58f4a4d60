//! OAuth 2.0 token endpoint records (RFC 6749 §5).

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Seconds subtracted from `expires_in` so a token is treated as expired
/// slightly before the server would reject it.
const EXPIRY_LEEWAY_SECS: i64 = 20;

/// Successful token response.
///
/// Only `token_type` is required; every other field defaults to `None` when
/// the server omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthTokenResponse {
    pub token_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(
        rename = "expires_in",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_in_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(
        rename = "refresh_expires_in",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_expires_in_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl OAuthTokenResponse {
    /// Converts the response into an [`AccessToken`].
    ///
    /// Returns `None` when the response carries no `access_token`. Without
    /// `expires_in` the token never expires locally.
    pub fn to_access_token(&self) -> Option<AccessToken> {
        let encoded = self.access_token.as_ref()?;
        Some(AccessToken::new(
            encoded.clone(),
            self.token_type.clone(),
            self.expires_in_seconds,
            self.scope.clone(),
        ))
    }
}

/// Error response from a token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,

    #[serde(
        rename = "error_description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(rename = "error_uri", default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Non-standard, but common in the wild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Non-standard; accepted as either a JSON string or number.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_code: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A bearer credential ready to be sent in an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    encoded: String,
    token_type: String,
    expires_in_seconds: Option<i64>,
    scope: Option<String>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token that expires `expires_in_seconds` from now, minus a
    /// small leeway. `None` means the token does not expire.
    ///
    /// Lifetimes beyond what `DateTime<Utc>` can represent are clamped.
    pub fn new(
        encoded: impl Into<String>,
        token_type: impl Into<String>,
        expires_in_seconds: Option<i64>,
        scope: Option<String>,
    ) -> Self {
        let expires_at = expires_in_seconds.map_or(DateTime::<Utc>::MAX_UTC, expiry_from_now);
        Self {
            encoded: encoded.into(),
            token_type: token_type.into(),
            expires_in_seconds,
            scope,
            expires_at,
        }
    }

    /// The encoded token (usually a JWT).
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_in_seconds(&self) -> Option<i64> {
        self.expires_in_seconds
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Value for the `Authorization` header, e.g. `Bearer eyJ...`.
    ///
    /// The token type is capitalized, so a server-sent `bearer` becomes
    /// `Bearer`.
    pub fn authorization_value(&self) -> String {
        let mut chars = self.token_type.chars();
        let token_type = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{token_type} {}", self.encoded)
    }
}

fn expiry_from_now(expires_in_seconds: i64) -> DateTime<Utc> {
    let remaining = expires_in_seconds.saturating_sub(EXPIRY_LEEWAY_SECS);
    TimeDelta::try_seconds(remaining)
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(if remaining < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
