use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Verified payload of a bearer token.
///
/// Standard RFC 7519 fields plus a flat map of custom claims. The custom map
/// carries at minimum a `username` claim equal to the subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the authenticated username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Additional custom fields (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Subject of the token.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Username from the custom claim map.
    pub fn username(&self) -> Option<&str> {
        self.extra.get("username").and_then(|v| v.as_str())
    }

    /// Check whether the token has lapsed at the given instant.
    ///
    /// The boundary is exact: a token is still valid at `exp` itself.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
