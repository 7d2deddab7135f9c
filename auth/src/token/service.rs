use std::collections::HashMap;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Fixed token lifetime in seconds.
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a symmetric key injected at
/// construction. The key lives for the whole process; rotation and
/// revocation are out of scope, which is what makes verification a purely
/// local check with no store access.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a new token service with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// Embeds `sub = subject`, `iat = now`, `exp = now + TOKEN_TTL_SECONDS`
    /// and the given custom claims. A `username` claim equal to the subject
    /// is added when the caller does not supply one.
    ///
    /// # Arguments
    /// * `subject` - Authenticated username
    /// * `extra` - Custom claims flattened into the token
    ///
    /// # Returns
    /// Compact signed token string
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        mut extra: HashMap<String, serde_json::Value>,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();

        extra
            .entry("username".to_string())
            .or_insert_with(|| serde_json::json!(subject));

        let claims = Claims {
            sub: subject.to_string(),
            exp: now + TOKEN_TTL_SECONDS,
            iat: now,
            extra,
        };

        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Expiry is checked with zero leeway: a token is rejected the second
    /// after `exp`, with no clock-skew tolerance.
    ///
    /// # Arguments
    /// * `token` - Compact signed token string
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but the time window has lapsed
    /// * `Invalid` - Signature mismatch or malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
