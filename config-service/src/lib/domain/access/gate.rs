use std::sync::Arc;

use auth::Claims;
use auth::TokenService;

use crate::access::policy::Access;
use crate::access::policy::AccessPolicy;

/// Outcome of admitting a single request.
#[derive(Debug)]
pub struct GateResult {
    pub decision: Access,
    /// Verified claims, present whenever a valid token was supplied,
    /// including on public paths.
    pub claims: Option<Claims>,
}

/// Per-request entry point ahead of the handlers.
///
/// Holds no state across calls; an absent or invalid token is a boolean
/// input to the policy, never an error at this layer.
pub struct RequestGate {
    tokens: Arc<TokenService>,
}

impl RequestGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Decide whether the request may proceed and surface the caller's
    /// verified claims.
    ///
    /// # Arguments
    /// * `path` - Request path
    /// * `bearer_token` - Raw token from the Authorization header, if any
    pub fn admit(&self, path: &str, bearer_token: Option<&str>) -> GateResult {
        let claims = bearer_token.and_then(|token| match self.tokens.verify(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!(path, "Token verification failed: {}", e);
                None
            }
        });

        let decision = AccessPolicy::decide(path, claims.is_some());

        GateResult { decision, claims }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn gate_and_tokens() -> (RequestGate, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(b"test_secret_key_at_least_32_bytes!"));
        (RequestGate::new(Arc::clone(&tokens)), tokens)
    }

    #[test]
    fn test_admit_protected_path_with_valid_token() {
        let (gate, tokens) = gate_and_tokens();
        let token = tokens.issue("alice", HashMap::new()).unwrap();

        let result = gate.admit("/api/configs", Some(&token));

        assert_eq!(result.decision, Access::Allow);
        assert_eq!(result.claims.unwrap().subject(), "alice");
    }

    #[test]
    fn test_admit_protected_path_without_token() {
        let (gate, _) = gate_and_tokens();

        let result = gate.admit("/api/configs", None);

        assert_eq!(result.decision, Access::Reject);
        assert!(result.claims.is_none());
    }

    #[test]
    fn test_admit_protected_path_with_garbage_token() {
        let (gate, _) = gate_and_tokens();

        // Invalidity is not an error, just an unauthenticated caller
        let result = gate.admit("/api/configs", Some("not.a.token"));

        assert_eq!(result.decision, Access::Reject);
        assert!(result.claims.is_none());
    }

    #[test]
    fn test_admit_public_path_without_token() {
        let (gate, _) = gate_and_tokens();

        let result = gate.admit("/api/auth/login", None);

        assert_eq!(result.decision, Access::Allow);
        assert!(result.claims.is_none());
    }

    #[test]
    fn test_admit_public_path_forwards_claims() {
        let (gate, tokens) = gate_and_tokens();
        let token = tokens.issue("alice", HashMap::new()).unwrap();

        let result = gate.admit("/api/auth/validate", Some(&token));

        assert_eq!(result.decision, Access::Allow);
        assert_eq!(result.claims.unwrap().username(), Some("alice"));
    }

    #[test]
    fn test_admit_token_signed_with_other_key() {
        let (gate, _) = gate_and_tokens();
        let other = TokenService::new(b"another_secret_key_32_bytes_long!!");
        let token = other.issue("alice", HashMap::new()).unwrap();

        let result = gate.admit("/api/configs", Some(&token));

        assert_eq!(result.decision, Access::Reject);
        assert!(result.claims.is_none());
    }
}
