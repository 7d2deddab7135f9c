use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use auth::Claims;

use crate::access::policy::Access;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified caller identity into handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    pub username: String,
    pub claims: Claims,
}

/// Gate middleware applied to every route.
///
/// Consults the request gate for the path decision; on allow, attaches the
/// verified caller (when a valid token was presented) to the request
/// extensions. On reject, answers 401 with no claim detail.
pub async fn gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers());
    let result = state.gate.admit(req.uri().path(), token);

    match result.decision {
        Access::Reject => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized"
            })),
        )
            .into_response()),
        Access::Allow => {
            if let Some(claims) = result.claims {
                let username = claims
                    .username()
                    .unwrap_or_else(|| claims.subject())
                    .to_string();
                req.extensions_mut()
                    .insert(AuthenticatedCaller { username, claims });
            }
            Ok(next.run(req).await)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    // A missing or malformed header is an anonymous caller, not an error
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
