use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedCaller;

/// Report whether the presented token is valid.
///
/// The path itself is public (it sits under `/api/auth/`), so the gate lets
/// anonymous callers through; the handler answers 401 when no verified
/// claims were attached.
pub async fn validate(
    caller: Option<Extension<AuthenticatedCaller>>,
) -> Result<ApiSuccess<ValidateResponseData>, ApiError> {
    let Some(Extension(caller)) = caller else {
        return Err(ApiError::Unauthorized(
            "Invalid or expired token".to_string(),
        ));
    };

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateResponseData {
            valid: true,
            username: caller.username,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub valid: bool,
    pub username: String,
}
