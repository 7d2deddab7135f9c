use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::credential::ports::CredentialManagerPort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    // Unknown user and wrong password collapse to the same outcome
    let credential = state
        .credential_manager
        .authenticate(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let username = credential.username.as_str().to_string();

    let mut extra = HashMap::new();
    extra.insert("username".to_string(), serde_json::json!(username));
    let token = state
        .tokens
        .issue(&username, extra)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData { token, username },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}
