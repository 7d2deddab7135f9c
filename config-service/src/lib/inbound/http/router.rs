use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::validate::validate;
use super::middleware::gate as gate_middleware;
use crate::access::gate::RequestGate;
use crate::domain::credential::service::CredentialManager;
use crate::outbound::repositories::credential::PostgresIdentityStore;

#[derive(Clone)]
pub struct AppState {
    pub credential_manager: Arc<CredentialManager<PostgresIdentityStore>>,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<RequestGate>,
}

pub fn create_router(
    credential_manager: Arc<CredentialManager<PostgresIdentityStore>>,
    tokens: Arc<TokenService>,
    gate: Arc<RequestGate>,
) -> Router {
    let state = AppState {
        credential_manager,
        tokens,
        gate,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // Every route, including the fallback, passes through the gate; the
    // path policy decides which ones require a token.
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/validate", get(validate))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate_middleware,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found"
        })),
    )
}
