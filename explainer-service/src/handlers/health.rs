use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Health check endpoint. No dependencies to probe, so it only reports the
/// configured agent identity.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "agent_name": state.config.agent.name
    }))
}

/// Readiness check endpoint for container orchestration probes.
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}
