use axum::{response::IntoResponse, Json};
use serde_json::{json, Value};

/// Event names this agent cares to log at info level. Everything else is
/// logged and ignored.
const KNOWN_EVENTS: &[&str] = &["message.created", "message.updated", "task.completed"];

/// Handle `POST /webhook`.
///
/// Inbound events are logged, never dispatched or stored, and always
/// acknowledged so the sender does not retry.
#[tracing::instrument(skip(payload))]
pub async fn webhook(Json(payload): Json<Value>) -> impl IntoResponse {
    match payload.get("method").and_then(|m| m.as_str()) {
        Some(method) if KNOWN_EVENTS.contains(&method) => {
            tracing::info!(method = %method, "Received webhook event");
        }
        Some(method) => {
            tracing::debug!(method = %method, "Ignoring unrecognized webhook event");
        }
        None => {
            tracing::warn!("Webhook payload carried no method field");
        }
    }

    Json(json!({"status": "ok"}))
}
