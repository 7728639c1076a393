use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

use crate::models::{A2aRequest, A2aResponse, RpcError};
use crate::startup::AppState;

const MISSING_TEXT_MESSAGE: &str = "Invalid parameters: Missing text content in message parts.";

/// Handle `POST /a2a/explain`.
///
/// Every outcome is HTTP 200: validation failures surface as JSON-RPC error
/// envelopes, provider failures as diagnostic text inside a success
/// envelope. The response `id` echoes the request `id` whenever the body
/// parsed far enough to contain one.
#[tracing::instrument(skip(state, payload))]
pub async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<A2aRequest>, JsonRejection>,
) -> Json<A2aResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected unparseable request body");
            return Json(A2aResponse::error(None, RpcError::PARSE_ERROR, "Parse error"));
        }
    };

    if request.jsonrpc != "2.0" {
        tracing::warn!(version = %request.jsonrpc, "Unsupported jsonrpc version");
        return Json(A2aResponse::error(
            Some(request.id),
            RpcError::INVALID_REQUEST,
            "Invalid Request: unsupported jsonrpc version",
        ));
    }

    let Some(error_message) = request.text_payload() else {
        tracing::warn!(id = %request.id, "Request had no usable text part");
        return Json(A2aResponse::error(
            Some(request.id),
            RpcError::INVALID_PARAMS,
            MISSING_TEXT_MESSAGE,
        ));
    };

    tracing::debug!(
        id = %request.id,
        method = %request.method,
        input_len = error_message.len(),
        "Explaining error message"
    );

    // A provider failure never propagates past this point: the caller gets
    // a diagnostic explanation in an ordinary success envelope.
    let explanation = match state.explainer.explain(error_message).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(id = %request.id, error = %e, "Explanation provider failed");
            format!("Error: Could not process request. Details: {}", e)
        }
    };

    Json(A2aResponse::success(request.id, explanation))
}
