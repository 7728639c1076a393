//! Integration tests for the `/a2a/explain` endpoint.
//!
//! The live-server tests run the deterministic rules provider so no network
//! or credential is needed; the provider-failure path is exercised at the
//! router level with a mock.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use explainer_service::config::{AgentConfig, ExplainerConfig, GeminiSettings, ProviderKind};
use explainer_service::services::providers::mock::MockExplainer;
use explainer_service::services::ExplanationProvider;
use explainer_service::startup::{api_router, Application, AppState};
use http_body_util::BodyExt;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0"); // Random port
    std::env::set_var("EXPLAINER_PROVIDER", "rules");

    let config = ExplainerConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

fn explain_request(id: &str, parts: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "message/send",
        "params": {
            "message": {
                "role": "user",
                "parts": parts
            }
        },
        "id": id
    })
}

async fn post_explain(port: u16, body: &Value) -> (StatusCode, Value) {
    let client = Client::new();
    let response = client
        .post(format!("http://localhost:{}/a2a/explain", port))
        .json(body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let body: Value = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

#[tokio::test]
async fn valid_request_echoes_id_and_wraps_one_text_part() {
    let port = spawn_app().await;
    let request = explain_request(
        "req-42",
        json!([{"type": "text", "text": "SyntaxError: invalid syntax"}]),
    );

    let (status, body) = post_explain(port, &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], "req-42");
    assert_eq!(body["result"]["message"]["role"], "agent");

    let parts = body["result"]["message"]["parts"]
        .as_array()
        .expect("parts should be an array");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["type"], "text");
    assert!(parts[0]["text"]
        .as_str()
        .expect("text part should be a string")
        .contains("Python syntax error"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn unknown_error_gets_the_fallback_explanation() {
    let port = spawn_app().await;
    let request = explain_request(
        "req-43",
        json!([{"type": "text", "text": "random unknown failure"}]),
    );

    let (status, body) = post_explain(port, &request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["message"]["parts"][0]["text"]
        .as_str()
        .expect("text part should be a string")
        .contains("Explanation not found for 'random unknown failure'"));
}

#[tokio::test]
async fn rule_based_responses_are_deterministic() {
    let port = spawn_app().await;
    let request = explain_request(
        "req-44",
        json!([{"type": "text", "text": "KeyError: 'user_id'"}]),
    );

    let (_, first) = post_explain(port, &request).await;
    let (_, second) = post_explain(port, &request).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_text_part_yields_invalid_params_with_id() {
    let port = spawn_app().await;

    for parts in [
        json!([]),
        json!([{"type": "image", "text": "not text"}]),
        json!([{"type": "text", "text": ""}]),
    ] {
        let request = explain_request("req-45", parts);
        let (status, body) = post_explain(port, &request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["code"], -32602);
        assert_eq!(
            body["error"]["message"],
            "Invalid parameters: Missing text content in message parts."
        );
        assert_eq!(body["id"], "req-45");
        assert!(body.get("result").is_none());
    }
}

#[tokio::test]
async fn wrong_jsonrpc_version_yields_invalid_request_with_id() {
    let port = spawn_app().await;
    let mut request = explain_request(
        "req-46",
        json!([{"type": "text", "text": "TypeError: cannot add"}]),
    );
    request["jsonrpc"] = json!("1.0");

    let (status, body) = post_explain(port, &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], "req-46");
}

#[tokio::test]
async fn unparseable_body_yields_parse_error_with_null_id() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/a2a/explain", port))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

/// Provider failure must never surface as an HTTP error: the caller still
/// gets a 200 with a diagnostic explanation.
#[tokio::test]
async fn provider_failure_still_returns_explanatory_text() {
    let failing: Arc<dyn ExplanationProvider> = Arc::new(MockExplainer::new(false));
    let state = AppState {
        config: ExplainerConfig {
            common: agent_core::config::Config { port: 0 },
            agent: AgentConfig {
                name: "Error Explainer Agent".to_string(),
            },
            provider: ProviderKind::Rules,
            gemini: GeminiSettings {
                api_key: String::new(),
                model: String::new(),
            },
        },
        explainer: failing,
    };
    let app = api_router(state);

    let request = explain_request(
        "req-47",
        json!([{"type": "text", "text": "panic: index out of range"}]),
    );
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/a2a/explain")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("Failed to parse JSON");

    assert_eq!(body["id"], "req-47");
    let text = body["result"]["message"]["parts"][0]["text"]
        .as_str()
        .expect("text part should be a string");
    assert!(text.contains("Error: Could not process request"));
    assert!(!text.is_empty());
}
