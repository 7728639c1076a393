//! Gemini explanation provider.
//!
//! Sends the error message under a fixed instruction to the Gemini
//! `generateContent` REST endpoint and extracts the reply text through a
//! shape-tolerant adapter.

use super::{ExplanationProvider, ProviderError};
use crate::config::GeminiSettings;
use agent_core::observability::inject_trace_context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Instruction prepended to every request. Keeps replies short and in the
/// root-cause-plus-fixes shape the response envelope promises.
const SYSTEM_PROMPT: &str = "You are an expert software debugging assistant. \
The user will give you an error message or stack trace. Reply in plain \
language with the root cause of the error and 2-3 concrete steps to fix it. \
Keep the whole reply under 200 words. Do not ask follow-up questions.";

/// Remote-inference explanation provider.
pub struct GeminiExplainer {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiExplainer {
    pub fn new(settings: GeminiSettings) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { settings, client }
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, self.settings.model, method, self.settings.api_key
        )
    }
}

#[async_trait]
impl ExplanationProvider for GeminiExplainer {
    async fn explain(&self, error_message: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentPart {
                        text: SYSTEM_PROMPT.to_string(),
                    },
                    ContentPart {
                        text: error_message.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.2),
                max_output_tokens: Some(512),
            }),
        };

        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.settings.model,
            input_len = error_message.len(),
            "Sending request to Gemini API"
        );

        let mut headers = reqwest::header::HeaderMap::new();
        inject_trace_context(&mut headers);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::Api(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("Failed to parse response: {}", e)))?;

        extract_text(&body).ok_or(ProviderError::EmptyResponse)
    }
}

/// Normalize a generate-content response to its reply text.
///
/// The upstream shape is not guaranteed; probe the known variants in order
/// and give up with `None` rather than guessing:
/// 1. canonical `candidates[0].content.parts[*].text`
/// 2. a direct top-level `text` field
/// 3. a list of output items under `output`/`outputs`/`content`, each
///    carrying `text` or `content`
/// 4. a bare JSON string, coerced as a last resort
pub fn extract_text(value: &serde_json::Value) -> Option<String> {
    if let Some(parts) = value
        .pointer("/candidates/0/content/parts")
        .and_then(|p| p.as_array())
    {
        let text: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();
        if !text.is_empty() {
            return Some(text.join(""));
        }
    }

    if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
        return Some(text.to_string());
    }

    for key in ["output", "outputs", "content"] {
        if let Some(items) = value.get(key).and_then(|v| v.as_array()) {
            let text: Vec<&str> = items
                .iter()
                .filter_map(|item| {
                    item.get("text")
                        .or_else(|| item.get("content"))
                        .and_then(|t| t.as_str())
                })
                .collect();
            if !text.is_empty() {
                return Some(text.join(""));
            }
        }
    }

    value.as_str().map(|s| s.to_string())
}

// ============================================================================
// Gemini API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<i32>,
}
