//! A2A request/response envelope types, layered over JSON-RPC 2.0.
//!
//! Wire format: `{jsonrpc, method, params: {message}, id}` in,
//! `{jsonrpc, result | error, id}` out. The response `id` always echoes the
//! request `id`; it is only `null` for parse errors where no id could be
//! recovered from the body.

use serde::{Deserialize, Serialize};

/// Content kind of a message part. Only `text` carries a payload; foreign
/// kinds deserialize to `Unknown` so they never fail envelope parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Text,
    #[serde(other)]
    Unknown,
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// A single content unit inside a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "type")]
    pub kind: PartKind,
    #[serde(default)]
    pub text: String,
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Text,
            text: text.into(),
        }
    }

    /// A part qualifies as payload when it is a text part with content.
    pub fn is_text_payload(&self) -> bool {
        self.kind == PartKind::Text && !self.text.is_empty()
    }
}

/// A directional communication unit: who said it and what was said.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

/// The JSON-RPC `params` object carrying the user message.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestParams {
    pub message: Message,
}

/// A complete inbound JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct A2aRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: RequestParams,
    pub id: String,
}

impl A2aRequest {
    /// First part that qualifies as payload, in document order.
    pub fn text_payload(&self) -> Option<&str> {
        self.params
            .message
            .parts
            .iter()
            .find(|p| p.is_text_payload())
            .map(|p| p.text.as_str())
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const INVALID_PARAMS: i64 = -32602;
}

/// The `result` object of a successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseResult {
    pub message: Message,
}

/// A complete outbound JSON-RPC 2.0 response. Exactly one of `result` and
/// `error` is present; the other is omitted from the serialized body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2aResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<String>,
}

impl A2aResponse {
    /// Wrap an explanation into the agent message structure, echoing `id`.
    pub fn success(id: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(ResponseResult {
                message: Message {
                    role: Role::Agent,
                    parts: vec![MessagePart::text(explanation)],
                },
            }),
            error: None,
            id: Some(id.into()),
        }
    }

    /// Build an error envelope. `id` is `None` only when the request body
    /// could not be parsed at all.
    pub fn error(id: Option<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}
