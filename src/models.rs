use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Inbound body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Value,
}

impl ChatRequest {
    /// Parses a raw request body and returns the user message.
    ///
    /// A body that is not JSON at all is an internal failure; a JSON body that
    /// is not an object, or whose `message` is absent or falsy, is
    /// [`AppError::MissingMessage`].
    pub fn parse_message(body: &[u8]) -> Result<Value, AppError> {
        let value: Value = serde_json::from_slice(body)?;
        serde_json::from_value::<ChatRequest>(value)
            .ok()
            .map(|request| request.message)
            .filter(is_truthy)
            .ok_or(AppError::MissingMessage)
    }
}

/// Whether a `Content-Type` value names JSON: `application/json` or any
/// `application/*+json`, parameters ignored.
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json"
        || mime
            .strip_prefix("application/")
            .is_some_and(|subtype| subtype.ends_with("+json"))
}

/// JSON truthiness: null, false, 0, "", [] and {} are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: Value,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Value,
}

/// Body sent to the upstream chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// The part of an upstream completion the relay reads. Choices stay raw so
/// that only the first one has to match [`Choice`].
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub choices: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    // required, but may be null
    pub content: Value,
}
