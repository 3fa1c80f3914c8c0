use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    error::AppError,
    models::{ChatMessage, ChatReply, Choice, Role, UpstreamPayload, UpstreamResponse},
};

mod client;
pub use client::build_client;

pub const MODEL: &str = "deepseek-chat";
pub const SYSTEM_PROMPT: &str =
    "You are a helpful financial assistant. Provide clear, concise, and accurate financial advice.";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

/// Wraps the user message with the fixed system prompt and sampling settings.
pub fn build_payload(user_message: Value) -> UpstreamPayload {
    UpstreamPayload {
        model: MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: Value::String(SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: Role::User,
                content: user_message,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Sends one chat message upstream and returns the assistant's reply.
///
/// Only an upstream `200 OK` counts as success. Any other status becomes
/// [`AppError::Upstream`] carrying the raw response text.
pub async fn forward_chat(
    client: &reqwest::Client,
    config: &AppConfig,
    user_message: Value,
) -> Result<ChatReply, AppError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(AppError::MissingConfig("DEEPSEEK_API_KEY"))?;
    let url = config
        .api_url
        .as_deref()
        .ok_or(AppError::MissingConfig("DEEPSEEK_API_URL"))?;

    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| AppError::InvalidHeader)?,
    );

    let payload = build_payload(user_message);
    debug!(url = %url, model = MODEL, "Sending chat request upstream");

    let response = client.post(url).headers(headers).json(&payload).send().await?;
    let status = response.status();

    if status != StatusCode::OK {
        let details = response.text().await?;
        warn!(status = status.as_u16(), "Upstream returned an error status");
        return Err(AppError::Upstream { status, details });
    }

    let body = response.bytes().await?;
    debug!(bytes = body.len(), "Upstream response received");
    extract_reply(&body)
}

/// Pulls `choices[0].message.content` out of an upstream completion body.
/// Later choices are never inspected.
pub fn extract_reply(body: &[u8]) -> Result<ChatReply, AppError> {
    let value: Value = serde_json::from_slice(body)?;
    let response: UpstreamResponse =
        serde_json::from_value(value).map_err(|_| AppError::InvalidResponseFormat)?;

    let first = response
        .choices
        .into_iter()
        .next()
        .ok_or(AppError::InvalidResponseFormat)?;
    let choice: Choice =
        serde_json::from_value(first).map_err(|_| AppError::InvalidResponseFormat)?;

    Ok(ChatReply {
        reply: choice.message.content,
    })
}
