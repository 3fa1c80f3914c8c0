use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use tracing::{error, warn};

use crate::{
    error::AppError,
    models::{is_json_content_type, ChatReply, ChatRequest, HomeResponse},
    relay::forward_chat,
    AppState,
};

pub const LIVENESS_MESSAGE: &str = "AI Finance Assistant API is running";

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: LIVENESS_MESSAGE,
    })
}

/// Takes the raw body so that a non-JSON content type or malformed JSON is
/// reported in the relay's own error shape instead of axum's extractor
/// rejection.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let result = match parse_chat_body(&headers, &body) {
        Ok(message) => forward_chat(&state.client, &state.config, message).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            if e.status_code().is_server_error() {
                error!("Chat relay failed: {}", e);
            } else {
                warn!("Chat relay rejected: {}", e);
            }
            Err(e)
        }
    }
}

fn parse_chat_body(headers: &HeaderMap, body: &[u8]) -> Result<serde_json::Value, AppError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(is_json_content_type);
    if !is_json {
        return Err(AppError::UnsupportedContentType);
    }
    ChatRequest::parse_message(body)
}
