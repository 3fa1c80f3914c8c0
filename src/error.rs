use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No message provided")]
    MissingMessage,

    #[error("API Error: {}", .status.as_u16())]
    Upstream { status: StatusCode, details: String },

    #[error("Invalid API response format")]
    InvalidResponseFormat,

    #[error("{0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0} is not configured")]
    MissingConfig(&'static str),

    #[error("Did not attempt to load JSON data because the request Content-Type was not 'application/json'.")]
    UnsupportedContentType,

    #[error("Invalid header value")]
    InvalidHeader,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingMessage => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => *status,
            AppError::InvalidResponseFormat
            | AppError::ReqwestError(_)
            | AppError::JsonError(_)
            | AppError::MissingConfig(_)
            | AppError::UnsupportedContentType
            | AppError::InvalidHeader => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::Upstream { details, .. } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
