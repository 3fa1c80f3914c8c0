//! HTTP relay that forwards finance-assistant chat messages to the DeepSeek
//! chat completions API and returns the assistant's reply.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod relay;
pub mod telemetry;

use crate::{config::AppConfig, error::AppError};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let client = relay::build_client(config.upstream_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(handlers::home))
        .route("/chat", post(handlers::chat))
        .with_state(state)
        .layer(cors)
        .layer(from_fn(telemetry::request_logging))
}
