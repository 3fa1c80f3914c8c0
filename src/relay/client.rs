use std::time::Duration;

use crate::error::AppError;

/// Builds the pooled upstream client. The timeout bounds the whole exchange,
/// from connect to the last byte of the response body.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(32)
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(timeout)
        .build()
        .map_err(AppError::from)
}
