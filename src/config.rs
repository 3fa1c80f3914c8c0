use dotenv::dotenv;
use std::{env, fmt, time::Duration};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

/// Process configuration, read once at startup and shared with every handler.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Bearer credential for the upstream API. Checked per request, not at startup.
    pub api_key: Option<String>,
    /// Upstream chat completions endpoint. Checked per request, not at startup.
    pub api_url: Option<String>,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values in a .env file count as unset.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs: u64 = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: "UPSTREAM_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Zero { name: "UPSTREAM_TIMEOUT_SECS" });
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_key: get("DEEPSEEK_API_KEY"),
            api_url: get("DEEPSEEK_API_URL"),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}
