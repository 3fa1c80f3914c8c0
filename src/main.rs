use tokio::net::TcpListener;
use tracing::{debug, error, info};

use finance_chat_relay::{config::AppConfig, router, telemetry, AppState};

#[tokio::main]
async fn main() {
    // Loads .env first so RUST_LOG and LOG_FORMAT from it reach the subscriber.
    let config = AppConfig::new();
    telemetry::init_tracing();

    let config = config.unwrap_or_else(|e| {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    });
    debug!("Configuration loaded: {:?}", config);

    if config.api_key.is_none() || config.api_url.is_none() {
        // Not fatal: /chat reports it per request.
        error!("DEEPSEEK_API_KEY or DEEPSEEK_API_URL is not set; chat requests will fail");
    }

    let addr = config.bind_addr();
    let state = AppState::new(config).unwrap_or_else(|e| {
        error!("Failed to create HTTP client: {}", e);
        std::process::exit(1);
    });
    let app = router(state);

    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        error!("Failed to bind {}: {}", addr, e);
        std::process::exit(1);
    });
    info!("Finance chat relay listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            error!("Server error: {}", e);
            std::process::exit(1);
        });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for CTRL+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            debug!("CTRL+C signal received");
        },
        _ = terminate => {
            debug!("Terminate signal received");
        },
    }
    info!("Shutdown signal received, starting graceful shutdown");
}
