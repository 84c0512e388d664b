//! Gateway Authentication Server - Main Application Entry Point
//!
//! Serves a small HTTP API guarded by a static API secret key and logs every
//! request as a structured event.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Authentication**: `Authorization: Token <API_SECRET_KEY>` header
//! - **Logging**: tracing, one debug event per request
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Initialize logging (level derived from `DEBUG_MODE` unless `RUST_LOG` is set)
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured address, stop on Ctrl-C / SIGTERM

use std::net::SocketAddr;

use gateway_auth_server::{config, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: it decides the default log level
    let config = config::Config::from_env()?;

    // Reads RUST_LOG environment variable, falling back to the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_log_filter().into());
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(debug_mode = config.debug_mode, "Configuration loaded");

    if config.api_secret_key.is_empty() {
        tracing::warn!("API_SECRET_KEY is empty, API authentication is disabled");
    }

    let app = routes::build_router(&config);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    // Connect info lets the request logger report the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
