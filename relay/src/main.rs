//! Orderhook web server.
//!
//! Verifies order-created webhooks and relays the customer to the
//! invitation API within the same request.

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orderhook::{router, AppState, Config, Forwarder};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    let config = Config::from_env();
    info!(
        port = config.port,
        webhook_secret_configured = config.has_webhook_secret(),
        require_webhook_secret = config.require_webhook_secret,
        invite_api_url = %config.invite_api_url,
        "config_loaded"
    );

    if !config.has_webhook_secret() {
        if config.require_webhook_secret {
            bail!("SHOPIFY_WEBHOOK_SECRET is required when REQUIRE_WEBHOOK_SECRET is set");
        }
        warn!("webhook_signature_verification_disabled_at_startup");
    }

    let forwarder = Forwarder::new(config.invite_api_url.clone());
    info!(invite_api_url = %forwarder.url(), "invite_forwarder_ready");

    let state = AppState::new(config.clone(), forwarder);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
