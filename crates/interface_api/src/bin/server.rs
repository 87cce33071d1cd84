//! Payment Gateway - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin gateway-api
//!
//! # Run in deterministic test mode
//! GATEWAY_TEST_MODE=true GATEWAY_DATABASE_URL=postgres://... cargo run --bin gateway-api
//! ```
//!
//! # Environment Variables
//!
//! * `GATEWAY_HOST` - Server host (default: 0.0.0.0)
//! * `GATEWAY_PORT` - Server port (default: 8000)
//! * `GATEWAY_DATABASE_URL` - PostgreSQL connection string
//! * `GATEWAY_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `GATEWAY_TEST_MODE` - fixed delay and forced outcome (default: false)
//! * `GATEWAY_TEST_PROCESSING_DELAY_MS` - test-mode delay (default: 1000)
//! * `GATEWAY_TEST_PAYMENT_SUCCESS` - test-mode outcome (default: true)
//! * `GATEWAY_UPI_SUCCESS_RATE` - UPI success probability (default: 0.90)
//! * `GATEWAY_CARD_SUCCESS_RATE` - card success probability (default: 0.95)
//! * `GATEWAY_TEST_MERCHANT_NAME` / `_EMAIL` / `GATEWAY_TEST_API_KEY` /
//!   `GATEWAY_TEST_API_SECRET` - seeded merchant identity

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_api::{config::GatewayConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        test_mode = config.test_mode,
        "Starting payment gateway API server"
    );

    // Pool, schema, seed merchant.
    let pool = infra_db::create_pool_from_url(&config.database_url)
        .await
        .context("database connection failed")?;
    infra_db::run_migrations(&pool)
        .await
        .context("migrations failed")?;
    infra_db::seed_merchant(&pool, &config.seed_merchant())
        .await
        .context("merchant seeding failed")?;

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_router(pool, config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads configuration from `GATEWAY_`-prefixed environment variables,
/// falling back to defaults for anything unset.
fn load_config() -> anyhow::Result<GatewayConfig> {
    let config = GatewayConfig::from_env().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "environment config incomplete, using defaults");
        GatewayConfig::default()
    });
    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM) so in-flight payments
/// can finalize before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
