//! Shipping service binary entrypoint.

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shipping_common::config::AppConfig;
use shipping_common::db::{build_connection_source, create_pool};

use shipping_api::routes::create_router;
use shipping_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("shipping_api=info,shipping_common=info,tower_http=info")
        }))
        .init();

    tracing::info!("Starting shipping service...");

    // Load configuration
    let config = AppConfig::from_env()?;
    if config.mysql.uses_default_password() {
        tracing::warn!("MYSQL_PASSWORD is the built-in default; set it for any real deployment");
    }

    // Connection source and lazy pool; nothing is dialled until first use
    let source = build_connection_source(&config.mysql);
    let pool = create_pool(&source, config.db_max_connections)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let state = AppState::new(pool, source, config);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    tracing::info!("Shipping service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received shutdown signal, stopping gracefully...");
            }
        })
        .await?;

    Ok(())
}
