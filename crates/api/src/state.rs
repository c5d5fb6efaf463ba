//! Shared application state for the Axum API server.

use shipping_common::config::AppConfig;
use shipping_common::db::ConnectionSource;
use sqlx::MySqlPool;

/// Application state shared across all route handlers via Axum `State`.
///
/// Built once in `main` and passed down explicitly.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub source: ConnectionSource,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(pool: MySqlPool, source: ConnectionSource, config: AppConfig) -> Self {
        Self {
            pool,
            source,
            config,
        }
    }
}
