use std::fmt;
use std::time::Duration;

use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlSslMode};

use crate::config::{ConnectionConfig, REDACTED};
use crate::error::AppError;

/// Driver identifier advertised with every connection source.
pub const MYSQL_DRIVER: &str = "com.mysql.cj.jdbc.Driver";

/// Everything a pooling layer needs to reach the shipping database.
#[derive(Clone)]
pub struct ConnectionSource {
    driver: &'static str,
    url: String,
    config: ConnectionConfig,
}

impl ConnectionSource {
    pub fn new(config: &ConnectionConfig) -> Self {
        Self {
            driver: MYSQL_DRIVER,
            url: config.url(),
            config: config.clone(),
        }
    }

    pub fn driver(&self) -> &str {
        self.driver
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.config.username
    }

    pub fn password(&self) -> &str {
        &self.config.password
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl fmt::Debug for ConnectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSource")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .field("username", &self.config.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Build the connection source for `config`.
///
/// Performs no I/O. Logs the URL once; credentials stay out of the log.
pub fn build_connection_source(config: &ConnectionConfig) -> ConnectionSource {
    let source = ConnectionSource::new(config);
    tracing::info!("Using JDBC URL: {}", source.url());
    source
}

/// Native MySQL connect options for `source`. SSL is off, matching `useSSL=false`.
pub fn connect_options(source: &ConnectionSource) -> Result<MySqlConnectOptions, AppError> {
    let config = source.config();
    let port: u16 = config.port.parse().map_err(|_| {
        AppError::Config(format!("MYSQL_PORT must be a valid port, got {:?}", config.port))
    })?;

    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(port)
        .username(&config.username)
        .password(&config.password)
        .ssl_mode(MySqlSslMode::Disabled);

    if !config.database.is_empty() {
        options = options.database(&config.database);
    }

    Ok(options)
}

/// Create a MySQL connection pool that connects on first use.
///
/// `max_connections` controls the maximum number of connections in the pool.
/// Pass `AppConfig::db_max_connections` for the user-configured value (default 20).
pub fn create_pool(source: &ConnectionSource, max_connections: u32) -> Result<MySqlPool, AppError> {
    let options = connect_options(source)?;

    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options);

    tracing::debug!(max_connections, "MySQL pool created");
    Ok(pool)
}
