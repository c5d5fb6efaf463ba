use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_MYSQL_HOST: &str = "mysql.data-space.svc.cluster.local";
pub const DEFAULT_MYSQL_PORT: &str = "3306";
pub const DEFAULT_MYSQL_DATABASE: &str = "cities";
pub const DEFAULT_MYSQL_USER: &str = "shipping";
pub const DEFAULT_MYSQL_PASSWORD: &str = "secret";

/// Rendered in place of credentials in `Debug` output.
pub(crate) const REDACTED: &str = "***";

/// Read-only lookup of configuration variables.
///
/// Lets callers resolve configuration from something other than the
/// process environment (tests pass a `HashMap`).
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment. Non-unicode values are decoded lossily, never dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// MySQL connection parameters for the shipping database.
///
/// Values are taken verbatim from the environment: no trimming, no
/// validation, and an empty string is a valid override.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionConfig {
    /// Load from the process environment, reading a `.env` file first if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_source(&ProcessEnv)
    }

    /// Resolve every `MYSQL_*` key against `env`, falling back to the defaults.
    pub fn from_source(env: &impl EnvSource) -> Self {
        let read = |key: &str, default: &str| env.var(key).unwrap_or_else(|| default.to_string());

        Self {
            host: read("MYSQL_HOST", DEFAULT_MYSQL_HOST),
            port: read("MYSQL_PORT", DEFAULT_MYSQL_PORT),
            database: read("MYSQL_DATABASE", DEFAULT_MYSQL_DATABASE),
            username: read("MYSQL_USER", DEFAULT_MYSQL_USER),
            password: read("MYSQL_PASSWORD", DEFAULT_MYSQL_PASSWORD),
        }
    }

    /// JDBC-style URL. Host, port and database are substituted unescaped.
    pub fn url(&self) -> String {
        format!(
            "jdbc:mysql://{}:{}/{}?useSSL=false&allowPublicKeyRetrieval=true&autoReconnect=true",
            self.host, self.port, self.database
        )
    }

    /// True when the password is the built-in default.
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_MYSQL_PASSWORD
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_source(&HashMap::<String, String>::new())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Service configuration for the shipping host binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection parameters
    pub mysql: ConnectionConfig,

    /// HTTP listen port (default: 8080)
    pub listen_port: u16,

    /// Maximum number of MySQL connections in the pool (default: 20)
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(env: &impl EnvSource) -> anyhow::Result<Self> {
        Ok(Self {
            mysql: ConnectionConfig::from_source(env),
            listen_port: env
                .var("SHOP_SHIPPING_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SHOP_SHIPPING_PORT must be a valid u16"))?,
            db_max_connections: env
                .var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ConnectionConfig::from_source(&env(&[]));
        assert_eq!(config.host, "mysql.data-space.svc.cluster.local");
        assert_eq!(config.port, "3306");
        assert_eq!(config.database, "cities");
        assert_eq!(config.username, "shipping");
        assert_eq!(config.password, "secret");
        assert!(config.uses_default_password());
        assert_eq!(config, ConnectionConfig::default());
    }

    #[test]
    fn test_overrides_are_taken_verbatim() {
        let config = ConnectionConfig::from_source(&env(&[
            ("MYSQL_HOST", " db.internal "),
            ("MYSQL_PORT", "not-a-port"),
            ("MYSQL_DATABASE", "ships&boats"),
            ("MYSQL_USER", "admin"),
            ("MYSQL_PASSWORD", "p@ss word"),
        ]));
        assert_eq!(config.host, " db.internal ");
        assert_eq!(config.port, "not-a-port");
        assert_eq!(config.database, "ships&boats");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "p@ss word");
        assert!(!config.uses_default_password());
    }

    #[test]
    fn test_url_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(
            config.url(),
            "jdbc:mysql://mysql.data-space.svc.cluster.local:3306/cities?useSSL=false&allowPublicKeyRetrieval=true&autoReconnect=true"
        );
    }

    #[test]
    fn test_url_host_and_port_override() {
        let config =
            ConnectionConfig::from_source(&env(&[("MYSQL_HOST", "db1"), ("MYSQL_PORT", "3307")]));
        assert_eq!(
            config.url(),
            "jdbc:mysql://db1:3307/cities?useSSL=false&allowPublicKeyRetrieval=true&autoReconnect=true"
        );
    }

    #[test]
    fn test_url_empty_database_keeps_empty_segment() {
        let config = ConnectionConfig::from_source(&env(&[("MYSQL_DATABASE", "")]));
        assert!(config.url().contains(":3306/?useSSL=false"));
    }

    #[test]
    fn test_url_always_has_fixed_query() {
        let config = ConnectionConfig::from_source(&env(&[
            ("MYSQL_HOST", ""),
            ("MYSQL_PORT", ""),
            ("MYSQL_DATABASE", "a?b=c"),
        ]));
        let url = config.url();
        let query = url.rsplit_once("?useSSL=").map(|(_, q)| q).unwrap();
        assert_eq!(query, "false&allowPublicKeyRetrieval=true&autoReconnect=true");
        assert_eq!(url.matches("useSSL=false").count(), 1);
        assert_eq!(url.matches("allowPublicKeyRetrieval=true").count(), 1);
        assert_eq!(url.matches("autoReconnect=true").count(), 1);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ConnectionConfig::from_source(&env(&[("MYSQL_PASSWORD", "hunter2")]));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));

        let app = AppConfig::from_source(&env(&[("MYSQL_PASSWORD", "hunter2")])).unwrap();
        assert!(!format!("{:?}", app).contains("hunter2"));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_source(&env(&[])).unwrap();
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.mysql, ConnectionConfig::default());
    }

    #[test]
    fn test_app_config_overrides() {
        let config = AppConfig::from_source(&env(&[
            ("SHOP_SHIPPING_PORT", "9090"),
            ("DB_MAX_CONNECTIONS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.listen_port, 9090);
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn test_app_config_rejects_invalid_numbers() {
        let err = AppConfig::from_source(&env(&[("SHOP_SHIPPING_PORT", "99999")])).unwrap_err();
        assert!(err.to_string().contains("SHOP_SHIPPING_PORT"));

        let err = AppConfig::from_source(&env(&[("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
