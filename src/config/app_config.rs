use serde::Deserialize;

use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection and PostgreSQL pool sizing
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

/// Console token signing
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Optional JSON fixture applied at startup
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub path: Option<String>,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_idle_timeout_secs() -> u64 {
    600
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_expiration_hours() -> u64 {
    24
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            expiration_hours: default_expiration_hours(),
        }
    }
}

impl StorageConfig {
    pub fn storage_type(&self) -> Result<StorageType, config::ConfigError> {
        StorageType::from_str(&self.backend).ok_or_else(|| {
            config::ConfigError::Message(format!("Unknown storage backend: {}", self.backend))
        })
    }

    /// Pool settings for the PostgreSQL backend; requires `database_url`
    pub fn postgres(&self) -> Result<PostgresConfig, config::ConfigError> {
        let url = self.database_url.clone().ok_or_else(|| {
            config::ConfigError::Message(
                "storage.database_url is required for the postgres backend".to_string(),
            )
        })?;

        Ok(PostgresConfig::new(url)
            .with_max_connections(self.max_connections)
            .with_min_connections(self.min_connections)
            .with_connect_timeout(self.connect_timeout_secs)
            .with_idle_timeout(self.idle_timeout_secs))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.storage_type().unwrap(), StorageType::InMemory);
        assert!(config.metrics.enabled);
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"storage": {"backend": "postgres", "database_url": "postgres://db/app"},
                "logging": {"level": "debug", "format": "json"}}"#,
        )
        .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.max_connections, 10);
        let postgres = config.storage.postgres().unwrap();
        assert_eq!(postgres.url, "postgres://db/app");
        assert_eq!(config.auth.expiration_hours, 24);
    }

    #[test]
    fn test_postgres_requires_url() {
        let storage = StorageConfig {
            backend: "postgres".to_string(),
            ..Default::default()
        };

        assert!(storage.postgres().is_err());
    }

    #[test]
    fn test_unknown_backend() {
        let storage = StorageConfig {
            backend: "cassandra".to_string(),
            ..Default::default()
        };

        assert!(storage.storage_type().is_err());
    }

    #[test]
    fn test_auth_debug_redacts_secret() {
        let auth = AuthConfig::default();
        assert!(!format!("{:?}", auth).contains(&auth.jwt_secret));
    }
}
