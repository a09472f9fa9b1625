//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Where accounts are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue("STORAGE_BACKEND")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend
    pub storage_backend: StorageBackend,

    /// Database connection URL, required for the postgres backend
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    pub host: String,
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .parse::<StorageBackend>()?;

        let database_url = lookup("DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            host,
            port,
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/accounts")]).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_max_connections, 10);
        assert!(!config.is_production());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("DATABASE_URL")));
    }

    #[test]
    fn test_memory_backend_needs_no_database_url() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "redis")]).unwrap_err(),
            ConfigError::InvalidValue("STORAGE_BACKEND")
        ));
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "memory"), ("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidValue("PORT")
        ));
    }
}
