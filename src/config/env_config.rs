use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./users.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppEnvConfig {
    /// Bind host (SERVER_HOST)
    pub host: String,
    /// Bind port (SERVER_PORT)
    pub port: u16,
    /// SQLite URL, or `memory` for the in-process store (DATABASE_URL)
    pub database_url: String,
    /// Pool size (DATABASE_MAX_CONNECTIONS)
    pub database_max_connections: u32,
    /// The single origin allowed cross-origin access (CORS_ALLOW_ORIGIN)
    pub cors_allow_origin: String,
}

/// Where user records live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite(String),
}

impl AppEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SERVER_PORT is not a valid port: {}", raw))?,
            None => DEFAULT_PORT,
        };
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let cors_allow_origin =
            lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(AppEnvConfig {
            host,
            port,
            database_url,
            database_max_connections,
            cors_allow_origin,
        })
    }

    /// Storage backend named by `database_url`
    pub fn storage_backend(&self) -> StorageBackend {
        if self.database_url.eq_ignore_ascii_case("memory") {
            StorageBackend::Memory
        } else {
            StorageBackend::Sqlite(self.database_url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppEnvConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cors_allow_origin, "http://localhost:5173");
        assert_eq!(
            config.storage_backend(),
            StorageBackend::Sqlite(DEFAULT_DATABASE_URL.to_string())
        );
    }

    #[test]
    fn test_memory_backend() {
        let config = AppEnvConfig::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "memory".to_string())
        })
        .unwrap();

        assert_eq!(config.storage_backend(), StorageBackend::Memory);
    }

    #[test]
    fn test_bad_port() {
        let result = AppEnvConfig::from_lookup(|key| {
            (key == "SERVER_PORT").then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }
}
