//! Configuration management for the Strain Review Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SRP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use uuid::Uuid;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Identity used for writes until real sign-in exists
    pub identity: IdentityConfig,

    /// Listing limits
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    /// User every request acts as
    pub placeholder_user_id: Uuid,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SRP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default(
                "identity.placeholder_user_id",
                "00000000-0000-0000-0000-000000000001",
            )?
            .set_default("catalog.default_page_size", 20)?
            .set_default("catalog.max_page_size", 100)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SRP_ prefix)
            .add_source(
                Environment::with_prefix("SRP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: Config = config::Config::builder()
            .set_default("environment", "test")
            .unwrap()
            .set_default("server.port", 8080)
            .unwrap()
            .set_default("server.host", "127.0.0.1")
            .unwrap()
            .set_default("database.url", "postgres://localhost/test")
            .unwrap()
            .set_default("database.max_connections", 5)
            .unwrap()
            .set_default("database.min_connections", 1)
            .unwrap()
            .set_default(
                "identity.placeholder_user_id",
                "00000000-0000-0000-0000-000000000001",
            )
            .unwrap()
            .set_default("catalog.default_page_size", 20)
            .unwrap()
            .set_default("catalog.max_page_size", 100)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.catalog.max_page_size, 100);
        assert_eq!(
            config.identity.placeholder_user_id,
            Uuid::from_u128(1)
        );
        assert!(!config.is_development());
    }
}
