//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Credential signing and password hashing
//! - `client` - Session client (API base URL, session file)
//! - `database` - Optional MySQL user store
//! - `server` - HTTP server and CORS
//!
//! [`AppConfig::load`] layers built-in defaults, an optional `ticklist.toml`,
//! `TICKLIST__*` environment variables and the conventional `JWT_SECRET`,
//! `DATABASE_URL`, `SERVER_HOST` and `SERVER_PORT` variables, in that order.

pub mod auth;
pub mod client;
pub mod database;
pub mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use server::{CorsConfig, ServerConfig};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ticklist.toml";

/// Prefix for structured environment overrides, e.g. `TICKLIST__AUTH__JWT__TTL_SECONDS`
pub const ENV_PREFIX: &str = "TICKLIST";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from `ticklist.toml` (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file (if present) and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the services cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("auth.jwt.secret must not be empty".to_string()));
        }
        if self.auth.jwt.ttl_seconds <= 0 {
            return Err(ConfigError::Invalid(
                "auth.jwt.ttl_seconds must be positive".to_string(),
            ));
        }
        if let Some(origin) = self.cors.invalid_origin() {
            return Err(ConfigError::Invalid(format!(
                "cors.allowed_origins contains an invalid origin: {:?}",
                origin
            )));
        }
        if !(4..=31).contains(&self.auth.password.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "auth.password.bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }
        Ok(())
    }
}
