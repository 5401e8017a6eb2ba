//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Secret used when nothing else is configured. Never acceptable outside development.
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// Default credential lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret for signing and verifying credentials
    pub secret: String,

    /// Credential lifetime in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set credential lifetime in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_seconds = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

fn default_ttl_seconds() -> i64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.ttl_seconds, 3600);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_ttl_minutes(30);

        assert_eq!(config.ttl_seconds, 1800);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_auth_config_partial_deserialize() {
        let config: AuthConfig =
            serde_json::from_str(r#"{"jwt": {"secret": "abc"}}"#).unwrap();

        assert_eq!(config.jwt.secret, "abc");
        assert_eq!(config.jwt.ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
        assert_eq!(config.password.bcrypt_cost, 10);
    }
}
