//! Shared configuration and common types for the Ticklist server and client
//!
//! This crate provides functionality used across all workspace crates:
//! - Configuration types and layered loading
//! - The JSON error body returned by every API endpoint
//! - Common error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ClientConfig, ConfigError, CorsConfig, DatabaseConfig, JwtConfig,
    PasswordConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
