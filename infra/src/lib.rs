//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `tk_core`:
//!
//! - **Database**: user repositories, in memory or on MySQL through SQLx
//! - **Session**: a file-backed [`SessionStore`](tk_core::SessionStore)
//! - **HTTP**: a reqwest-based [`AuthGateway`](tk_core::AuthGateway) and a
//!   JSON API client that attaches the stored bearer credential
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL user repository (default)

// Re-export core error types for convenience
pub use tk_core::errors::*;

/// Database module - user repositories and connection pooling
pub mod database;

/// HTTP module - session gateway and API client
pub mod http;

/// Session module - durable session storage
pub mod session;

pub use database::InMemoryUserRepository;
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlUserRepository};
pub use http::{ApiClient, HttpAuthGateway};
pub use session::FileSessionStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
