//! Authentication service module
//!
//! Server-side account use cases built on the token service:
//! - Registration with bcrypt password hashing
//! - Email/password login
//! - Credential refresh
//! - Stateless logout acknowledgement

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, LOGOUT_MESSAGE};
