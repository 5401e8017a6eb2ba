//! # Ticklist Core
//!
//! Core domain layer for the Ticklist backend and its session client.
//! This crate contains the credential model, the token service that issues and
//! verifies credentials, the authentication use cases, the client-side session
//! controller, repository interfaces and the error types shared by all of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{MockUserRepository, UserRepository};
pub use services::*;
