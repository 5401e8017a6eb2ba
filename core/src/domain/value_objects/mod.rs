//! Value objects exchanged across the API boundary.

pub mod auth_response;

pub use auth_response::{AuthResponse, LoginCredentials, RegisterData};
