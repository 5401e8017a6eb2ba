//! Token service module for credential management
//!
//! This module handles the credential lifecycle on the server side:
//! - HS256 credential issuance for an identity and TTL
//! - Verification (shape, signature, payload, expiry)
//! - An injectable clock so expiry can be tested without sleeping

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;
