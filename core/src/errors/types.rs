//! Error type definitions for credentials, authentication, validation and the
//! session client.

use thiserror::Error;

/// Credential verification and issuance failures
///
/// The three verification variants are distinct internally; the HTTP layer
/// reports all of them as one authentication failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not three non-empty segments, or an undecodable payload
    #[error("Invalid token format")]
    MalformedToken,

    /// Signature does not match the header and payload
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature is valid but `exp` lies in the past
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No Authorization header")]
    MissingAuthorization,

    #[error("Invalid Authorization format")]
    InvalidAuthorizationFormat,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("User not found")]
    UserNotFound,

    /// Refresh failed for any reason
    #[error("Token is invalid or expired")]
    SessionInvalid,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    RequiredFields { message: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

/// Failures seen by the session client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered 401
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-success status, with the server's message
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Session store error: {0}")]
    Store(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
