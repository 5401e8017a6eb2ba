//! Authentication request and response value objects.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserProfile;

/// Body returned by login, register and refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Profile of the authenticated user
    pub user: UserProfile,

    /// Signed credential to send as `Authorization: Bearer <token>`
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: UserProfile, token: String) -> Self {
        Self { user, token }
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl RegisterData {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            password_confirmation: Some(password.clone()),
            password,
        }
    }
}
