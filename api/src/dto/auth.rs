//! Request and response bodies for the `/api/auth` endpoints
//!
//! Request fields default to empty so that a missing field reaches the
//! service's required-field check instead of failing JSON parsing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tk_core::domain::entities::user::UserProfile;
use tk_core::domain::value_objects::{LoginCredentials, RegisterData};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(max = 255))]
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(request: LoginRequest) -> Self {
        LoginCredentials::new(request.email, request.password)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl From<RegisterRequest> for RegisterData {
    fn from(request: RegisterRequest) -> Self {
        RegisterData {
            name: request.name,
            email: request.email,
            password: request.password,
            password_confirmation: request.password_confirmation,
        }
    }
}

/// Body of `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.email, "");
        assert_eq!(request.password, "");

        let request: RegisterRequest =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert_eq!(request.password, "");
        assert_eq!(request.password_confirmation, None);
    }

    #[test]
    fn test_overlong_email_fails_validation() {
        let request = LoginRequest {
            email: format!("{}@example.com", "a".repeat(300)),
            password: "pw".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_converts_confirmation() {
        let data = RegisterData::from(RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            password_confirmation: Some("other".to_string()),
        });
        assert_eq!(data.password_confirmation.as_deref(), Some("other"));
    }
}
