//! Conversion of domain errors into HTTP responses
//!
//! Every error body uses the shared [`ErrorResponse`] shape.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use tk_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use tk_shared::{error_codes, ErrorResponse};

/// Error returned by handlers and the authentication middleware
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    /// Status, error code and client-facing message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match &self.0 {
            DomainError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                error_codes::VALIDATION_ERROR,
                err.to_string(),
            ),
            DomainError::Auth(err) => match err {
                AuthError::EmailAlreadyInUse => {
                    (StatusCode::CONFLICT, error_codes::CONFLICT, err.to_string())
                }
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::INVALID_CREDENTIALS,
                    err.to_string(),
                ),
                AuthError::SessionInvalid => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::TOKEN_INVALID,
                    err.to_string(),
                ),
                AuthError::MissingAuthorization
                | AuthError::InvalidAuthorizationFormat
                | AuthError::UserNotFound => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::UNAUTHORIZED,
                    format!("Unauthorized: {}", err),
                ),
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred".to_string(),
            ),
            DomainError::Token(err) => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHORIZED,
                format!("Unauthorized: {}", err),
            ),
            DomainError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::DATABASE_ERROR,
                "An internal error occurred".to_string(),
            ),
            DomainError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(reason = %self.0, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse::new(code, message))
    }
}

/// Error handler for malformed JSON request bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(ValidationError::InvalidBody {
        message: err.to_string(),
    })
    .into()
}

/// Fallback for paths with no route
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, "Not Found"))
}

/// Fallback for a known path called with the wrong method
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Method not allowed",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn render(err: impl Into<ApiError>) -> (StatusCode, serde_json::Value) {
        let response = err.into().error_response();
        let status = response.status();
        let body = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_errors_are_bad_request() {
        let (status, body) = render(ValidationError::RequiredFields {
            message: "Email and password are required".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Email and password are required");
        assert!(body["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn test_auth_error_statuses() {
        let (status, body) = render(AuthError::EmailAlreadyInUse).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Email already in use");

        let (status, body) = render(AuthError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, body) = render(AuthError::SessionInvalid).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token is invalid or expired");

        let (_, body) = render(AuthError::MissingAuthorization).await;
        assert_eq!(body["message"], "Unauthorized: No Authorization header");
    }

    #[actix_web::test]
    async fn test_token_errors_carry_reason() {
        let (status, expired) = render(TokenError::TokenExpired).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired["message"], "Unauthorized: Token has expired");

        let (status, bad_signature) = render(TokenError::InvalidSignature).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(bad_signature["message"], "Unauthorized: Invalid signature");

        let (status, malformed) = render(TokenError::MalformedToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(malformed["message"], "Unauthorized: Invalid token format");

        // Only the message tells the three apart
        assert_eq!(expired["error"], "UNAUTHORIZED");
        assert_eq!(bad_signature["error"], expired["error"]);
        assert_eq!(malformed["error"], expired["error"]);
    }

    #[actix_web::test]
    async fn test_internal_errors_do_not_leak_details() {
        let (status, body) = render(DomainError::Database("password=hunter2".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
    }
}
