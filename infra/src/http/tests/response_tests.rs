//! Unit tests for the shared response policy

use reqwest::StatusCode;
use tk_core::errors::ClientError;

use crate::http::{error_from_status, join_url};

#[test]
fn test_join_url_handles_slashes() {
    assert_eq!(
        join_url("http://localhost:8080/api", "/auth/login"),
        "http://localhost:8080/api/auth/login"
    );
    assert_eq!(
        join_url("http://localhost:8080/api/", "/auth/login"),
        "http://localhost:8080/api/auth/login"
    );
    assert_eq!(
        join_url("http://localhost:8080/api", "todos"),
        "http://localhost:8080/api/todos"
    );
}

#[test]
fn test_unauthorized_carries_server_message() {
    let body = br#"{"error":"UNAUTHORIZED","message":"Invalid credentials"}"#;

    assert_eq!(
        error_from_status(StatusCode::UNAUTHORIZED, body),
        ClientError::Unauthorized("Invalid credentials".to_string())
    );
}

#[test]
fn test_other_status_carries_server_message() {
    let body = br#"{"message":"Email already in use"}"#;

    assert_eq!(
        error_from_status(StatusCode::CONFLICT, body),
        ClientError::Api {
            status: 409,
            message: "Email already in use".to_string(),
        }
    );
}

#[test]
fn test_missing_message_falls_back_to_status() {
    let bodies: [&[u8]; 4] = [b"", b"<html>oops</html>", br#"{"error":"X"}"#, br#"{"message":""}"#];
    for body in bodies {
        assert_eq!(
            error_from_status(StatusCode::INTERNAL_SERVER_ERROR, body),
            ClientError::Api {
                status: 500,
                message: "API Error: 500".to_string(),
            }
        );
    }

    assert_eq!(
        error_from_status(StatusCode::UNAUTHORIZED, b""),
        ClientError::Unauthorized("API Error: 401".to_string())
    );
}
