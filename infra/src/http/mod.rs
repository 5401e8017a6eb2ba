//! HTTP adapters for the session client
//!
//! Both clients share one response policy: a success status decodes the JSON
//! body, anything else becomes a [`ClientError`] carrying the server's
//! `message` field, or `API Error: <status>` when the body has none.

mod client;
mod gateway;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use gateway::HttpAuthGateway;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tk_core::errors::ClientError;
use tk_shared::config::ClientConfig;

use crate::InfrastructureError;

/// Build the reqwest client described by the configuration
pub(crate) fn build_client(config: &ClientConfig) -> Result<reqwest::Client, InfrastructureError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Join a base URL and an endpoint path starting with `/`
pub(crate) fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Error for a non-success status and its raw body
pub(crate) fn error_from_status(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));

    if status == StatusCode::UNAUTHORIZED {
        ClientError::Unauthorized(message)
    } else {
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

pub(crate) fn network_error(err: reqwest::Error) -> ClientError {
    ClientError::Network(err.to_string())
}

/// Apply the shared response policy
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(network_error)?;

    if !status.is_success() {
        return Err(error_from_status(status, &body));
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
