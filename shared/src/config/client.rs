//! Client-side session configuration

use serde::{Deserialize, Serialize};

/// Configuration for the session client talking to the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix
    pub api_base_url: String,

    /// File where the credential and profile are persisted between runs
    pub session_file: String,

    /// Optional request timeout in seconds; the transport default applies when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from("http://127.0.0.1:8080/api"),
            session_file: String::from(".ticklist/session.json"),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API base URL
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }
}
