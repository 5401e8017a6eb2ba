//! reqwest implementation of the AuthGateway port

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use tk_core::domain::value_objects::{AuthResponse, LoginCredentials, RegisterData};
use tk_core::errors::ClientError;
use tk_core::services::session::AuthGateway;
use tk_shared::config::ClientConfig;

use crate::InfrastructureError;

use super::{build_client, handle_response, join_url, network_error};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const REFRESH_PATH: &str = "/auth/refresh";
const LOGOUT_PATH: &str = "/auth/logout";

/// Talks to the `/auth` endpoints of the API
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// Gateway for the API rooted at `base_url` (for example `http://host/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, InfrastructureError> {
        Ok(Self {
            http: build_client(config)?,
            base_url: config.api_base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ClientError> {
        debug!("Sending login request");
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(network_error)?;
        handle_response(response).await
    }

    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ClientError> {
        debug!("Sending registration request");
        let response = self
            .http
            .post(self.url(REGISTER_PATH))
            .json(data)
            .send()
            .await
            .map_err(network_error)?;
        handle_response(response).await
    }

    async fn refresh(&self, token: &str) -> Result<AuthResponse, ClientError> {
        debug!("Sending refresh request");
        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;
        handle_response(response).await
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ClientError> {
        let mut request = self.http.post(self.url(LOGOUT_PATH)).json(&json!({}));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(network_error)?;
        let _: serde_json::Value = handle_response(response).await?;
        Ok(())
    }
}
