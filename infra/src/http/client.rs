//! Generic JSON client for protected API calls

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use tk_core::errors::ClientError;
use tk_core::services::session::SessionStore;
use tk_shared::config::ClientConfig;

use crate::InfrastructureError;

use super::{build_client, handle_response, join_url, network_error};

/// JSON API client that sends the stored credential as a bearer token
///
/// The credential is read from the session store on every request, so a
/// login, refresh or logout performed elsewhere is picked up immediately.
/// A 401 answer is returned as [`ClientError::Unauthorized`]; the client never
/// retries or re-authenticates on its own.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, InfrastructureError> {
        Ok(Self {
            http: build_client(config)?,
            base_url: config.api_base_url.clone(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, endpoint).await?).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, endpoint).await?.json(body))
            .await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, endpoint).await?.json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::DELETE, endpoint).await?)
            .await
    }

    async fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, ClientError> {
        let url = join_url(&self.base_url, endpoint);
        debug!(%method, %url, "API request");

        let builder = self.http.request(method, url);
        Ok(match self.store.token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await.map_err(network_error)?;
        handle_response(response).await
    }
}
