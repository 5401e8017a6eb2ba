//! Ports used by the session controller

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserProfile;
use crate::domain::value_objects::{AuthResponse, LoginCredentials, RegisterData};
use crate::errors::ClientError;

/// What survives an application restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserProfile,
}

impl From<AuthResponse> for StoredSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

/// Durable storage for the current session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, `None` when nothing is stored
    async fn load(&self) -> Result<Option<StoredSession>, ClientError>;

    /// Replace the stored session
    async fn save(&self, session: &StoredSession) -> Result<(), ClientError>;

    /// Remove the stored session; clearing an empty store succeeds
    async fn clear(&self) -> Result<(), ClientError>;

    /// Credential of the stored session, if any
    async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.load().await?.map(|session| session.token))
    }
}

/// Remote authentication endpoints
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ClientError>;

    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ClientError>;

    /// Exchange `token` for a fresh credential
    async fn refresh(&self, token: &str) -> Result<AuthResponse, ClientError>;

    /// Notify the server; `token` is sent as the bearer credential when present
    async fn logout(&self, token: Option<&str>) -> Result<(), ClientError>;
}
