//! Session state machine for the client application

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::entities::user::UserProfile;
use crate::domain::value_objects::{AuthResponse, LoginCredentials, RegisterData};
use crate::errors::ClientError;

use super::traits::{AuthGateway, SessionStore, StoredSession};

/// Where the client stands with the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Unauthenticated,
    /// A login, registration or restore is in flight
    Authenticating,
    Authenticated,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Unauthenticated => "unauthenticated",
            SessionStatus::Authenticating => "authenticating",
            SessionStatus::Authenticated => "authenticated",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    session: Option<StoredSession>,
}

/// Client session controller
///
/// Owns the current credential and cached profile. The state lock is never
/// held across a network or storage call, so overlapping operations run
/// independently and the last one to finish decides the final state.
pub struct SessionController<G, S>
where
    G: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    gateway: Arc<G>,
    store: Arc<S>,
    state: RwLock<SessionState>,
}

impl<G, S> SessionController<G, S>
where
    G: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Create an unauthenticated controller; call [`restore`](Self::restore)
    /// to pick up a stored session
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self {
            gateway,
            store,
            state: RwLock::new(SessionState {
                status: SessionStatus::Unauthenticated,
                session: None,
            }),
        }
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status().await == SessionStatus::Authenticated
    }

    /// Cached profile of the signed-in user
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|session| session.user.clone())
    }

    /// Current credential
    pub async fn token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// `Bearer <credential>` for protected requests
    pub async fn authorization_header(&self) -> Option<String> {
        self.token().await.map(|token| format!("Bearer {}", token))
    }

    /// Resume a stored session at application start
    ///
    /// A stored credential is exchanged for a fresh one. Any failure, whether
    /// reading the store or refreshing, discards the stored session.
    pub async fn restore(&self) -> SessionStatus {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read stored session, discarding it");
                self.discard().await;
                return SessionStatus::Unauthenticated;
            }
        };

        let Some(stored) = stored else {
            debug!("No stored session");
            self.set_state(SessionStatus::Unauthenticated, None).await;
            return SessionStatus::Unauthenticated;
        };

        self.state.write().await.status = SessionStatus::Authenticating;

        let refreshed = match self.gateway.refresh(&stored.token).await {
            Ok(response) => StoredSession::from(response),
            Err(e) => {
                info!(error = %e, "Stored session could not be refreshed");
                self.discard().await;
                return SessionStatus::Unauthenticated;
            }
        };

        if let Err(e) = self.store.save(&refreshed).await {
            warn!(error = %e, "Failed to persist refreshed session, discarding it");
            self.discard().await;
            return SessionStatus::Unauthenticated;
        }

        info!(user_id = %refreshed.user.id, "Session restored");
        self.set_state(SessionStatus::Authenticated, Some(refreshed))
            .await;
        SessionStatus::Authenticated
    }

    /// Sign in with email and password
    ///
    /// On failure the previous state is kept and the error is returned.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<UserProfile, ClientError> {
        let previous = self.begin_authenticating().await;
        let result = self.gateway.login(&credentials).await;
        self.complete(previous, result).await
    }

    /// Create an account and sign in as it
    ///
    /// On failure the previous state is kept and the error is returned.
    pub async fn register(&self, data: RegisterData) -> Result<UserProfile, ClientError> {
        let previous = self.begin_authenticating().await;
        let result = self.gateway.register(&data).await;
        self.complete(previous, result).await
    }

    /// Sign out
    ///
    /// The server is notified on a best-effort basis; the local session is
    /// discarded whatever it answers.
    pub async fn logout(&self) {
        let token = self.token().await;

        if let Err(e) = self.gateway.logout(token.as_deref()).await {
            warn!(error = %e, "Logout notification failed, clearing session anyway");
        }

        self.discard().await;
        info!("Logged out");
    }

    async fn begin_authenticating(&self) -> SessionStatus {
        let mut state = self.state.write().await;
        std::mem::replace(&mut state.status, SessionStatus::Authenticating)
    }

    async fn complete(
        &self,
        previous: SessionStatus,
        result: Result<AuthResponse, ClientError>,
    ) -> Result<UserProfile, ClientError> {
        let session = match result {
            Ok(response) => StoredSession::from(response),
            Err(e) => {
                debug!(error = %e, "Authentication failed");
                self.state.write().await.status = previous;
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&session).await {
            warn!(error = %e, "Failed to persist session");
            self.state.write().await.status = previous;
            return Err(e);
        }

        let user = session.user.clone();
        info!(user_id = %user.id, "Authenticated");
        self.set_state(SessionStatus::Authenticated, Some(session))
            .await;
        Ok(user)
    }

    async fn discard(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear stored session");
        }
        self.set_state(SessionStatus::Unauthenticated, None).await;
    }

    async fn set_state(&self, status: SessionStatus, session: Option<StoredSession>) {
        let mut state = self.state.write().await;
        state.status = status;
        state.session = session;
    }
}
