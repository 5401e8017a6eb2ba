//! In-memory user repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use tk_core::domain::entities::user::User;
use tk_core::errors::{AuthError, DomainError};
use tk_core::repositories::UserRepository;

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<String, User>,
    /// email -> id
    by_email: HashMap<String, String>,
}

/// User repository kept in process memory
///
/// Used by the server when no database URL is configured. Accounts are lost
/// on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<Accounts>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn count(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.accounts.read().await.by_id.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.by_email.contains_key(&user.email) {
            return Err(AuthError::EmailAlreadyInUse.into());
        }
        if accounts.by_id.contains_key(&user.id) {
            return Err(DomainError::Internal {
                message: format!("Duplicate user id {}", user.id),
            });
        }

        accounts.by_email.insert(user.email.clone(), user.id.clone());
        accounts.by_id.insert(user.id.clone(), user.clone());
        debug!(user_id = %user.id, "Stored user in memory");

        Ok(user)
    }
}
