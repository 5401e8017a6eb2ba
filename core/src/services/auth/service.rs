//! Main authentication service implementation

use std::sync::Arc;

use tokio::task;
use tracing::{debug, error, info, warn};

use crate::domain::entities::claims::Claims;
use crate::domain::entities::user::{User, UserProfile};
use crate::domain::value_objects::{AuthResponse, LoginCredentials, RegisterData};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Acknowledgement returned by [`AuthService::logout`]
pub const LOGOUT_MESSAGE: &str = "Successfully logged out";

/// Authentication service for registration, login and credential refresh
///
/// `U` may be unsized so the HTTP layer can pick a repository at runtime and
/// hold `AuthService<dyn UserRepository>`.
pub struct AuthService<U>
where
    U: UserRepository + ?Sized,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Token service for issuing and verifying credentials
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository + ?Sized,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for credential issuance and verification
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new account and sign it in
    ///
    /// This method:
    /// 1. Requires name, email and password to be non-empty
    /// 2. Checks the password confirmation when one is supplied
    /// 3. Rejects an email that is already registered
    /// 4. Stores the account with a bcrypt password hash
    /// 5. Issues a credential for the new account
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Profile of the new account and its credential
    /// * `Err(DomainError::Validation)` - Missing fields, bad email or mismatched confirmation
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyInUse))` - Email taken
    pub async fn register(&self, data: RegisterData) -> DomainResult<AuthResponse> {
        if data.name.is_empty() || data.email.is_empty() || data.password.is_empty() {
            return Err(ValidationError::RequiredFields {
                message: "Name, email and password are required".to_string(),
            }
            .into());
        }

        if let Some(confirmation) = &data.password_confirmation {
            if confirmation != &data.password {
                return Err(ValidationError::PasswordMismatch.into());
            }
        }

        if !is_plausible_email(&data.email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        if self
            .user_repository
            .find_by_email(&data.email)
            .await?
            .is_some()
        {
            debug!("Registration rejected: email already in use");
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        let password_hash = hash_password(data.password, self.config.bcrypt_cost).await?;

        let user = self
            .user_repository
            .create(User::new(data.name, data.email, password_hash))
            .await?;

        let token = self.token_service.issue_default(&user.identity())?;

        info!(user_id = %user.id, "User registered");

        Ok(AuthResponse::new(user.profile(), token))
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Profile and a fresh credential
    /// * `Err(DomainError::Validation)` - Email or password missing
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - No match
    pub async fn login(&self, credentials: LoginCredentials) -> DomainResult<AuthResponse> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(ValidationError::RequiredFields {
                message: "Email and password are required".to_string(),
            }
            .into());
        }

        let user = self
            .user_repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                debug!("Login rejected: unknown email");
                DomainError::Auth(AuthError::InvalidCredentials)
            })?;

        let matches = verify_password(credentials.password, &user).await;

        if !matches {
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue_default(&user.identity())?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse::new(user.profile(), token))
    }

    /// Exchange a valid credential for a fresh one
    ///
    /// The account is reloaded so the new credential reflects its current
    /// name and email. Every failure, including a deleted account or a
    /// storage error, is reported as [`AuthError::SessionInvalid`].
    pub async fn refresh(&self, token: &str) -> DomainResult<AuthResponse> {
        let claims = self.token_service.verify(token).map_err(|e| {
            debug!(reason = %e, "Refresh rejected");
            AuthError::SessionInvalid
        })?;

        let user = match self.user_repository.find_by_id(&claims.id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = %claims.id, "Refresh rejected: user no longer exists");
                return Err(AuthError::SessionInvalid.into());
            }
            Err(e) => {
                warn!(user_id = %claims.id, error = %e, "Refresh failed to load user");
                return Err(AuthError::SessionInvalid.into());
            }
        };

        let token = self
            .token_service
            .issue_default(&user.identity())
            .map_err(|_| AuthError::SessionInvalid)?;

        info!(user_id = %user.id, "Credential refreshed");

        Ok(AuthResponse::new(user.profile(), token))
    }

    /// Stateless logout
    ///
    /// Issued credentials stay valid until they expire; the client discards
    /// its copy.
    pub fn logout(&self) -> &'static str {
        LOGOUT_MESSAGE
    }

    /// Resolve the profile of an already verified caller
    pub async fn current_user(&self, claims: &Claims) -> DomainResult<UserProfile> {
        self.user_repository
            .find_by_id(&claims.id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}

/// Hashes on the blocking thread pool
async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    let failed = || DomainError::Internal {
        message: "Failed to create user".to_string(),
    };

    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            error!(error = %e, "Password hashing task failed");
            failed()
        })?
        .map_err(|e| {
            error!(error = %e, "Failed to hash password");
            failed()
        })
}

/// An unreadable stored hash never matches
async fn verify_password(password: String, user: &User) -> bool {
    let hash = user.password_hash.clone();

    match task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
            false
        }
        Err(e) => {
            error!(user_id = %user.id, error = %e, "Password verification task failed");
            false
        }
    }
}

/// Minimal shape check: one `@` with something on both sides
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod email_tests {
    use super::is_plausible_email;

    #[test]
    fn test_plausible_email() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(is_plausible_email("a@b"));
        assert!(!is_plausible_email("ada"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada@"));
        assert!(!is_plausible_email("a@b@c"));
    }
}
