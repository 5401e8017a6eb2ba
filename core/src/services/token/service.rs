//! Credential issuance and verification

use std::sync::Arc;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::{debug, error};

use crate::domain::entities::claims::{Claims, Identity};
use crate::errors::{DomainError, TokenError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// base64url for the payload segment; tolerates padded input from other issuers
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Service for issuing and verifying HS256 credentials
///
/// Holds only immutable key material and a clock handle, so one instance is
/// shared behind an `Arc` by every worker.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    header: Header,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .finish()
    }
}

impl TokenService {
    /// Creates a token service using the system clock
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error if the secret is empty
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service with an explicit clock
    pub fn with_clock(
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT secret must not be empty".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            header: Header::new(Algorithm::HS256),
            clock,
        })
    }

    /// Default credential lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.config.ttl_seconds
    }

    /// Issues a credential for `identity` valid for `ttl_seconds`
    ///
    /// Sets `exp = now + ttl_seconds`, then signs
    /// `base64url(header).base64url(claims)` with the configured secret.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The three-segment credential
    /// * `Err(TokenError::TokenGenerationFailed)` - Encoding failed (not expected for HMAC keys)
    pub fn issue(&self, identity: &Identity, ttl_seconds: i64) -> Result<String, TokenError> {
        let exp = self.clock.now().saturating_add(ttl_seconds);
        let claims = Claims::new(identity, exp);
        self.encode(&claims)
    }

    /// Issues a credential with the configured default lifetime
    pub fn issue_default(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue(identity, self.config.ttl_seconds)
    }

    /// Encodes and signs arbitrary claims
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to encode credential");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies a credential and returns its claims
    ///
    /// Checks run in order: shape, signature, payload decoding, expiry.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims, including `exp`
    /// * `Err(TokenError::MalformedToken)` - Not three non-empty segments, or undecodable payload
    /// * `Err(TokenError::InvalidSignature)` - Signature does not match
    /// * `Err(TokenError::TokenExpired)` - `exp` lies in the past
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (signing_input, payload, signature) = split_token(token)?;

        let expected = jsonwebtoken::crypto::sign(
            signing_input.as_bytes(),
            &self.encoding_key,
            Algorithm::HS256,
        )
        .map_err(|e| {
            error!(error = %e, "Failed to compute credential signature");
            TokenError::InvalidSignature
        })?;

        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            debug!("Credential rejected: signature mismatch");
            return Err(TokenError::InvalidSignature);
        }

        let bytes = PAYLOAD_ENGINE.decode(payload).map_err(|_| {
            debug!("Credential rejected: payload is not base64url");
            TokenError::MalformedToken
        })?;
        let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| {
            debug!(error = %e, "Credential rejected: payload is not valid claims");
            TokenError::MalformedToken
        })?;

        if claims.is_expired_at(self.clock.now()) {
            debug!(user_id = %claims.id, "Credential rejected: expired");
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }
}

/// Splits `header.payload.signature`, borrowing from the input.
///
/// Returns the signing input (`header.payload`), the payload and the signature.
fn split_token(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let (signing_input, signature) = token.rsplit_once('.').ok_or(TokenError::MalformedToken)?;
    let (header, payload) = signing_input
        .split_once('.')
        .ok_or(TokenError::MalformedToken)?;

    if header.is_empty() || payload.is_empty() || signature.is_empty() || payload.contains('.') {
        return Err(TokenError::MalformedToken);
    }

    Ok((signing_input, payload, signature))
}
