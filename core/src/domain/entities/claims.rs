//! Credential claims and the identity they are issued for.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The user identity a credential is issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Decoded credential payload
///
/// `id`, `name` and `email` are required; `exp` is optional on decode so that
/// credentials minted without an expiry still verify. Any other claims are
/// kept in `extra` and survive a decode/encode cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Absolute expiry, seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Claims this system does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Creates claims for an identity expiring at `exp`
    pub fn new(identity: &Identity, exp: i64) -> Self {
        Self {
            id: identity.id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            exp: Some(exp),
            extra: Map::new(),
        }
    }

    /// The identity these claims were issued for
    pub fn identity(&self) -> Identity {
        Identity::new(&self.id, &self.name, &self.email)
    }

    /// A credential is stale once its expiry lies strictly before `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        matches!(self.exp, Some(exp) if exp < now)
    }
}

/// Older accounts carry numeric ids; both forms decode to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for id, got {}",
            other
        ))),
    }
}
