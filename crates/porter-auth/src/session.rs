use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};
use porter_core::entities::AuthUser;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The persisted result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token attached to every request.
    pub token: String,
    /// Profile returned by the login endpoint. Absent when the token came
    /// from the environment.
    pub user: Option<AuthUser>,
    pub stored_at: DateTime<Utc>,
}

impl AuthSession {
    #[must_use]
    pub fn new(token: impl Into<String>, user: Option<AuthUser>) -> Self {
        Self {
            token: token.into(),
            user,
            stored_at: Utc::now(),
        }
    }

    /// Building the signed-in user belongs to, if the profile names one.
    #[must_use]
    pub fn building_id(&self) -> Option<u64> {
        self.user.as_ref().and_then(|user| user.building_id)
    }

    /// Expiry decoded from the token, when it is a JWT.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        decode_expiry(&self.token).ok()
    }

    /// Whether the token expires within `buffer_secs`. Opaque tokens never
    /// report near-expiry; the backend's 401/403 is authoritative for them.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        self.expires_at()
            .is_some_and(|exp| exp <= Utc::now() + TimeDelta::seconds(buffer_secs))
    }
}

/// Decode JWT `exp` claim without signature verification.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}
