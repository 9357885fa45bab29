//! # porter-auth
//!
//! Session handling for the Porter client.
//!
//! Persists the login result (bearer token + user profile) across runs, with
//! OS keychain token storage (`keyring`) and a private file fallback. Tracks
//! the sign-in → building-ready sequence as a [`SessionPhase`]. The login
//! request itself is issued by `porter-api`.

pub mod error;
pub mod phase;
pub mod session;
pub mod token_store;

pub use error::AuthError;
pub use phase::SessionPhase;
pub use session::{AuthSession, decode_expiry};
pub use token_store::{SessionStore, TokenSource};

/// Seconds before expiry at which a stored token is treated as stale.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Load the stored session, discarding it if the token is (nearly) expired.
///
/// # Errors
///
/// Returns `AuthError::TokenExpired` when a session exists but its JWT has
/// expired. The stale session is cleared first.
pub fn resolve_session(store: &SessionStore) -> Result<Option<AuthSession>, AuthError> {
    let Some(session) = store.load() else {
        return Ok(None);
    };
    if session.is_near_expiry(EXPIRY_BUFFER_SECS) {
        tracing::warn!(
            expires_at = ?session.expires_at(),
            "stored token expires within {EXPIRY_BUFFER_SECS}s; clearing session",
        );
        store.clear()?;
        return Err(AuthError::TokenExpired);
    }
    Ok(Some(session))
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the session file cannot be removed.
pub fn logout(store: &SessionStore) -> Result<(), AuthError> {
    store.clear()
}
