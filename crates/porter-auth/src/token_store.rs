//! Persisted session: bearer token + user profile.
//!
//! The token goes to the OS keychain when available and falls back to the
//! session file. The profile always lives in the session file
//! (`~/.porter/session.json`, mode 0600). Token resolution order is
//! keychain → `PORTER_AUTH__TOKEN` → file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use porter_config::AuthConfig;
use porter_core::entities::AuthUser;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::session::AuthSession;

const KEYRING_USER: &str = "bearer-token";
const TOKEN_ENV: &str = "PORTER_AUTH__TOKEN";

/// Where the active token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

/// On-disk shape of the session file. `token` is omitted when the keychain
/// holds it.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    user: Option<AuthUser>,
    stored_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    keyring_service: Option<String>,
}

impl SessionStore {
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no session path can be resolved.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let path = config.session_path().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found; cannot store session".into())
        })?;
        Ok(Self {
            path,
            keyring_service: (!config.file_only).then(|| config.keyring_service.clone()),
        })
    }

    /// Store that never touches the OS keychain.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keyring_service: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session after login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the session file cannot be written.
    pub fn store(&self, session: &AuthSession) -> Result<(), AuthError> {
        let token_in_keyring = self.keyring_store(&session.token);
        let file = SessionFile {
            token: (!token_in_keyring).then(|| session.token.clone()),
            user: session.user.clone(),
            stored_at: session.stored_at,
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;
        write_private(&self.path, &json)
    }

    /// Load the persisted session, if any token can be resolved.
    #[must_use]
    pub fn load(&self) -> Option<AuthSession> {
        let file = self.load_file();
        let (token, _) = self.resolve_token(file.as_ref())?;
        Some(AuthSession {
            token,
            user: file.as_ref().and_then(|f| f.user.clone()),
            stored_at: file.map_or_else(Utc::now, |f| f.stored_at),
        })
    }

    /// Which tier the current token comes from (for status display).
    #[must_use]
    pub fn token_source(&self) -> Option<TokenSource> {
        let file = self.load_file();
        self.resolve_token(file.as_ref()).map(|(_, source)| source)
    }

    /// Remove the session from keychain and disk.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the session file cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry() {
            let _ = entry.delete_credential();
        }
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }

    fn resolve_token(&self, file: Option<&SessionFile>) -> Option<(String, TokenSource)> {
        // 1. Keyring
        if let Some(entry) = self.keyring_entry()
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some((token, TokenSource::Keyring));
        }

        // 2. Environment variable
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some((token, TokenSource::Env));
        }

        // 3. File fallback
        file.and_then(|f| f.token.clone())
            .filter(|token| !token.trim().is_empty())
            .map(|token| (token, TokenSource::File))
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    /// Returns `true` when the keychain accepted the token.
    fn keyring_store(&self, token: &str) -> bool {
        let Some(entry) = self.keyring_entry() else {
            return false;
        };
        match entry.set_password(token) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                false
            }
        }
    }

    fn load_file(&self) -> Option<SessionFile> {
        let raw = fs::read_to_string(&self.path).ok()?;
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(file) => Some(file),
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "ignoring unreadable session file");
                None
            }
        }
    }
}

fn write_private(path: &Path, contents: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, contents)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: "17".into(),
            email: "priya@maple-court.example".into(),
            name: Some("Priya Shah".into()),
            role: Some("director".into()),
            building_id: Some(1),
        }
    }

    #[test]
    fn file_store_load_clear_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::file_only(tmp.path().join("nested").join("session.json"));

        let session = AuthSession::new("tok_abc123", Some(user()));
        store.store(&session).expect("store");

        let loaded = store.load().expect("session should load");
        if std::env::var(TOKEN_ENV).is_err() {
            assert_eq!(loaded.token, "tok_abc123");
            assert_eq!(store.token_source(), Some(TokenSource::File));
        }
        assert_eq!(loaded.user, Some(user()));
        assert_eq!(loaded.building_id(), Some(1));

        store.clear().expect("clear");
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::file_only(tmp.path().join("session.json"));
        store.store(&AuthSession::new("tok", None)).expect("store");

        let mode = fs::metadata(store.path())
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600, "session file should be 0600");
    }

    #[test]
    fn whitespace_file_is_no_session() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        fs::write(&path, "   \n  ").expect("write");
        let store = SessionStore::file_only(&path);
        assert!(store.load_file().is_none());
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").expect("write");
        let store = SessionStore::file_only(&path);
        assert!(store.load_file().is_none());
    }

    #[test]
    fn clear_without_file_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::file_only(tmp.path().join("missing.json"));
        assert!(store.clear().is_ok());
    }
}
