use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: run `porter auth login`")]
    NotAuthenticated,

    #[error("session expired: run `porter auth login` to sign in again")]
    TokenExpired,

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("session store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}
