//! API error types.

use thiserror::Error;

/// Errors returned by [`crate::ApiClient`] calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: DNS, connect, timeout, TLS.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend reported a failure. `status` is `None` when the failure
    /// came as `success: false` inside a 2xx envelope.
    #[error("API error ({}): {message}", status_label(*.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// 401 on any authenticated request.
    #[error("unauthorized")]
    Unauthorized,

    /// 403. On the building-detail endpoint this means the session expired.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// 401 from the login endpoint itself.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("parse error: {0}")]
    Parse(String),
}

fn status_label(status: Option<u16>) -> String {
    status.map_or_else(|| "envelope".to_string(), |s| s.to_string())
}

impl ApiError {
    /// Human-readable message for an error slot or a CLI line: the server's
    /// own message when it sent one, a fixed default otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Check your connection.".into(),
            Self::Api { message, status } => {
                if message.trim().is_empty() {
                    status.map_or_else(
                        || "The server rejected the request.".into(),
                        |status| format!("Request failed with status {status}."),
                    )
                } else {
                    message.clone()
                }
            }
            Self::Unauthorized => "Your session has ended. Please sign in again.".into(),
            Self::Forbidden { message } if !message.trim().is_empty() => message.clone(),
            Self::Forbidden { .. } => "You do not have permission to do that.".into(),
            Self::InvalidCredentials => "Invalid email or password.".into(),
            Self::RateLimited { retry_after_secs } => {
                format!("Too many requests. Try again in {retry_after_secs}s.")
            }
            Self::Parse(_) => "Unexpected response from the server.".into(),
        }
    }

    /// A 401 ends the session wherever it comes from. A 403 only does on the
    /// building fetch, which the caller decides.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}
