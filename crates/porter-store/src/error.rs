//! Store error types.

use porter_api::ApiError;
use porter_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The backend has no endpoint for this operation.
    #[error("{entity} {operation} is not supported by this backend")]
    Unsupported {
        entity: &'static str,
        operation: &'static str,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Human-readable form stored in a slice's error slot.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(api) => api.user_message(),
            Self::Core(CoreError::Validation(message)) | Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the backend rejected the credentials (401). A 403 is a
    /// permission refusal everywhere except the building fetch.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }

    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Api(ApiError::Forbidden { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_use_server_message() {
        let err = StoreError::from(ApiError::Api {
            status: Some(400),
            message: "Category too long".into(),
        });
        assert_eq!(err.user_message(), "Category too long");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn only_unauthorized_is_an_auth_failure() {
        let forbidden = StoreError::from(ApiError::Forbidden {
            message: "Only directors may close issues".into(),
        });
        assert!(forbidden.is_forbidden());
        assert!(!forbidden.is_auth_failure());

        let unauthorized = StoreError::from(ApiError::Unauthorized);
        assert!(unauthorized.is_auth_failure());
        assert!(!unauthorized.is_forbidden());
    }

    #[test]
    fn not_found_message() {
        let err = StoreError::NotFound {
            entity: "issue",
            id: "ISS-2024-099".into(),
        };
        assert_eq!(err.user_message(), "issue ISS-2024-099 not found");
    }
}
