use std::fmt;

/// The backend refused the stored credentials. The session has already been
/// cleared when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    message: String,
}

impl SessionExpired {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for SessionExpired {
    fn default() -> Self {
        Self::new("Your session has expired. Please sign in again.")
    }
}

impl fmt::Display for SessionExpired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SessionExpired {}
