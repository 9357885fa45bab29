use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A governance document held by the backend (lease, minutes, insurance, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub content_type: Option<String>,
    pub size_bytes: Option<u64>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A short-lived URL for viewing a document in a browser.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentLink {
    pub id: String,
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}
