use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, persisted with the session token.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub building_id: Option<u64>,
}
