use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contractor or service provider used by the building.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Trade or service, e.g. "Electrician".
    pub service: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
