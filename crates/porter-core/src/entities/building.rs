use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The tenant root entity. Almost every other record belongs to one building.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Building {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub postcode: Option<String>,
    /// Number of residential units.
    pub units: u32,
    #[serde(default)]
    pub directors: Vec<Director>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// A director or managing agent of the building's management company.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Director {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Office held, e.g. "Chair" or "Treasurer".
    pub position: Option<String>,
    pub appointed_on: Option<NaiveDate>,
}

/// A role a user can hold within a building.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}
