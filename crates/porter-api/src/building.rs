//! Building detail endpoint.

use chrono::NaiveDate;
use porter_core::entities::{Building, Director, Role};
use reqwest::Method;
use serde::Deserialize;

use crate::{ApiClient, error::ApiError, wire};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiBuilding {
    #[serde(deserialize_with = "wire::opt_u64", default)]
    id: Option<u64>,
    #[serde(alias = "buildingName")]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    postcode: Option<String>,
    #[serde(default, alias = "numberOfUnits")]
    units: u32,
    #[serde(default)]
    directors: Vec<ApiDirector>,
    #[serde(default)]
    roles: Vec<ApiRole>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDirector {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    appointed_on: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRole {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<ApiBuilding> for Building {
    fn from(b: ApiBuilding) -> Self {
        Self {
            id: b.id.unwrap_or_default(),
            name: b.name,
            address: b.address,
            postcode: b.postcode,
            units: b.units,
            directors: b
                .directors
                .into_iter()
                .map(|d| Director {
                    id: d.id,
                    name: d.name,
                    email: d.email,
                    position: d.position,
                    appointed_on: d.appointed_on,
                })
                .collect(),
            roles: b
                .roles
                .into_iter()
                .map(|r| Role {
                    id: r.id,
                    name: r.name,
                    description: r.description,
                })
                .collect(),
        }
    }
}

impl ApiClient {
    /// Fetch the signed-in user's building, with directors and roles.
    ///
    /// A 403 here means the token has expired; callers treat it like a 401.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn building_detail(&self) -> Result<Building, ApiError> {
        let building: ApiBuilding = self
            .send(self.request(Method::GET, "/api/building/detail"))
            .await?;
        Ok(building.into())
    }
}
