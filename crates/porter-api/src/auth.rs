//! Login and signup endpoints.

use porter_core::entities::{AuthUser, Building};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::building::ApiBuilding;
use crate::{ApiClient, error::ApiError, http, wire};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLogin {
    #[serde(alias = "accessToken")]
    token: String,
    user: Option<ApiUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiUser {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    email: String,
    #[serde(default, alias = "fullName")]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_u64")]
    building_id: Option<u64>,
}

impl From<ApiUser> for AuthUser {
    fn from(user: ApiUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            building_id: user.building_id,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Option<AuthUser>,
}

/// `POST /api/signup/user` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /api/signup/building/create` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuilding {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(rename = "numberOfUnits")]
    pub units: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteRequest<'a> {
    building_id: u64,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

/// Pending invitation returned by `POST /api/signup/building/invite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// A 401 here maps to [`ApiError::InvalidCredentials`] and does not fire
    /// the unauthorized hook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the credentials are wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let builder = self
            .request(Method::POST, "/api/auth/login")
            .json(&LoginRequest { email, password });
        let resp = builder.send().await?;
        let login: ApiLogin = match http::read_data(resp).await {
            Err(ApiError::Unauthorized) => return Err(ApiError::InvalidCredentials),
            other => other?,
        };
        tracing::info!(email, "signed in");
        Ok(LoginResponse {
            token: login.token,
            user: login.user.map(AuthUser::from),
        })
    }

    /// Register a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn signup_user(&self, signup: &SignupUser) -> Result<AuthUser, ApiError> {
        let user: ApiUser = self
            .send(self.request(Method::POST, "/api/signup/user").json(signup))
            .await?;
        Ok(user.into())
    }

    /// Create a building owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn create_building(&self, building: &NewBuilding) -> Result<Building, ApiError> {
        let created: ApiBuilding = self
            .send(
                self.request(Method::POST, "/api/signup/building/create")
                    .json(building),
            )
            .await?;
        Ok(created.into())
    }

    /// Invite someone to join a building.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn invite(
        &self,
        building_id: u64,
        email: &str,
        role: Option<&str>,
    ) -> Result<Invitation, ApiError> {
        let body = InviteRequest {
            building_id,
            email,
            role,
        };
        let invitation: Option<Invitation> = self
            .send(
                self.request(Method::POST, "/api/signup/building/invite")
                    .json(&body),
            )
            .await?;
        Ok(invitation.unwrap_or_else(|| Invitation {
            email: email.to_string(),
            role: role.map(String::from),
            status: Some("pending".into()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOGIN_FIXTURE: &str = r#"{
        "success": true,
        "message": "Login successful",
        "data": {
            "token": "eyJhbGciOiJIUzI1NiJ9.e30.sig",
            "user": {
                "id": 17,
                "email": "priya@maple-court.example",
                "fullName": "Priya Shah",
                "role": "director",
                "buildingId": 1
            }
        }
    }"#;

    #[test]
    fn parse_login_fixture() {
        let login: ApiLogin = http::decode_envelope(LOGIN_FIXTURE.as_bytes()).unwrap();
        let user = AuthUser::from(login.user.unwrap());
        assert_eq!(login.token, "eyJhbGciOiJIUzI1NiJ9.e30.sig");
        assert_eq!(user.id, "17");
        assert_eq!(user.name.as_deref(), Some("Priya Shah"));
        assert_eq!(user.building_id, Some(1));
    }

    #[test]
    fn login_without_building() {
        let raw = br#"{"success":true,"data":{"accessToken":"t","user":{"id":"u1","email":"a@b.c"}}}"#;
        let login: ApiLogin = http::decode_envelope(raw).unwrap();
        assert_eq!(login.token, "t");
        assert_eq!(login.user.unwrap().building_id, None);
    }

    #[test]
    fn new_building_body_uses_backend_field_names() {
        let body = NewBuilding {
            name: "Maple Court".into(),
            address: "14 Maple Road".into(),
            postcode: None,
            units: 24,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "name": "Maple Court",
                "address": "14 Maple Road",
                "numberOfUnits": 24
            })
        );
    }

    #[test]
    fn invite_body_is_camel_case() {
        let body = InviteRequest {
            building_id: 1,
            email: "new@maple-court.example",
            role: Some("resident"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "buildingId": 1,
                "email": "new@maple-court.example",
                "role": "resident"
            })
        );
    }
}
