//! Supplier directory.
//!
//! This endpoint is the inconsistent one: it may answer with a bare array, or
//! with `success: false` while still carrying the list.

use porter_core::entities::Supplier;
use porter_core::updates::SupplierDraft;
use reqwest::Method;
use serde::Deserialize;

use crate::{ApiClient, error::ApiError, wire};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSupplier {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    name: String,
    #[serde(default, alias = "serviceType", alias = "category")]
    service: Option<String>,
    #[serde(default)]
    contact_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    phone: Option<String>,
}

impl From<ApiSupplier> for Supplier {
    fn from(s: ApiSupplier) -> Self {
        Self {
            id: s.id,
            name: s.name,
            service: s.service.unwrap_or_default(),
            contact_name: s.contact_name,
            email: s.email,
            phone: s.phone,
        }
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it
    /// without returning a list.
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        let raw: Vec<ApiSupplier> = self.send(self.request(Method::GET, "/api/suppliers")).await?;
        Ok(raw.into_iter().map(Supplier::from).collect())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn create_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, ApiError> {
        let raw: ApiSupplier = self
            .send(self.request(Method::POST, "/api/suppliers").json(draft))
            .await?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::decode_envelope;
    use rstest::rstest;

    #[rstest]
    #[case::bare(br#"[{"id":1,"name":"Spark Electrical","serviceType":"Electrical"}]"#.as_slice())]
    #[case::envelope(br#"{"success":true,"data":[{"id":1,"name":"Spark Electrical","serviceType":"Electrical"}]}"#.as_slice())]
    #[case::failed_with_data(br#"{"success":false,"message":"cached","data":[{"id":"1","name":"Spark Electrical","service":"Electrical"}]}"#.as_slice())]
    fn every_shape_yields_the_list(#[case] body: &[u8]) {
        let raw: Vec<ApiSupplier> = decode_envelope(body).unwrap();
        let suppliers: Vec<Supplier> = raw.into_iter().map(Supplier::from).collect();
        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].id, "1");
        assert_eq!(suppliers[0].service, "Electrical");
    }

    #[test]
    fn failed_envelope_without_data_is_an_error() {
        let err = decode_envelope::<Vec<ApiSupplier>>(
            br#"{"success":false,"message":"Building not linked"}"#,
        )
        .err()
        .unwrap();
        assert_eq!(err.user_message(), "Building not linked");
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = SupplierDraft {
            building_id: Some(1),
            name: "GreenCut".into(),
            service: "Gardening".into(),
            contact_name: Some("Ana".into()),
            email: None,
            phone: None,
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({
                "buildingId": 1,
                "name": "GreenCut",
                "service": "Gardening",
                "contactName": "Ana"
            })
        );
    }
}
