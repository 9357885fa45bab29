//! Document upload, signed view links and downloads.

use chrono::{DateTime, Utc};
use porter_core::entities::{Document, DocumentLink};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{ApiClient, error::ApiError, wire};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDocument {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    #[serde(alias = "fileName", alias = "filename")]
    name: String,
    #[serde(default, alias = "mimeType")]
    content_type: Option<String>,
    #[serde(default, alias = "size")]
    size_bytes: Option<u64>,
    #[serde(default, alias = "createdAt")]
    uploaded_at: Option<DateTime<Utc>>,
}

impl From<ApiDocument> for Document {
    fn from(d: ApiDocument) -> Self {
        Self {
            id: d.id,
            name: d.name,
            content_type: d.content_type,
            size_bytes: d.size_bytes,
            uploaded_at: d.uploaded_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLink {
    #[serde(alias = "signedUrl")]
    url: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

fn document_path(id: &str, action: &str) -> String {
    format!("/api/v1/document/{}/{action}", urlencoding::encode(id))
}

impl ApiClient {
    /// Upload a file as multipart form data (`file` part, optional
    /// `buildingId` field).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        building_id: Option<u64>,
    ) -> Result<Document, ApiError> {
        let size = bytes.len();
        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        if let Some(building_id) = building_id {
            form = form.text("buildingId", building_id.to_string());
        }
        tracing::debug!(file_name, size, "uploading document");
        let raw: ApiDocument = self
            .send(
                self.request(Method::POST, "/api/v1/document/upload")
                    .multipart(form),
            )
            .await?;
        Ok(raw.into())
    }

    /// Fetch a time-limited link for viewing a document.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn view_document(&self, id: &str) -> Result<DocumentLink, ApiError> {
        let raw: ApiLink = self
            .send(self.request(Method::GET, &document_path(id, "view")))
            .await?;
        Ok(DocumentLink {
            id: id.to_string(),
            url: raw.url,
            expires_at: raw.expires_at,
        })
    }

    /// Download the document body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn download_document(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        self.send_bytes(self.request(Method::GET, &document_path(id, "download")))
            .await
    }
}
