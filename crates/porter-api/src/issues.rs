//! Issue endpoints.
//!
//! The backend speaks `name`/`description` and upper-snake statuses; the
//! mapping into [`Issue`] goes through the status table in `porter-core`.

use chrono::{DateTime, Utc};
use porter_core::entities::Issue;
use porter_core::enums::{IssuePriority, IssueStatus};
use porter_core::query::IssueFilter;
use porter_core::updates::{IssueDraft, IssuePatch};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{ApiClient, error::ApiError, wire};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiIssue {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    #[serde(default, deserialize_with = "wire::opt_u64")]
    building_id: Option<u64>,
    #[serde(alias = "title")]
    name: String,
    #[serde(default, alias = "summary")]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    status_id: Option<u8>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "lastUpdated")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    email_id: Option<String>,
}

impl ApiIssue {
    fn into_issue(self, now: DateTime<Utc>) -> Issue {
        let status = match (self.status.as_deref(), self.status_id) {
            (Some(server), _) => IssueStatus::from_server(server),
            (None, Some(id)) => IssueStatus::from_status_id(id),
            (None, None) => IssueStatus::default(),
        };
        let created_at = self.created_at.unwrap_or(now);
        Issue {
            id: self.id,
            building_id: self.building_id,
            title: self.name,
            summary: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            priority: self
                .priority
                .as_deref()
                .map(IssuePriority::from_server)
                .unwrap_or_default(),
            status,
            created_at,
            last_updated: self.updated_at.unwrap_or(created_at),
            has_update: false,
            linked_email_ids: self.email_id.iter().cloned().collect(),
            email_id: self.email_id,
            linked_issue_ids: Vec::new(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateIssueBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    building_id: Option<u64>,
    name: &'a str,
    description: &'a str,
    category: &'a str,
    priority: &'static str,
    status_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_id: Option<&'a str>,
}

impl<'a> From<&'a IssueDraft> for CreateIssueBody<'a> {
    fn from(draft: &'a IssueDraft) -> Self {
        Self {
            building_id: draft.building_id,
            name: &draft.title,
            description: &draft.summary,
            category: &draft.category,
            priority: draft.priority.server_value(),
            status_id: draft.status.unwrap_or_default().status_id(),
            email_id: draft.email_id.as_deref(),
        }
    }
}

/// `PUT /issues/{id}` body: only the fields being changed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateIssueBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_id: Option<u8>,
}

impl<'a> From<&'a IssuePatch> for UpdateIssueBody<'a> {
    fn from(patch: &'a IssuePatch) -> Self {
        Self {
            name: patch.title.as_deref(),
            description: patch.summary.as_deref(),
            category: patch.category.as_deref(),
            priority: patch.priority.map(IssuePriority::server_value),
            status_id: patch.status.map(IssueStatus::status_id),
        }
    }
}

/// A created issue plus the payload the backend returned for it.
#[derive(Debug, Clone)]
pub struct CreatedIssue {
    pub issue: Issue,
    pub raw: serde_json::Value,
}

/// Path for a building-scoped list.
fn list_path(building_id: u64, filter: &IssueFilter) -> String {
    match filter {
        IssueFilter::All => format!("/issues/building/{building_id}"),
        IssueFilter::Status(status) => {
            format!("/issues/building/{building_id}/status/{}", status.server_value())
        }
        IssueFilter::Category(category) => format!(
            "/issues/building/{building_id}/category/{}",
            urlencoding::encode(category)
        ),
        IssueFilter::Priority(priority) => {
            format!("/issues/building/{building_id}/priority/{}", priority.server_value())
        }
    }
}

impl ApiClient {
    /// List issues, optionally scoped to a building and narrowed server-side.
    ///
    /// Without a building the filter is applied locally to `GET /issues`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn list_issues(
        &self,
        building_id: Option<u64>,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, ApiError> {
        let path = building_id.map_or_else(|| "/issues".to_string(), |id| list_path(id, filter));
        let raw: Vec<ApiIssue> = self.send(self.request(Method::GET, &path)).await?;
        let now = Utc::now();
        let issues = raw.into_iter().map(|issue| issue.into_issue(now));
        Ok(if building_id.is_some() {
            issues.collect()
        } else {
            issues.filter(|issue| filter.matches(issue)).collect()
        })
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the backend rejects it, or
    /// the response does not describe an issue.
    pub async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue, ApiError> {
        let raw: serde_json::Value = self
            .send(
                self.request(Method::POST, "/issues")
                    .json(&CreateIssueBody::from(draft)),
            )
            .await?;
        let api: ApiIssue =
            serde_json::from_value(raw.clone()).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(CreatedIssue {
            issue: api.into_issue(Utc::now()),
            raw,
        })
    }

    /// Send a partial update. Returns the server's copy when it sends one back.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn update_issue(
        &self,
        id: &str,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, ApiError> {
        let path = format!("/issues/{}", urlencoding::encode(id));
        let raw: Option<ApiIssue> = self
            .send(
                self.request(Method::PUT, &path)
                    .json(&UpdateIssueBody::from(patch)),
            )
            .await?;
        Ok(raw.map(|issue| issue.into_issue(Utc::now())))
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn delete_issue(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/issues/{}", urlencoding::encode(id));
        let _: Option<serde_json::Value> = self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
