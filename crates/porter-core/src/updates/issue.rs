//! Issue drafts and patches.

use serde::Serialize;

use crate::enums::{IssuePriority, IssueStatus};

/// Input for creating an issue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueDraft {
    pub building_id: Option<u64>,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub priority: IssuePriority,
    /// Defaults to `Not started` when absent.
    pub status: Option<IssueStatus>,
    pub email_id: Option<String>,
}

/// Subset of issue fields to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<IssuePriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
}

impl IssuePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Patch that only changes the status.
    #[must_use]
    pub fn status_only(status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct IssuePatchBuilder(IssuePatch);

impl IssuePatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(IssuePatch::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.0.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: IssuePriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: IssueStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> IssuePatch {
        self.0
    }
}
