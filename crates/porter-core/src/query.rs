//! List scopes shared by the live and in-memory stores.

use serde::Serialize;

use crate::entities::Issue;
use crate::enums::{IssuePriority, IssueStatus};

/// Server-side narrowing of an issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum IssueFilter {
    #[default]
    All,
    Status(IssueStatus),
    Category(String),
    Priority(IssuePriority),
}

impl IssueFilter {
    /// In-memory equivalent of the server-side filter. Category matching is
    /// case-insensitive, as the backend's is.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => issue.status == *status,
            Self::Category(category) => issue.category.eq_ignore_ascii_case(category),
            Self::Priority(priority) => issue.priority == *priority,
        }
    }
}

/// What a list call is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListScope {
    pub building_id: Option<u64>,
    pub issues: IssueFilter,
}

impl ListScope {
    #[must_use]
    pub fn building(building_id: u64) -> Self {
        Self {
            building_id: Some(building_id),
            issues: IssueFilter::All,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: IssueFilter) -> Self {
        self.issues = filter;
        self
    }
}
