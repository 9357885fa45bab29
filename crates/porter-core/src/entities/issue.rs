use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{IssuePriority, IssueStatus};
use crate::updates::IssuePatch;

/// A tracked maintenance or governance item for a building.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Issue {
    /// `ISS-YYYY-NNN` for local issues, the coerced numeric id for server ones.
    pub id: String,
    pub building_id: Option<u64>,
    pub title: String,
    pub summary: String,
    /// Free text, e.g. "Plumbing" or "Fire safety".
    pub category: String,
    pub priority: IssuePriority,
    pub status: IssueStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Set by every local mutation; cleared only by a fresh fetch.
    #[serde(default)]
    pub has_update: bool,
    /// Email the issue was raised from, if any.
    pub email_id: Option<String>,
    #[serde(default)]
    pub linked_email_ids: Vec<String>,
    #[serde(default)]
    pub linked_issue_ids: Vec<String>,
}

impl Issue {
    /// Mark the issue as locally modified.
    ///
    /// `last_updated` always moves strictly forward, even when `now` is not
    /// later than the stored value (same clock tick, clock skew).
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.has_update = true;
        self.last_updated = if now > self.last_updated {
            now
        } else {
            self.last_updated + TimeDelta::milliseconds(1)
        };
    }

    /// Merge the fields present in `patch`. Does not touch.
    pub fn apply(&mut self, patch: &IssuePatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(summary) = &patch.summary {
            self.summary.clone_from(summary);
        }
        if let Some(category) = &patch.category {
            self.category.clone_from(category);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Record `email_id` as linked. Returns `false` if it already was.
    pub fn link_email(&mut self, email_id: &str) -> bool {
        if self.linked_email_ids.iter().any(|id| id == email_id) {
            return false;
        }
        self.linked_email_ids.push(email_id.to_string());
        true
    }

    /// Record `issue_id` as related. Self-links are ignored.
    pub fn link_issue(&mut self, issue_id: &str) -> bool {
        if issue_id == self.id || self.linked_issue_ids.iter().any(|id| id == issue_id) {
            return false;
        }
        self.linked_issue_ids.push(issue_id.to_string());
        true
    }
}
