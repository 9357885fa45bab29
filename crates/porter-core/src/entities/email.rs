use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EmailStatus, IssuePriority};
use crate::updates::EmailPatch;

/// An inbound or outbound message, optionally linked to issues.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Email {
    /// `EML-YYYY-NNN` or the server message id.
    pub id: String,
    pub subject: String,
    pub from: String,
    #[serde(default)]
    pub to: Vec<String>,
    pub body: String,
    pub body_html: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub priority: IssuePriority,
    pub status: EmailStatus,
    /// Generated digest of the body.
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub linked_issue_ids: Vec<String>,
}

impl Email {
    /// Link this email to an issue. A linked email is always `Completed`.
    ///
    /// Returns `false` when the issue was already linked; the status is
    /// forced either way.
    pub fn link_issue(&mut self, issue_id: &str) -> bool {
        self.status = EmailStatus::Completed;
        if self.linked_issue_ids.iter().any(|id| id == issue_id) {
            return false;
        }
        self.linked_issue_ids.push(issue_id.to_string());
        true
    }

    pub fn apply(&mut self, patch: &EmailPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(summary) = &patch.summary {
            self.summary.clone_from(summary);
        }
        if let Some(tags) = &patch.tags {
            self.tags.clone_from(tags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            id: "EML-2024-001".into(),
            subject: "Leak".into(),
            from: "resident@example.com".into(),
            to: vec!["board@example.com".into()],
            body: "There is a leak".into(),
            body_html: None,
            timestamp: DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
            priority: IssuePriority::High,
            status: EmailStatus::NeedsReview,
            summary: None,
            tags: Vec::new(),
            linked_issue_ids: vec!["ISS-2024-003".into()],
        }
    }

    #[test]
    fn link_forces_completed_and_appends() {
        let mut email = email();
        assert!(email.link_issue("ISS-2024-001"));
        assert_eq!(email.status, EmailStatus::Completed);
        assert_eq!(email.linked_issue_ids, vec!["ISS-2024-003", "ISS-2024-001"]);
    }

    #[test]
    fn relinking_does_not_duplicate() {
        let mut email = email();
        assert!(!email.link_issue("ISS-2024-003"));
        assert_eq!(email.linked_issue_ids.len(), 1);
        assert_eq!(email.status, EmailStatus::Completed);
    }
}
