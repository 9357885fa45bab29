//! Status and priority enums for Porter entities.
//!
//! The backend speaks upper-snake-case enums (`NOT_STARTED`) and numeric
//! status ids; the client speaks human-readable labels (`Not started`). Each
//! enum here owns both vocabularies so the mapping table lives in exactly one
//! place. Serde uses the label form: that is what the store holds and what the
//! CLI prints. Wire DTOs in `porter-api` go through `from_server`/`server_value`.
//!
//! The lenient constructors (`from_server`, `from_label`, ...) are total and
//! fall back to a default variant for unrecognised input. The fallback is
//! logged, because it masks states the backend may add later.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// IssueStatus
// ---------------------------------------------------------------------------

/// Status of an issue.
///
/// | server        | label       | status id |
/// |---------------|-------------|-----------|
/// | `NOT_STARTED` | Not started | 1         |
/// | `IN_PROGRESS` | In progress | 2         |
/// | `IN_REVIEW`   | In review   | 3         |
/// | `CLOSED`      | Closed      | 4         |
/// | `PAUSED`      | Paused      | 5         |
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum IssueStatus {
    #[default]
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "In progress")]
    InProgress,
    #[serde(rename = "In review")]
    InReview,
    #[serde(rename = "Closed")]
    Closed,
    #[serde(rename = "Paused")]
    Paused,
}

impl IssueStatus {
    pub const ALL: [Self; 5] = [
        Self::NotStarted,
        Self::InProgress,
        Self::InReview,
        Self::Closed,
        Self::Paused,
    ];

    /// Upper-snake-case value used by the backend.
    #[must_use]
    pub const fn server_value(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Closed => "CLOSED",
            Self::Paused => "PAUSED",
        }
    }

    /// Human-readable label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::InReview => "In review",
            Self::Closed => "Closed",
            Self::Paused => "Paused",
        }
    }

    /// Numeric id sent as `statusId` on updates.
    #[must_use]
    pub const fn status_id(self) -> u8 {
        match self {
            Self::NotStarted => 1,
            Self::InProgress => 2,
            Self::InReview => 3,
            Self::Closed => 4,
            Self::Paused => 5,
        }
    }

    /// Strict parse of a server value. Case and separator insensitive.
    #[must_use]
    pub fn try_from_server(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|status| status.server_value() == normalized)
    }

    /// Strict parse of a label. Also accepts the server spelling so that
    /// `in-progress`, `IN_PROGRESS` and `In progress` all resolve.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the input names no status.
    pub fn try_from_label(raw: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(raw.trim()))
            .or_else(|| Self::try_from_server(raw))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown issue status '{raw}' (expected one of: {})",
                    Self::ALL.map(Self::label).join(", ")
                ))
            })
    }

    /// Lenient server → status mapping. Unknown values become `NotStarted`.
    #[must_use]
    pub fn from_server(raw: &str) -> Self {
        Self::try_from_server(raw).unwrap_or_else(|| {
            tracing::warn!(value = raw, "unrecognised issue status; defaulting to NOT_STARTED");
            Self::NotStarted
        })
    }

    /// Lenient label → status mapping. Unknown labels become `NotStarted`.
    #[must_use]
    pub fn from_label(raw: &str) -> Self {
        Self::try_from_label(raw).unwrap_or_else(|_| {
            tracing::warn!(label = raw, "unrecognised issue label; defaulting to Not started");
            Self::NotStarted
        })
    }

    /// Lenient status id → status mapping. Unknown ids become `NotStarted`.
    #[must_use]
    pub fn from_status_id(id: u8) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.status_id() == id)
            .unwrap_or_else(|| {
                tracing::warn!(status_id = id, "unrecognised issue status id; defaulting to 1");
                Self::NotStarted
            })
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// IssuePriority
// ---------------------------------------------------------------------------

/// Priority of an issue or email.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    JsonSchema,
)]
pub enum IssuePriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl IssuePriority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[must_use]
    pub const fn server_value(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the input names no priority.
    pub fn try_parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|priority| priority.server_value() == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown priority '{raw}'")))
    }

    /// Lenient mapping used on API responses. Unknown values become `Medium`.
    #[must_use]
    pub fn from_server(raw: &str) -> Self {
        Self::try_parse(raw).unwrap_or_else(|_| {
            tracing::warn!(value = raw, "unrecognised priority; defaulting to MEDIUM");
            Self::Medium
        })
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EmailStatus
// ---------------------------------------------------------------------------

/// Triage status of an email.
///
/// ```text
/// Unread → Read → Needs Review → Completed
/// ```
///
/// Linking an email to an issue forces `Completed` from any state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum EmailStatus {
    #[default]
    Unread,
    Read,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    Completed,
}

impl EmailStatus {
    pub const ALL: [Self; 4] = [Self::Unread, Self::Read, Self::NeedsReview, Self::Completed];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Read => "Read",
            Self::NeedsReview => "Needs Review",
            Self::Completed => "Completed",
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the input names no status.
    pub fn try_parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|status| normalize(status.label()) == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown email status '{raw}'")))
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("NOT_STARTED", "Not started", 1)]
    #[case("IN_PROGRESS", "In progress", 2)]
    #[case("IN_REVIEW", "In review", 3)]
    #[case("CLOSED", "Closed", 4)]
    #[case("PAUSED", "Paused", 5)]
    fn issue_status_table(#[case] server: &str, #[case] label: &str, #[case] id: u8) {
        let status = IssueStatus::from_server(server);
        assert_eq!(status.label(), label);
        assert_eq!(status.status_id(), id);
        assert_eq!(status.server_value(), server);

        let via_label = IssueStatus::from_label(label);
        assert_eq!(via_label, status);
        assert_eq!(IssueStatus::from_status_id(via_label.status_id()).label(), label);
    }

    #[test]
    fn in_review_maps_to_status_id_three() {
        let status = IssueStatus::from_server("IN_REVIEW");
        assert_eq!(status.label(), "In review");
        assert_eq!(status.status_id(), 3);
    }

    #[test]
    fn unknown_server_value_falls_back_to_not_started() {
        assert_eq!(IssueStatus::from_server("ARCHIVED"), IssueStatus::NotStarted);
        assert_eq!(IssueStatus::from_label("Archived"), IssueStatus::NotStarted);
        assert_eq!(IssueStatus::from_status_id(0), IssueStatus::NotStarted);
        assert_eq!(IssueStatus::from_status_id(9), IssueStatus::NotStarted);
    }

    #[test]
    fn label_parse_accepts_cli_spellings() {
        for raw in ["In progress", "in progress", "IN_PROGRESS", "in-progress"] {
            assert_eq!(
                IssueStatus::try_from_label(raw).expect("should parse"),
                IssueStatus::InProgress
            );
        }
    }

    #[test]
    fn strict_label_parse_rejects_unknown() {
        let err = IssueStatus::try_from_label("Done").expect_err("should fail");
        assert!(err.to_string().contains("unknown issue status 'Done'"));
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&IssueStatus::InReview).unwrap();
        assert_eq!(json, "\"In review\"");
        let back: IssueStatus = serde_json::from_str("\"Paused\"").unwrap();
        assert_eq!(back, IssueStatus::Paused);
    }

    #[test]
    fn priority_fallback_is_medium() {
        assert_eq!(IssuePriority::from_server("urgent"), IssuePriority::Urgent);
        assert_eq!(IssuePriority::from_server("CRITICAL"), IssuePriority::Medium);
        assert!(IssuePriority::try_parse("critical").is_err());
    }

    #[test]
    fn priority_orders_by_severity() {
        assert!(IssuePriority::Urgent > IssuePriority::High);
        assert!(IssuePriority::Low < IssuePriority::Medium);
    }

    #[test]
    fn email_status_parses_two_words() {
        assert_eq!(
            EmailStatus::try_parse("needs-review").unwrap(),
            EmailStatus::NeedsReview
        );
        assert_eq!(
            serde_json::to_string(&EmailStatus::NeedsReview).unwrap(),
            "\"Needs Review\""
        );
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(format!("{}", IssueStatus::NotStarted), "Not started");
        assert_eq!(format!("{}", IssuePriority::Urgent), "Urgent");
        assert_eq!(format!("{}", EmailStatus::Completed), "Completed");
    }
}
