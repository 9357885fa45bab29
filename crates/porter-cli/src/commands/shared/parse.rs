use porter_core::enums::{EmailStatus, IssuePriority, IssueStatus};

/// Parse a status label typed on the command line. Unlike the lenient
/// mapping used for server data, unknown labels are rejected.
pub fn parse_status(raw: &str) -> anyhow::Result<IssueStatus> {
    IssueStatus::try_from_label(raw).map_err(anyhow::Error::from)
}

pub fn parse_priority(raw: &str) -> anyhow::Result<IssuePriority> {
    IssuePriority::try_parse(raw).map_err(anyhow::Error::from)
}

pub fn parse_email_status(raw: &str) -> anyhow::Result<EmailStatus> {
    EmailStatus::try_parse(raw).map_err(anyhow::Error::from)
}
