//! Column sets for the entities `porter` lists.

use porter_core::entities::{CalendarEvent, Email, Issue, Meeting, Supplier};
use porter_core::enums::{EmailStatus, IssuePriority, IssueStatus};

use super::table::{Cell, Column, Tone};

const DAY: &str = "%Y-%m-%d";
const MINUTE: &str = "%Y-%m-%d %H:%M";

/// An entity rendered one row per record in table output.
pub trait TableRow {
    const COLUMNS: &'static [Column];

    fn cells(&self) -> Vec<Cell>;
}

const fn status_tone(status: IssueStatus) -> Tone {
    match status {
        IssueStatus::Closed => Tone::Done,
        IssueStatus::InProgress | IssueStatus::InReview | IssueStatus::Paused => Tone::Active,
        IssueStatus::NotStarted => Tone::Attention,
    }
}

const fn priority_tone(priority: IssuePriority) -> Tone {
    match priority {
        IssuePriority::Low => Tone::Done,
        IssuePriority::Medium | IssuePriority::High => Tone::Active,
        IssuePriority::Urgent => Tone::Attention,
    }
}

const fn email_tone(status: EmailStatus) -> Tone {
    match status {
        EmailStatus::Completed => Tone::Done,
        EmailStatus::Read | EmailStatus::NeedsReview => Tone::Active,
        EmailStatus::Unread => Tone::Attention,
    }
}

fn optional(value: Option<&str>) -> Cell {
    Cell::plain(value.unwrap_or("-"))
}

fn count(items: &[String]) -> Cell {
    Cell::plain(items.len().to_string())
}

impl TableRow for Issue {
    const COLUMNS: &'static [Column] = &[
        Column::fixed("id"),
        Column::text("title"),
        Column::fixed("status"),
        Column::fixed("priority"),
        Column::text("category"),
        Column::fixed("updated"),
        Column::count("emails"),
    ];

    fn cells(&self) -> Vec<Cell> {
        // Unsynced local changes are starred.
        let updated = self.last_updated.format(DAY).to_string();
        let updated = if self.has_update {
            format!("{updated} *")
        } else {
            updated
        };
        vec![
            Cell::plain(self.id.as_str()),
            Cell::plain(self.title.as_str()),
            Cell::toned(self.status.label(), status_tone(self.status)),
            Cell::toned(self.priority.label(), priority_tone(self.priority)),
            Cell::plain(self.category.as_str()),
            Cell::plain(updated),
            count(&self.linked_email_ids),
        ]
    }
}

impl TableRow for Email {
    const COLUMNS: &'static [Column] = &[
        Column::fixed("id"),
        Column::text("subject"),
        Column::text("from"),
        Column::fixed("status"),
        Column::fixed("priority"),
        Column::fixed("received"),
        Column::count("issues"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(self.id.as_str()),
            Cell::plain(self.subject.as_str()),
            Cell::plain(self.from.as_str()),
            Cell::toned(self.status.label(), email_tone(self.status)),
            Cell::toned(self.priority.label(), priority_tone(self.priority)),
            Cell::plain(self.timestamp.format(MINUTE).to_string()),
            count(&self.linked_issue_ids),
        ]
    }
}

impl TableRow for Meeting {
    const COLUMNS: &'static [Column] = &[
        Column::fixed("id"),
        Column::text("title"),
        Column::fixed("when"),
        Column::text("location"),
        Column::count("attendees"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(self.id.as_str()),
            Cell::plain(self.title.as_str()),
            Cell::plain(self.scheduled_for.format(MINUTE).to_string()),
            optional(self.location.as_deref()),
            count(&self.attendees),
        ]
    }
}

impl TableRow for CalendarEvent {
    const COLUMNS: &'static [Column] = &[
        Column::fixed("id"),
        Column::text("title"),
        Column::fixed("kind"),
        Column::fixed("starts"),
        Column::fixed("ends"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(self.id.as_str()),
            Cell::plain(self.title.as_str()),
            Cell::plain(self.kind.as_str()),
            Cell::plain(self.starts_at.format(MINUTE).to_string()),
            self.ends_at.map_or_else(
                || Cell::plain("-"),
                |ends| Cell::plain(ends.format(MINUTE).to_string()),
            ),
        ]
    }
}

impl TableRow for Supplier {
    const COLUMNS: &'static [Column] = &[
        Column::fixed("id"),
        Column::text("name"),
        Column::text("service"),
        Column::text("contact"),
        Column::text("email"),
        Column::fixed("phone"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(self.id.as_str()),
            Cell::plain(self.name.as_str()),
            Cell::plain(self.service.as_str()),
            optional(self.contact_name.as_deref()),
            optional(self.email.as_deref()),
            optional(self.phone.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use porter_core::enums::{EmailStatus, IssueStatus};
    use porter_core::seed;
    use pretty_assertions::assert_eq;

    use super::{TableRow, Tone};
    use porter_core::entities::{Email, Issue, Meeting, Supplier};

    #[test]
    fn every_row_matches_its_columns() {
        assert!(seed::issues().iter().all(|row| row.cells().len() == Issue::COLUMNS.len()));
        assert!(seed::emails().iter().all(|row| row.cells().len() == Email::COLUMNS.len()));
        assert!(seed::meetings().iter().all(|row| row.cells().len() == Meeting::COLUMNS.len()));
        assert!(seed::suppliers().iter().all(|row| row.cells().len() == Supplier::COLUMNS.len()));
    }

    #[test]
    fn issue_status_and_priority_carry_tones() {
        let mut issue = seed::issues().remove(0);
        issue.status = IssueStatus::Closed;
        let cells = issue.cells();

        assert_eq!(cells[2].text, "Closed");
        assert_eq!(cells[2].tone, Some(Tone::Done));
        assert!(cells[3].tone.is_some());
        assert_eq!(cells[1].tone, None, "titles are never colored");
    }

    #[test]
    fn unsynced_issues_are_starred() {
        let mut issue = seed::issues().remove(0);
        issue.has_update = false;
        assert!(!issue.cells()[5].text.ends_with('*'));
        issue.has_update = true;
        assert!(issue.cells()[5].text.ends_with(" *"));
    }

    #[test]
    fn unread_email_needs_attention() {
        let mut email = seed::emails().remove(0);
        email.status = EmailStatus::Unread;
        assert_eq!(email.cells()[3].tone, Some(Tone::Attention));
    }
}
