//! Fixed dataset served in example mode.
//!
//! Every call returns the same values, so example-mode output is
//! deterministic and needs no backend.

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{
    Building, CalendarEvent, Director, Email, Issue, Meeting, Role, Supplier,
};
use crate::enums::{EmailStatus, IssuePriority, IssueStatus};

pub const SEED_BUILDING_ID: u64 = 1;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

// 2024-01-08 09:00:00 UTC
const BASE: i64 = 1_704_704_400;
const DAY: i64 = 86_400;

#[allow(clippy::too_many_arguments)]
fn issue(
    n: u32,
    title: &str,
    summary: &str,
    category: &str,
    priority: IssuePriority,
    status: IssueStatus,
    day: i64,
    email_id: Option<&str>,
) -> Issue {
    Issue {
        id: format!("ISS-2024-{n:03}"),
        building_id: Some(SEED_BUILDING_ID),
        title: title.into(),
        summary: summary.into(),
        category: category.into(),
        priority,
        status,
        created_at: at(BASE + day * DAY),
        last_updated: at(BASE + day * DAY),
        has_update: false,
        email_id: email_id.map(String::from),
        linked_email_ids: email_id.map(String::from).into_iter().collect(),
        linked_issue_ids: Vec::new(),
    }
}

#[must_use]
pub fn issues() -> Vec<Issue> {
    vec![
        issue(
            1,
            "Water ingress in stairwell B",
            "Resident reports water coming through the ceiling on the third floor landing.",
            "Plumbing",
            IssuePriority::High,
            IssueStatus::NotStarted,
            0,
            Some("EML-2024-001"),
        ),
        issue(
            2,
            "Lift out of service",
            "Passenger lift stuck on ground floor; engineer visit booked.",
            "Lifts",
            IssuePriority::Urgent,
            IssueStatus::InProgress,
            1,
            None,
        ),
        issue(
            3,
            "Annual fire risk assessment",
            "Assessment due before the end of Q1; quotes requested from two assessors.",
            "Fire safety",
            IssuePriority::Medium,
            IssueStatus::InReview,
            3,
            None,
        ),
        issue(
            4,
            "Communal garden hedge trimming",
            "Seasonal maintenance agreed at the last board meeting.",
            "Grounds",
            IssuePriority::Low,
            IssueStatus::Paused,
            5,
            None,
        ),
        issue(
            5,
            "Broken entry-phone handset, flat 12",
            "Handset replaced by contractor; resident confirmed working.",
            "Security",
            IssuePriority::Medium,
            IssueStatus::Closed,
            8,
            Some("EML-2024-003"),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn email(
    n: u32,
    subject: &str,
    from: &str,
    body: &str,
    priority: IssuePriority,
    status: EmailStatus,
    day: i64,
    linked: &[&str],
) -> Email {
    Email {
        id: format!("EML-2024-{n:03}"),
        subject: subject.into(),
        from: from.into(),
        to: vec!["board@maple-court.example".into()],
        body: body.into(),
        body_html: None,
        timestamp: at(BASE + day * DAY - 3_600),
        priority,
        status,
        summary: None,
        tags: Vec::new(),
        linked_issue_ids: linked.iter().map(|id| (*id).to_string()).collect(),
    }
}

#[must_use]
pub fn emails() -> Vec<Email> {
    vec![
        email(
            1,
            "Leak on the third floor",
            "flat7@maple-court.example",
            "Hi, there is water dripping from the ceiling outside my flat.",
            IssuePriority::High,
            EmailStatus::Completed,
            0,
            &["ISS-2024-001"],
        ),
        email(
            2,
            "Insurance renewal quote",
            "broker@insure.example",
            "Please find attached the renewal quote for the buildings policy.",
            IssuePriority::Medium,
            EmailStatus::NeedsReview,
            2,
            &[],
        ),
        email(
            3,
            "Entry phone not working",
            "flat12@maple-court.example",
            "My entry-phone handset has stopped working.",
            IssuePriority::Medium,
            EmailStatus::Completed,
            7,
            &["ISS-2024-005"],
        ),
        email(
            4,
            "Parking permit question",
            "flat3@maple-court.example",
            "Can I get a second parking permit for a visitor?",
            IssuePriority::Low,
            EmailStatus::Unread,
            9,
            &[],
        ),
    ]
}

#[must_use]
pub fn building() -> Building {
    Building {
        id: SEED_BUILDING_ID,
        name: "Maple Court".into(),
        address: "1 Maple Court, London".into(),
        postcode: Some("N1 7AA".into()),
        units: 24,
        directors: vec![
            Director {
                id: "1".into(),
                name: "Priya Shah".into(),
                email: "priya@maple-court.example".into(),
                position: Some("Chair".into()),
                appointed_on: NaiveDate::from_ymd_opt(2021, 4, 1),
            },
            Director {
                id: "2".into(),
                name: "Tom Okafor".into(),
                email: "tom@maple-court.example".into(),
                position: Some("Treasurer".into()),
                appointed_on: NaiveDate::from_ymd_opt(2022, 9, 15),
            },
        ],
        roles: vec![
            Role {
                id: "director".into(),
                name: "Director".into(),
                description: Some("Board member of the management company".into()),
            },
            Role {
                id: "agent".into(),
                name: "Managing agent".into(),
                description: Some("Day-to-day management on behalf of the board".into()),
            },
        ],
    }
}

#[must_use]
pub fn meetings() -> Vec<Meeting> {
    vec![
        Meeting {
            id: "1".into(),
            building_id: Some(SEED_BUILDING_ID),
            title: "Quarterly board meeting".into(),
            scheduled_for: at(BASE + 14 * DAY + 9 * 3_600),
            location: Some("Residents' lounge".into()),
            agenda: Some("Lift contract; fire risk assessment; service charge budget".into()),
            attendees: vec!["Priya Shah".into(), "Tom Okafor".into()],
        },
        Meeting {
            id: "2".into(),
            building_id: Some(SEED_BUILDING_ID),
            title: "Annual general meeting".into(),
            scheduled_for: at(BASE + 60 * DAY + 10 * 3_600),
            location: Some("Community hall".into()),
            agenda: None,
            attendees: Vec::new(),
        },
    ]
}

#[must_use]
pub fn calendar_events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: "1".into(),
            title: "Quarterly board meeting".into(),
            starts_at: at(BASE + 14 * DAY + 9 * 3_600),
            ends_at: Some(at(BASE + 14 * DAY + 11 * 3_600)),
            kind: "meeting".into(),
            meeting_id: Some("1".into()),
        },
        CalendarEvent {
            id: "2".into(),
            title: "Lift engineer visit".into(),
            starts_at: at(BASE + 2 * DAY + 8 * 3_600),
            ends_at: None,
            kind: "maintenance".into(),
            meeting_id: None,
        },
    ]
}

#[must_use]
pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: "1".into(),
            name: "Rapid Lifts Ltd".into(),
            service: "Lift maintenance".into(),
            contact_name: Some("Sam Reed".into()),
            email: Some("service@rapidlifts.example".into()),
            phone: Some("020 7946 0001".into()),
        },
        Supplier {
            id: "2".into(),
            name: "Northside Plumbing".into(),
            service: "Plumber".into(),
            contact_name: None,
            email: Some("jobs@northside.example".into()),
            phone: Some("020 7946 0002".into()),
        },
    ]
}
