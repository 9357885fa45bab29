use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A board meeting or AGM.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Meeting {
    pub id: String,
    pub building_id: Option<u64>,
    pub title: String,
    pub scheduled_for: DateTime<Utc>,
    pub location: Option<String>,
    pub agenda: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// An entry on the building calendar.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Free-form kind reported by the backend ("meeting", "maintenance", ...).
    pub kind: String,
    pub meeting_id: Option<String>,
}
