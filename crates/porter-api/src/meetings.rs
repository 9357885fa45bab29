//! Board meetings and the building calendar.

use chrono::{DateTime, Utc};
use porter_core::entities::{CalendarEvent, Meeting};
use reqwest::Method;
use serde::Deserialize;

use crate::{ApiClient, error::ApiError, wire};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeeting {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    #[serde(default, deserialize_with = "wire::opt_u64")]
    building_id: Option<u64>,
    #[serde(alias = "name")]
    title: String,
    #[serde(alias = "date", alias = "startTime")]
    scheduled_for: DateTime<Utc>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    agenda: Option<String>,
    #[serde(default)]
    attendees: Vec<String>,
}

impl From<ApiMeeting> for Meeting {
    fn from(m: ApiMeeting) -> Self {
        Self {
            id: m.id,
            building_id: m.building_id,
            title: m.title,
            scheduled_for: m.scheduled_for,
            location: m.location,
            agenda: m.agenda,
            attendees: m.attendees,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCalendarEvent {
    #[serde(deserialize_with = "wire::id")]
    id: String,
    title: String,
    #[serde(alias = "start")]
    starts_at: DateTime<Utc>,
    #[serde(default, alias = "end")]
    ends_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    meeting_id: Option<String>,
}

impl From<ApiCalendarEvent> for CalendarEvent {
    fn from(e: ApiCalendarEvent) -> Self {
        Self {
            id: e.id,
            title: e.title,
            starts_at: e.starts_at,
            ends_at: e.ends_at,
            kind: e.kind.unwrap_or_else(|| "event".into()),
            meeting_id: e.meeting_id,
        }
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn list_meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        let raw: Vec<ApiMeeting> = self.send(self.request(Method::GET, "/api/v1/meeting")).await?;
        Ok(raw.into_iter().map(Meeting::from).collect())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    pub async fn calendar(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        let raw: Vec<ApiCalendarEvent> = self
            .send(self.request(Method::GET, "/api/v1/meeting/calendar"))
            .await?;
        Ok(raw.into_iter().map(CalendarEvent::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::decode_envelope;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_meeting_fixture() {
        let raw: Vec<ApiMeeting> = decode_envelope(
            br#"{"success":true,"data":[{"id":9,"buildingId":1,"title":"AGM",
                "date":"2024-06-12T18:30:00Z","location":"Community room",
                "attendees":["Priya Shah","Tom Reid"]}]}"#,
        )
        .unwrap();
        let meetings: Vec<Meeting> = raw.into_iter().map(Meeting::from).collect();
        assert_eq!(meetings[0].id, "9");
        assert_eq!(meetings[0].title, "AGM");
        assert_eq!(meetings[0].attendees.len(), 2);
        assert_eq!(meetings[0].agenda, None);
    }

    #[test]
    fn parse_calendar_fixture() {
        let raw: Vec<ApiCalendarEvent> = decode_envelope(
            br#"{"success":true,"data":[
                {"id":"c1","title":"AGM","start":"2024-06-12T18:30:00Z",
                 "end":"2024-06-12T20:00:00Z","type":"meeting","meetingId":9},
                {"id":"c2","title":"Window cleaning","start":"2024-06-20T08:00:00Z"}
            ]}"#,
        )
        .unwrap();
        let events: Vec<CalendarEvent> = raw.into_iter().map(CalendarEvent::from).collect();
        assert_eq!(events[0].kind, "meeting");
        assert_eq!(events[0].meeting_id.as_deref(), Some("9"));
        assert_eq!(events[1].kind, "event");
        assert_eq!(events[1].ends_at, None);
    }
}
