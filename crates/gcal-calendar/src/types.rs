//! Calendar API request shapes and synthesized result records.
//!
//! Response payloads are handed back as `serde_json::Value`; these types cover
//! what callers send and the records built for body-less responses.

use serde::{Deserialize, Serialize};

use crate::rest::QueryParams;

/// Start or end of an event: a timestamp, or a date for all-day events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// RFC 3339, e.g. `2016-04-29T14:00:00+08:00`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// `yyyy-mm-dd`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }
}

/// Event status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

/// Event attendee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
}

impl Attendee {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            optional: None,
            response_status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderOverride {
    /// `email` or `popup`
    pub method: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<ReminderOverride>>,
}

/// Body for `Events.insert` / `Events.update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub summary: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Reminders>,
    /// RRULE/EXRULE/RDATE/EXDATE lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,
}

impl EventInput {
    pub fn new(summary: impl Into<String>, start: EventDateTime, end: EventDateTime) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            location: None,
            status: None,
            description: None,
            color_id: None,
            attendees: None,
            reminders: None,
            recurrence: None,
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn color_id(mut self, color_id: impl Into<String>) -> Self {
        self.color_id = Some(color_id.into());
        self
    }

    pub fn attendees(mut self, attendees: Vec<Attendee>) -> Self {
        self.attendees = Some(attendees);
        self
    }

    pub fn reminders(mut self, reminders: Reminders) -> Self {
        self.reminders = Some(reminders);
        self
    }

    pub fn recurrence(mut self, rules: Vec<String>) -> Self {
        self.recurrence = Some(rules);
        self
    }
}

/// Query for `Events.list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventListQuery {
    pub time_min: Option<String>,
    pub time_max: Option<String>,
    pub q: Option<String>,
    pub single_events: Option<bool>,
    /// `startTime` (requires `single_events`) or `updated`
    pub order_by: Option<String>,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
    pub show_deleted: Option<bool>,
    pub time_zone: Option<String>,
}

impl EventListQuery {
    pub fn between(time_min: impl Into<String>, time_max: impl Into<String>) -> Self {
        Self {
            time_min: Some(time_min.into()),
            time_max: Some(time_max.into()),
            ..Self::default()
        }
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Expand recurring events and order by start time.
    pub fn expanded(mut self) -> Self {
        self.single_events = Some(true);
        self.order_by = Some("startTime".to_string());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .set_opt("timeMin", self.time_min.as_deref())
            .set_opt("timeMax", self.time_max.as_deref())
            .set_opt("q", self.q.as_deref())
            .set_opt("singleEvents", self.single_events)
            .set_opt("orderBy", self.order_by.as_deref())
            .set_opt("maxResults", self.max_results)
            .set_opt("pageToken", self.page_token.as_deref())
            .set_opt("showDeleted", self.show_deleted)
            .set_opt("timeZone", self.time_zone.as_deref())
    }
}

/// Options for `Events.delete`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    pub send_notifications: Option<bool>,
}

impl DeleteOptions {
    pub fn to_query(self) -> QueryParams {
        QueryParams::new().set_opt("sendNotifications", self.send_notifications)
    }
}

/// Push-notification channel registration (`.../watch`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Unix time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
}

impl WatchRequest {
    pub fn web_hook(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "web_hook".to_string(),
            address: address.into(),
            token: None,
            expiration: None,
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn expiration(mut self, expiration_ms: i64) -> Self {
        self.expiration = Some(expiration_ms);
        self
    }
}

/// Time range for `FreeBusy.query`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeBusyQuery {
    pub time_min: String,
    pub time_max: String,
    /// Defaults to the client's configured timezone
    pub time_zone: Option<String>,
}

impl FreeBusyQuery {
    pub fn new(time_min: impl Into<String>, time_max: impl Into<String>) -> Self {
        Self {
            time_min: time_min.into(),
            time_max: time_max.into(),
            time_zone: None,
        }
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

/// Body for `Channels.stop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStop {
    pub id: String,
    pub resource_id: String,
}

impl ChannelStop {
    pub fn new(id: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_id: resource_id.into(),
        }
    }
}

/// Result of a successful delete (204, no body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub id: String,
    pub status_code: u16,
    pub status_message: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRuleDeleted {
    pub rule_id: String,
    pub calendar_id: String,
    pub status_code: u16,
    pub status_message: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cleared {
    pub calendar_id: String,
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStopped {
    pub id: String,
    pub resource_id: String,
    pub status_code: u16,
    pub status_message: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_input_wire_shape() {
        let event = EventInput::new(
            "Room booking",
            EventDateTime::at("2016-04-29T14:00:00+08:00"),
            EventDateTime::at("2016-04-29T18:00:00+08:00"),
        )
        .location("Level 3")
        .status(EventStatus::Tentative)
        .color_id("5");

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "summary": "Room booking",
                "start": {"dateTime": "2016-04-29T14:00:00+08:00"},
                "end": {"dateTime": "2016-04-29T18:00:00+08:00"},
                "location": "Level 3",
                "status": "tentative",
                "colorId": "5"
            })
        );
    }

    #[test]
    fn test_reminders_and_attendees_camel_case() {
        let event = EventInput::new(
            "Review",
            EventDateTime::all_day("2016-05-02"),
            EventDateTime::all_day("2016-05-03"),
        )
        .attendees(vec![Attendee::new("a@example.com")])
        .reminders(Reminders {
            use_default: false,
            overrides: Some(vec![ReminderOverride {
                method: "popup".into(),
                minutes: 10,
            }]),
        })
        .recurrence(vec!["RRULE:FREQ=WEEKLY;COUNT=4".into()]);

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["start"], json!({"date": "2016-05-02"}));
        assert_eq!(value["attendees"][0], json!({"email": "a@example.com"}));
        assert_eq!(value["reminders"]["useDefault"], false);
        assert_eq!(value["reminders"]["overrides"][0]["minutes"], 10);
        assert_eq!(value["recurrence"][0], "RRULE:FREQ=WEEKLY;COUNT=4");
    }

    #[test]
    fn test_event_list_query_params() {
        let query = EventListQuery::between("2016-04-29T14:00:00+08:00", "2016-04-29T18:00:00+08:00")
            .search("standup")
            .expanded()
            .to_query();

        assert_eq!(query.get("timeMin"), Some("2016-04-29T14:00:00+08:00"));
        assert_eq!(query.get("timeMax"), Some("2016-04-29T18:00:00+08:00"));
        assert_eq!(query.get("q"), Some("standup"));
        assert_eq!(query.get("singleEvents"), Some("true"));
        assert_eq!(query.get("orderBy"), Some("startTime"));
        assert_eq!(query.get("pageToken"), None);
    }

    #[test]
    fn test_watch_request_type_field() {
        let watch = WatchRequest::web_hook("chan-1", "https://example.com/notify").token("t");
        let value = serde_json::to_value(&watch).unwrap();
        assert_eq!(value["type"], "web_hook");
        assert_eq!(value["token"], "t");
        assert!(value.get("expiration").is_none());
    }

    #[test]
    fn test_deleted_record_camel_case() {
        let record = Deleted {
            id: "e1".into(),
            status_code: 204,
            status_message: Some("No Content".into()),
            message: "Event deleted successfully".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["statusCode"], 204);
        assert_eq!(value["statusMessage"], "No Content");
    }
}
