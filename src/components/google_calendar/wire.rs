//! Google Calendar v3 event resource, only the fields we read or write.

use super::models::{EventPayload, RemoteEvent};
use super::time::parse_event_start;
use crate::error::SyncResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format of `dateTime` when an explicit `timeZone` accompanies it
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<EventAttendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Reminders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<ExtendedProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    #[serde(default)]
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub public: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub private: BTreeMap<String, String>,
}

/// One page of `events.list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

impl From<&EventPayload> for GoogleEvent {
    fn from(payload: &EventPayload) -> Self {
        let time_zone = payload.start.timezone().name().to_string();
        let (marker_key, marker_value) = payload.marker;

        GoogleEvent {
            id: None,
            summary: Some(payload.summary.clone()),
            description: Some(payload.description.clone()),
            location: Some(payload.location.clone()),
            start: Some(EventDateTime {
                date_time: Some(payload.start.format(LOCAL_DATE_TIME_FORMAT).to_string()),
                date: None,
                time_zone: Some(time_zone.clone()),
            }),
            end: Some(EventDateTime {
                date_time: Some(payload.end.format(LOCAL_DATE_TIME_FORMAT).to_string()),
                date: None,
                time_zone: Some(time_zone),
            }),
            attendees: payload
                .attendees
                .iter()
                .map(|email| EventAttendee {
                    email: email.clone(),
                })
                .collect(),
            reminders: Some(Reminders {
                use_default: payload.reminders.use_default,
                overrides: payload
                    .reminders
                    .overrides
                    .iter()
                    .map(|r| ReminderOverride {
                        method: r.method.as_str().to_string(),
                        minutes: r.minutes,
                    })
                    .collect(),
            }),
            extended_properties: Some(ExtendedProperties {
                public: BTreeMap::from([(marker_key.to_string(), marker_value.to_string())]),
                private: BTreeMap::new(),
            }),
        }
    }
}

impl TryFrom<GoogleEvent> for RemoteEvent {
    type Error = crate::error::Error;

    fn try_from(event: GoogleEvent) -> SyncResult<Self> {
        let start = match &event.start {
            Some(start) => parse_event_start(start)?,
            None => None,
        };

        Ok(RemoteEvent {
            id: event.id.unwrap_or_default(),
            summary: event.summary,
            start,
        })
    }
}
