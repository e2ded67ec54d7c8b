use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

/// Extended property key marking events created by this tool
pub const MARKER_KEY: &str = "scraper_automatic_event";
/// Value stored under [`MARKER_KEY`]
pub const MARKER_VALUE: &str = "yes";

/// How a reminder reaches the attendee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderMethod {
    Email,
    Popup,
}

impl ReminderMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderMethod::Email => "email",
            ReminderMethod::Popup => "popup",
        }
    }
}

/// A single reminder override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub method: ReminderMethod,
    pub minutes: u32,
}

/// Reminder settings of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPolicy {
    pub use_default: bool,
    pub overrides: Vec<Reminder>,
}

impl ReminderPolicy {
    /// Email two days ahead, popup one day ahead, calendar defaults off.
    ///
    /// Google ignores the popup for invited attendees; only the calendar
    /// owner sees it.
    pub fn fixture_reminders() -> Self {
        Self {
            use_default: false,
            overrides: vec![
                Reminder {
                    method: ReminderMethod::Email,
                    minutes: 48 * 60,
                },
                Reminder {
                    method: ReminderMethod::Popup,
                    minutes: 24 * 60,
                },
            ],
        }
    }
}

/// Calendar-ready representation of a fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub attendees: Vec<String>,
    pub reminders: ReminderPolicy,
    /// Public extended property identifying generated events
    pub marker: (&'static str, &'static str),
}

/// Event as it exists on the remote calendar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<DateTime<FixedOffset>>,
}

impl RemoteEvent {
    /// True when the event starts strictly after `now`
    pub fn starts_after<T: chrono::TimeZone>(&self, now: &DateTime<T>) -> bool {
        self.start.is_some_and(|start| start > *now)
    }
}

/// Who Google notifies about a change; generated events never notify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendUpdates {
    None,
}

impl SendUpdates {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendUpdates::None => "none",
        }
    }
}

/// Filters for listing events
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventQuery {
    /// Public extended property the events must carry
    pub shared_property: Option<(String, String)>,
}

impl EventQuery {
    /// Events created by this tool
    pub fn generated_events() -> Self {
        Self {
            shared_property: Some((MARKER_KEY.to_string(), MARKER_VALUE.to_string())),
        }
    }
}
