mod client;
pub mod models;
mod service;
mod time;
pub mod token;
pub mod wire;

pub use client::{GoogleCalendarClient, GOOGLE_CALENDAR_API};
pub use models::{
    EventPayload, EventQuery, RemoteEvent, Reminder, ReminderMethod, ReminderPolicy, SendUpdates,
    MARKER_KEY, MARKER_VALUE,
};
pub use service::CalendarService;
pub use token::TokenManager;
