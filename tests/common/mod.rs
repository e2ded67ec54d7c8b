#![allow(dead_code)]

use async_trait::async_trait;
use blsz_sync::components::google_calendar::{
    CalendarService, EventPayload, EventQuery, RemoteEvent, SendUpdates,
};
use blsz_sync::error::{remote_service_error, SyncResult};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory calendar recording every call made against it
#[derive(Debug, Clone, Default)]
pub struct MockCalendar {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    events: Vec<RemoteEvent>,
    added: Vec<EventPayload>,
    deleted: Vec<String>,
    list_calls: usize,
    fail_summaries: HashSet<String>,
    next_id: usize,
}

impl MockCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar already holding these generated events
    pub fn with_events(events: Vec<RemoteEvent>) -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().events = events;
        mock
    }

    /// Make inserts of this summary fail
    pub fn fail_on(self, summary: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_summaries
            .insert(summary.to_string());
        self
    }

    pub fn added(&self) -> Vec<EventPayload> {
        self.state.lock().unwrap().added.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn remaining(&self) -> Vec<RemoteEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Total number of remote calls
    pub fn calls(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.added.len() + state.deleted.len() + state.list_calls
    }
}

#[async_trait]
impl CalendarService for MockCalendar {
    async fn add_event(
        &self,
        event: &EventPayload,
        _send_updates: SendUpdates,
    ) -> SyncResult<RemoteEvent> {
        let mut state = self.state.lock().unwrap();
        state.added.push(event.clone());

        if state.fail_summaries.contains(&event.summary) {
            return Err(remote_service_error("Failed to create event: HTTP 500"));
        }

        state.next_id += 1;
        let created = RemoteEvent {
            id: format!("event{}", state.next_id),
            summary: Some(event.summary.clone()),
            start: Some(event.start.fixed_offset()),
        };
        state.events.push(created.clone());
        Ok(created)
    }

    async fn list_events(&self, _query: &EventQuery) -> SyncResult<Vec<RemoteEvent>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        Ok(state.events.clone())
    }

    async fn delete_event(
        &self,
        event: &RemoteEvent,
        _send_updates: SendUpdates,
    ) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.deleted.push(event.id.clone());
        state.events.retain(|existing| existing.id != event.id);
        Ok(())
    }
}

/// Generated event starting at the given UTC time
pub fn remote_event(id: &str, summary: &str, start: DateTime<Utc>) -> RemoteEvent {
    RemoteEvent {
        id: id.to_string(),
        summary: Some(summary.to_string()),
        start: Some(start.fixed_offset()),
    }
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}
