use super::models::{EventPayload, EventQuery, RemoteEvent, SendUpdates};
use crate::error::SyncResult;
use async_trait::async_trait;

/// Operations the sync needs from a remote calendar
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Insert a new event and return it as stored remotely
    async fn add_event(
        &self,
        event: &EventPayload,
        send_updates: SendUpdates,
    ) -> SyncResult<RemoteEvent>;

    /// List every event matching the query
    async fn list_events(&self, query: &EventQuery) -> SyncResult<Vec<RemoteEvent>>;

    /// Remove an event
    async fn delete_event(&self, event: &RemoteEvent, send_updates: SendUpdates)
        -> SyncResult<()>;
}
