use super::models::{EventPayload, EventQuery, RemoteEvent, SendUpdates};
use super::service::CalendarService;
use super::token::TokenManager;
use super::wire::{EventList, GoogleEvent};
use crate::config::Config;
use crate::error::{remote_service_error, SyncResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info};
use url::Url;

/// Google Calendar REST endpoint
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// Largest page `events.list` hands out
const PAGE_SIZE: &str = "250";

/// Google Calendar backed [`CalendarService`]
#[derive(Clone)]
pub struct GoogleCalendarClient {
    calendar_id: String,
    base_url: String,
    token_manager: TokenManager,
    client: Client,
}

impl GoogleCalendarClient {
    pub fn new(config: &Config) -> Self {
        Self::with_token_manager(config, TokenManager::new(config))
    }

    pub fn with_token_manager(config: &Config, token_manager: TokenManager) -> Self {
        Self {
            calendar_id: config.google_calendar_id.clone(),
            base_url: GOOGLE_CALENDAR_API.to_string(),
            token_manager,
            client: Client::new(),
        }
    }

    /// Talk to another API root, e.g. a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `{base}/calendars/{calendar_id}/events[/{event_id}]` with segments escaped
    fn events_url(&self, event_id: Option<&str>) -> SyncResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| remote_service_error(&format!("Failed to parse URL: {}", e)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| remote_service_error("API base URL cannot have a path"))?;
            segments
                .pop_if_empty()
                .push("calendars")
                .push(&self.calendar_id)
                .push("events");
            if let Some(event_id) = event_id {
                segments.push(event_id);
            }
        }

        Ok(url)
    }

    async fn bearer(&self) -> SyncResult<String> {
        let access_token = self.token_manager.get_access_token().await?;
        Ok(format!("Bearer {}", access_token))
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn add_event(
        &self,
        event: &EventPayload,
        send_updates: SendUpdates,
    ) -> SyncResult<RemoteEvent> {
        let mut url = self.events_url(None)?;
        url.query_pairs_mut()
            .append_pair("sendUpdates", send_updates.as_str());

        let body = GoogleEvent::from(event);
        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer().await?)
            .json(&body)
            .send()
            .await
            .map_err(|e| remote_service_error(&format!("Failed to create event: {}", e)))?;

        let created: GoogleEvent = check_status(response, "create event")
            .await?
            .json()
            .await
            .map_err(|e| remote_service_error(&format!("Failed to parse created event: {}", e)))?;

        let created = RemoteEvent::try_from(created)?;
        info!("Event created: {} ({})", event.summary, created.id);

        Ok(created)
    }

    async fn list_events(&self, query: &EventQuery) -> SyncResult<Vec<RemoteEvent>> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.events_url(None)?;
            {
                let mut pairs = url.query_pairs_mut();
                pairs
                    .append_pair("singleEvents", "true")
                    .append_pair("orderBy", "startTime")
                    .append_pair("maxResults", PAGE_SIZE);
                if let Some((key, value)) = &query.shared_property {
                    pairs.append_pair("sharedExtendedProperty", &format!("{}={}", key, value));
                }
                if let Some(token) = &page_token {
                    pairs.append_pair("pageToken", token);
                }
            }

            debug!("Listing events: {}", url);
            let response = self
                .client
                .get(url)
                .header("Authorization", self.bearer().await?)
                .send()
                .await
                .map_err(|e| remote_service_error(&format!("Failed to fetch events: {}", e)))?;

            let page: EventList = check_status(response, "fetch events")
                .await?
                .json()
                .await
                .map_err(|e| {
                    remote_service_error(&format!("Failed to parse events response: {}", e))
                })?;

            for item in page.items {
                events.push(RemoteEvent::try_from(item)?);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} events", events.len());
        Ok(events)
    }

    async fn delete_event(
        &self,
        event: &RemoteEvent,
        send_updates: SendUpdates,
    ) -> SyncResult<()> {
        let mut url = self.events_url(Some(&event.id))?;
        url.query_pairs_mut()
            .append_pair("sendUpdates", send_updates.as_str());

        let response = self
            .client
            .delete(url)
            .header("Authorization", self.bearer().await?)
            .send()
            .await
            .map_err(|e| remote_service_error(&format!("Failed to delete event: {}", e)))?;

        // Already gone counts as deleted
        if response.status() == StatusCode::GONE {
            debug!("Event {} was already deleted", event.id);
            return Ok(());
        }

        check_status(response, "delete event").await?;
        Ok(())
    }
}

/// Turn a non-2xx response into an error carrying status and body
async fn check_status(response: Response, action: &str) -> SyncResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response".to_string());
    Err(remote_service_error(&format!(
        "Failed to {}: HTTP {} - {}",
        action, status, error_body
    )))
}
