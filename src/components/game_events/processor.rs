use super::report::{CreateReport, DeleteReport, Outcome};
use super::synthesizer::EventSynthesizer;
use crate::components::fixtures::Fixture;
use crate::components::google_calendar::{CalendarService, EventQuery, RemoteEvent, SendUpdates};
use crate::config::DEFAULT_CREATE_DELAY_SECS;
use crate::error::{format_error, Error, SyncResult};
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;
use tracing::{error, info, warn};

/// Source of the current time
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Syncs fixtures with the remote calendar, one call at a time
pub struct GameEventProcessor<C> {
    calendar: C,
    synthesizer: EventSynthesizer,
    create_delay: Duration,
    clock: Clock,
}

impl<C: CalendarService> GameEventProcessor<C> {
    pub fn new(calendar: C, synthesizer: EventSynthesizer) -> Self {
        Self {
            calendar,
            synthesizer,
            create_delay: Duration::from_secs(DEFAULT_CREATE_DELAY_SECS),
            clock: Box::new(Utc::now),
        }
    }

    /// Pause between two inserts, keeps us under the API rate limit
    pub fn with_create_delay(mut self, create_delay: Duration) -> Self {
        self.create_delay = create_delay;
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Create events for fixtures.
    ///
    /// With `apply_date_filter` only fixtures kicking off after now are
    /// created, otherwise anything after 2000-01-01. Every payload is built
    /// before the first insert, so a fixture that cannot be synthesized fails
    /// the run with nothing written. Failed inserts are recorded and the run
    /// continues. Nothing checks for existing copies, so re-running after a
    /// partial failure can duplicate events.
    pub async fn create_game_events(
        &self,
        fixtures: &[Fixture],
        attendees: &[String],
        apply_date_filter: bool,
        dry_run: bool,
    ) -> SyncResult<CreateReport> {
        let mut report = CreateReport::default();
        let mut calls_made = 0usize;

        let payloads = fixtures
            .iter()
            .map(|fixture| self.synthesizer.synthesize(fixture, attendees))
            .collect::<SyncResult<Vec<_>>>()?;

        for payload in payloads {
            let tz = payload.start.timezone();
            let compare_date = if apply_date_filter {
                (self.clock)().with_timezone(&tz)
            } else {
                tz.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
                    .earliest()
                    .ok_or_else(|| format_error("Cannot build comparison date"))?
            };

            if payload.start <= compare_date {
                warn!("Skipping past event: {} at {}", payload.summary, payload.start);
                report.push(payload, Outcome::SkippedPast);
                continue;
            }

            info!(
                "Creating event: {} at {} in dry_run mode: {}",
                payload.summary, payload.start, dry_run
            );
            if dry_run {
                report.push(payload, Outcome::SkippedDryRun);
                continue;
            }

            if calls_made > 0 && !self.create_delay.is_zero() {
                tokio::time::sleep(self.create_delay).await;
            }
            calls_made += 1;

            let outcome = match self.calendar.add_event(&payload, SendUpdates::None).await {
                Ok(created) => Outcome::Created(created.id),
                Err(e) => {
                    error!("Error creating event {}: {}", payload.summary, e);
                    Outcome::Failed(e)
                }
            };
            report.push(payload, outcome);
        }

        info!(
            "Create finished: {} created, {} failed, {} past, {} dry run",
            report.created(),
            report.failed().len(),
            report.skipped_past(),
            report.skipped_dry_run()
        );

        Ok(report)
    }

    /// Events this tool created, optionally only those still ahead
    pub async fn get_game_events(&self, apply_date_filter: bool) -> SyncResult<Vec<RemoteEvent>> {
        let events = self
            .calendar
            .list_events(&EventQuery::generated_events())
            .await?;

        if !apply_date_filter {
            return Ok(events);
        }

        let now = (self.clock)();
        Ok(events
            .into_iter()
            .filter(|event| event.starts_after(&now))
            .collect())
    }

    /// Delete generated events that have not started yet
    pub async fn delete_game_events(&self, dry_run: bool) -> SyncResult<DeleteReport> {
        let mut report = DeleteReport::default();
        let now = (self.clock)();

        for event in self
            .calendar
            .list_events(&EventQuery::generated_events())
            .await?
        {
            if !event.starts_after(&now) {
                report.kept += 1;
                continue;
            }

            info!(
                "Deleting event: {} ({}) in dry_run mode: {}",
                event.summary.as_deref().unwrap_or("<untitled>"),
                event.id,
                dry_run
            );
            if dry_run {
                report.planned.push(event);
            } else {
                self.calendar.delete_event(&event, SendUpdates::None).await?;
                report.deleted.push(event);
            }
        }

        Ok(report)
    }

    /// Updating existing events is not supported
    pub async fn update_game_events(&self, _fixtures: &[Fixture], _dry_run: bool) -> SyncResult<()> {
        Err(Error::NotImplemented(
            "Update mode is not implemented yet.".to_string(),
        ))
    }
}
