use super::Cli;
use crate::components::fixtures::{filter_by_year, Fixture, FixtureExtractor};
use crate::components::game_events::CreateReport;
use crate::components::{CalendarService, GameEventProcessor, ScheduleFetcher};
use crate::config::{Config, TeamSchedule};
use crate::error::SyncResult;
use scraper::Html;
use tracing::info;

/// Scrape the team's schedule page and create events for its fixtures
pub async fn run<C: CalendarService>(
    cli: &Cli,
    config: &Config,
    processor: &GameEventProcessor<C>,
    fetcher: &ScheduleFetcher,
) -> SyncResult<CreateReport> {
    let schedule = config.schedule_for(cli.team_name(config))?;

    let body = fetcher.fetch(&schedule.url).await?;
    let mut fixtures = scrape(&body, schedule, cli.limit)?;
    if let Some(year) = cli.year {
        fixtures = filter_by_year(fixtures, year);
    }
    info!("Found {} fixtures for {}", fixtures.len(), schedule.team_name);

    processor
        .create_game_events(
            &fixtures,
            schedule.attendees(cli.prod),
            !cli.include_past,
            cli.dry_run,
        )
        .await
}

/// Parse a schedule page into at most `limit` fixtures
pub fn scrape(body: &str, schedule: &TeamSchedule, limit: usize) -> SyncResult<Vec<Fixture>> {
    let document = Html::parse_document(body);
    FixtureExtractor::new()?
        .with_fallback_division(schedule.division.clone())
        .extract_at_most(&document, limit)
}
