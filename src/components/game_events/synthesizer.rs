use crate::components::fixtures::Fixture;
use crate::components::google_calendar::{EventPayload, ReminderPolicy, MARKER_KEY, MARKER_VALUE};
use crate::config::Config;
use crate::error::{format_error, SyncResult};
use chrono::{DateTime, Duration, LocalResult, TimeZone};
use chrono_tz::Tz;

/// Length of a match slot on the calendar
pub const MATCH_DURATION_MINUTES: i64 = 120;
/// Players arrive this long before kickoff
pub const PLAYER_ARRIVAL_MINUTES: i64 = 75;
/// Stewards arrive this long before a home kickoff
pub const STEWARD_ARRIVAL_MINUTES: i64 = 45;

const MEETING_POINT_NOTICE: &str = "TALÁLKOZÓ A MEGBESZÉLT IDŐBEN A MEGBESZÉLT HELYEN!";

/// Derives calendar events from fixtures
#[derive(Debug, Clone)]
pub struct EventSynthesizer {
    home_team_name: String,
    timezone: Tz,
}

impl EventSynthesizer {
    pub fn new(home_team_name: impl Into<String>, timezone: Tz) -> Self {
        Self {
            home_team_name: home_team_name.into(),
            timezone,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.home_team_name.clone(), config.timezone)
    }

    /// Exact string match against the configured home team.
    ///
    /// Spelling variants on the schedule page ("XII. KERÜLET SVÁBHEGY FC" vs
    /// "Svábhegy FC") count as away games.
    pub fn is_home_game(&self, fixture: &Fixture) -> bool {
        fixture.home_team == self.home_team_name
    }

    /// Kickoff localized to the configured timezone
    pub fn start(&self, fixture: &Fixture) -> SyncResult<DateTime<Tz>> {
        match self.timezone.from_local_datetime(&fixture.kickoff) {
            LocalResult::Single(dt) => Ok(dt),
            // Autumn DST overlap: take the first occurrence
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => Err(format_error(&format!(
                "Kickoff {} does not exist in {}",
                fixture.kickoff,
                self.timezone.name()
            ))),
        }
    }

    /// Build the event payload for a fixture
    pub fn synthesize(&self, fixture: &Fixture, attendees: &[String]) -> SyncResult<EventPayload> {
        let start = self.start(fixture)?;
        let end = start + Duration::minutes(MATCH_DURATION_MINUTES);

        Ok(EventPayload {
            summary: format!("{} - {}", fixture.home_team, fixture.away_team),
            description: self.description(fixture, &start),
            location: fixture.venue.clone(),
            start,
            end,
            attendees: unique(attendees),
            reminders: ReminderPolicy::fixture_reminders(),
            marker: (MARKER_KEY, MARKER_VALUE),
        })
    }

    fn description(&self, fixture: &Fixture, start: &DateTime<Tz>) -> String {
        let arrival = *start - Duration::minutes(PLAYER_ARRIVAL_MINUTES);

        let mut description = format!(
            "{} bajnoki mérkőzés\n\nÉrkezés játékosoknak: {}\n",
            fixture.division,
            arrival.format("%H:%M")
        );

        if self.is_home_game(fixture) {
            let steward = *start - Duration::minutes(STEWARD_ARRIVAL_MINUTES);
            description.push_str(&format!("Érkezés rendezőknek: {}\n", steward.format("%H:%M")));
        }

        description.push('\n');
        description.push_str(MEETING_POINT_NOTICE);
        description
    }
}

/// Drop repeated addresses, keeping first occurrences in order
fn unique(attendees: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(attendees.len());
    for email in attendees {
        if !seen.contains(email) {
            seen.push(email.clone());
        }
    }
    seen
}
