use crate::error::{format_error, SyncResult};
use chrono::{Datelike, NaiveDateTime};

/// Kickoff text as printed on the schedule page, e.g. `2023. 08. 18.  20:00`
pub const KICKOFF_FORMAT: &str = "%Y. %m. %d.  %H:%M";

/// One scheduled match as published by the source website
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    /// Local wall-clock kickoff, no timezone attached
    pub kickoff: NaiveDateTime,
    pub division: String,
}

impl Fixture {
    /// Build a fixture from the scraped date text
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        venue: impl Into<String>,
        date_text: &str,
        division: impl Into<String>,
    ) -> SyncResult<Self> {
        Ok(Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            venue: venue.into(),
            kickoff: parse_kickoff(date_text)?,
            division: division.into(),
        })
    }

    /// Year the match kicks off in
    pub fn year(&self) -> i32 {
        self.kickoff.year()
    }
}

/// Exact layout of kickoff text, `d` standing for any ASCII digit
const KICKOFF_SHAPE: &[u8] = b"dddd. dd. dd.  dd:dd";

/// Parse kickoff text in [`KICKOFF_FORMAT`]
pub fn parse_kickoff(text: &str) -> SyncResult<NaiveDateTime> {
    // chrono lets a format space match any run of whitespace, even none
    if !has_kickoff_shape(text) {
        return Err(format_error(&format!(
            "Unparsable kickoff '{}': expected YYYY. MM. DD.  HH:MM",
            text
        )));
    }

    NaiveDateTime::parse_from_str(text, KICKOFF_FORMAT)
        .map_err(|e| format_error(&format!("Unparsable kickoff '{}': {}", text, e)))
}

fn has_kickoff_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == KICKOFF_SHAPE.len()
        && bytes
            .iter()
            .zip(KICKOFF_SHAPE)
            .all(|(&byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                _ => byte == expected,
            })
}
