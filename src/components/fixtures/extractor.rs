use super::models::Fixture;
use crate::error::{other_error, Error, SyncResult};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Wraps every match on the schedule page
pub const CONTAINER_SELECTOR: &str = "div.schedule";
pub const HOME_TEAM_SELECTOR: &str = "div.home_team";
pub const AWAY_TEAM_SELECTOR: &str = "div.away_team";
pub const DATE_SELECTOR: &str = "div.team_sorsolas_date";
pub const VENUE_SELECTOR: &str = "div.team_sorsolas_arena";
/// Page-level heading carrying the division name
pub const DIVISION_SELECTOR: &str = "div.team_sorsolas_title";

/// Number of fixtures converted when no limit is given
pub const DEFAULT_LIMIT: usize = 100;

/// Turns a parsed schedule page into fixtures
#[derive(Debug)]
pub struct FixtureExtractor {
    container: Selector,
    home_team: Selector,
    away_team: Selector,
    date: Selector,
    venue: Selector,
    division: Selector,
    fallback_division: Option<String>,
}

impl FixtureExtractor {
    /// Create an extractor for the adatbank schedule markup
    pub fn new() -> SyncResult<Self> {
        Ok(Self {
            container: selector(CONTAINER_SELECTOR)?,
            home_team: selector(HOME_TEAM_SELECTOR)?,
            away_team: selector(AWAY_TEAM_SELECTOR)?,
            date: selector(DATE_SELECTOR)?,
            venue: selector(VENUE_SELECTOR)?,
            division: selector(DIVISION_SELECTOR)?,
            fallback_division: None,
        })
    }

    /// Division to use when the page has no division heading
    pub fn with_fallback_division(mut self, division: impl Into<String>) -> Self {
        self.fallback_division = Some(division.into());
        self
    }

    /// Extract every fixture in document order
    pub fn extract(&self, document: &Html) -> SyncResult<Vec<Fixture>> {
        self.extract_at_most(document, usize::MAX)
    }

    /// Extract at most `limit` fixtures in document order.
    ///
    /// A container missing any field aborts the whole extraction, so a
    /// markup change never silently drops matches.
    pub fn extract_at_most(&self, document: &Html, limit: usize) -> SyncResult<Vec<Fixture>> {
        let mut containers = document.select(&self.container).peekable();
        if containers.peek().is_none() {
            // A heading without fixtures means the markup moved on
            if document.select(&self.division).next().is_some() {
                return Err(Error::MissingField {
                    field: "schedule",
                    index: 0,
                });
            }
            warn!("No fixtures found on schedule page");
            return Ok(Vec::new());
        }
        let containers: Vec<ElementRef> = containers.take(limit).collect();

        let division = self.division(document)?;
        debug!("Extracting {} fixtures of '{}'", containers.len(), division);

        containers
            .into_iter()
            .enumerate()
            .map(|(index, node)| self.fixture(node, index, &division))
            .collect()
    }

    fn division(&self, document: &Html) -> SyncResult<String> {
        let from_page = document
            .select(&self.division)
            .next()
            .map(text_of)
            .filter(|text| !text.is_empty());

        match (from_page, &self.fallback_division) {
            (Some(division), _) => Ok(division),
            (None, Some(fallback)) => {
                debug!("No division heading on page, using '{}'", fallback);
                Ok(fallback.clone())
            }
            (None, None) => Err(Error::MissingField {
                field: "division",
                index: 0,
            }),
        }
    }

    fn fixture(&self, node: ElementRef, index: usize, division: &str) -> SyncResult<Fixture> {
        let home_team = field(node, &self.home_team, "home_team", index)?;
        let away_team = field(node, &self.away_team, "away_team", index)?;
        let date = field(node, &self.date, "date", index)?;
        let venue = field(node, &self.venue, "venue", index)?;

        Fixture::new(home_team, away_team, venue, &date, division)
    }
}

/// Keep only fixtures kicking off in `year`
pub fn filter_by_year(fixtures: Vec<Fixture>, year: i32) -> Vec<Fixture> {
    fixtures
        .into_iter()
        .filter(|fixture| fixture.year() == year)
        .collect()
}

fn selector(css: &str) -> SyncResult<Selector> {
    Selector::parse(css).map_err(|e| other_error(&format!("Invalid selector '{}': {}", css, e)))
}

fn field(
    node: ElementRef,
    selector: &Selector,
    name: &'static str,
    index: usize,
) -> SyncResult<String> {
    node.select(selector)
        .next()
        .map(text_of)
        .ok_or(Error::MissingField { field: name, index })
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
