mod extractor;
mod fetch;
pub mod models;

pub use extractor::{filter_by_year, FixtureExtractor, DEFAULT_LIMIT};
pub use fetch::ScheduleFetcher;
pub use models::{parse_kickoff, Fixture, KICKOFF_FORMAT};
