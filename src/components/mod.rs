// Export components
pub mod fixtures;
pub mod game_events;
pub mod google_calendar;

// Re-export the pieces the commands wire together
pub use fixtures::{Fixture, FixtureExtractor, ScheduleFetcher};
pub use game_events::{EventSynthesizer, GameEventProcessor};
pub use google_calendar::{CalendarService, GoogleCalendarClient};
