use crate::components::google_calendar::RemoteEvent;
use crate::components::{CalendarService, GameEventProcessor};
use crate::error::SyncResult;
use tracing::info;

/// Generated events that are still ahead
pub async fn run<C: CalendarService>(
    processor: &GameEventProcessor<C>,
) -> SyncResult<Vec<RemoteEvent>> {
    let events = processor.get_game_events(true).await?;
    if events.is_empty() {
        info!("No upcoming events found.");
    }
    Ok(events)
}

/// One line per event: start, summary, id
pub fn render(events: &[RemoteEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let start = event
                .start
                .map(|start| start.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{}  {}  ({})",
                start,
                event.summary.as_deref().unwrap_or("<untitled>"),
                event.id
            )
        })
        .collect()
}
