mod processor;
mod report;
mod synthesizer;

pub use processor::{Clock, GameEventProcessor};
pub use report::{CreateReport, DeleteReport, Outcome};
pub use synthesizer::{
    EventSynthesizer, MATCH_DURATION_MINUTES, PLAYER_ARRIVAL_MINUTES, STEWARD_ARRIVAL_MINUTES,
};
