use crate::components::google_calendar::{EventPayload, RemoteEvent};
use crate::error::Error;

/// Where a fixture ended up after a create run
#[derive(Debug)]
pub enum Outcome {
    /// Kickoff not after the comparison date
    SkippedPast,
    /// Would have been created
    SkippedDryRun,
    /// Created remotely under this id
    Created(String),
    /// Remote insert failed; the run went on
    Failed(Error),
}

/// Result of a create run, one entry per fixture in input order
#[derive(Debug, Default)]
pub struct CreateReport {
    pub entries: Vec<(EventPayload, Outcome)>,
}

impl CreateReport {
    pub fn push(&mut self, payload: EventPayload, outcome: Outcome) {
        self.entries.push((payload, outcome));
    }

    pub fn created(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Created(_)))
    }

    pub fn skipped_past(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::SkippedPast))
    }

    pub fn skipped_dry_run(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::SkippedDryRun))
    }

    /// Payloads whose insert failed, with the reason
    pub fn failed(&self) -> Vec<(&EventPayload, &Error)> {
        self.entries
            .iter()
            .filter_map(|(payload, outcome)| match outcome {
                Outcome::Failed(error) => Some((payload, error)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| predicate(outcome))
            .count()
    }
}

/// Result of a delete run
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Removed from the calendar
    pub deleted: Vec<RemoteEvent>,
    /// Would have been removed (dry run)
    pub planned: Vec<RemoteEvent>,
    /// Past events left alone
    pub kept: usize,
}
