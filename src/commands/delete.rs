use super::Cli;
use crate::components::game_events::DeleteReport;
use crate::components::{CalendarService, GameEventProcessor};
use crate::error::{config_error, SyncResult};
use tracing::info;

/// Remove generated events that have not started yet.
///
/// A real delete needs `--confirm`; without it only `--dry-run` is allowed.
pub async fn run<C: CalendarService>(
    cli: &Cli,
    processor: &GameEventProcessor<C>,
) -> SyncResult<DeleteReport> {
    if !cli.dry_run && !cli.confirm {
        return Err(config_error(
            "Delete needs --confirm (or --dry-run to preview)",
        ));
    }

    let report = processor.delete_game_events(cli.dry_run).await?;
    info!(
        "Delete finished: {} deleted, {} planned, {} past kept",
        report.deleted.len(),
        report.planned.len(),
        report.kept
    );

    Ok(report)
}
