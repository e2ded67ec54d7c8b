use crate::components::fixtures::DEFAULT_LIMIT;
use crate::components::{CalendarService, GameEventProcessor, ScheduleFetcher};
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::error::SyncResult;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

// Export submodules
pub mod create;
pub mod delete;
pub mod read;

/// What to do with the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Scrape fixtures and create events
    #[value(name = "C", alias = "c")]
    Create,
    /// List generated events that are still ahead
    #[value(name = "R", alias = "r")]
    Read,
    /// Update existing events (unsupported)
    #[value(name = "U", alias = "u")]
    Update,
    /// Delete generated events that are still ahead
    #[value(name = "D", alias = "d")]
    Delete,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "blsz-sync")]
#[command(about = "Sync MLSZ adatbank fixtures to Google Calendar")]
pub struct Cli {
    /// C(reate), R(ead), U(pdate) or D(elete)
    #[arg(short, long, value_enum)]
    pub mode: Mode,

    /// Process at most this many fixtures
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Only report what would change
    #[arg(long)]
    pub dry_run: bool,

    /// Team from the config file, defaults to TEAM_NAME.
    /// TEAM_NAME must be set either way, it decides which games are home games.
    #[arg(short, long)]
    pub team: Option<String>,

    /// Only fixtures kicking off in this year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Invite the production attendee list instead of the test one
    #[arg(long)]
    pub prod: bool,

    /// Also create events for fixtures that already kicked off
    #[arg(long)]
    pub include_past: bool,

    /// Required to actually delete events
    #[arg(long)]
    pub confirm: bool,

    /// Schedule file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl Cli {
    /// Team whose schedule is processed
    pub fn team_name<'a>(&'a self, config: &'a Config) -> &'a str {
        self.team.as_deref().unwrap_or(&config.home_team_name)
    }
}

/// Run the selected mode
pub async fn run<C: CalendarService>(
    cli: &Cli,
    config: &Config,
    processor: &GameEventProcessor<C>,
    fetcher: &ScheduleFetcher,
) -> SyncResult<()> {
    match cli.mode {
        Mode::Create => {
            let report = create::run(cli, config, processor, fetcher).await?;
            let failed = report.failed();
            if !failed.is_empty() {
                warn!("{} events could not be created", failed.len());
                for (payload, error) in failed {
                    warn!("  {} at {}: {}", payload.summary, payload.start, error);
                }
            }
            Ok(())
        }
        Mode::Read => {
            let events = read::run(processor).await?;
            for line in read::render(&events) {
                println!("{}", line);
            }
            Ok(())
        }
        Mode::Update => processor.update_game_events(&[], cli.dry_run).await,
        Mode::Delete => {
            delete::run(cli, processor).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parses_modes_and_defaults() {
        let cli = Cli::try_parse_from(["blsz-sync", "--mode", "C"]).unwrap();
        assert_eq!(cli.mode, Mode::Create);
        assert_eq!(cli.limit, 100);
        assert!(!cli.dry_run);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));

        let cli = Cli::try_parse_from([
            "blsz-sync", "-m", "D", "--dry-run", "--limit", "5", "--year", "2024",
        ])
        .unwrap();
        assert_eq!(cli.mode, Mode::Delete);
        assert!(cli.dry_run);
        assert_eq!(cli.limit, 5);
        assert_eq!(cli.year, Some(2024));
    }

    #[test]
    fn team_help_says_team_name_is_required() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("TEAM_NAME must be set either way"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["blsz-sync", "--mode", "X"]).is_err());
        assert!(Cli::try_parse_from(["blsz-sync"]).is_err());
    }
}
