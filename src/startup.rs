use crate::commands::{self, Cli};
use crate::components::{EventSynthesizer, GameEventProcessor, GoogleCalendarClient, ScheduleFetcher};
use crate::config::Config;
use crate::error::Error;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,html5ever=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config(path: &Path) -> miette::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up the Google client and run the selected mode
pub async fn run(cli: Cli, config: Config) -> miette::Result<()> {
    info!(
        "Running mode {:?} for calendar {} (dry run: {})",
        cli.mode, config.google_calendar_id, cli.dry_run
    );

    let processor = GameEventProcessor::new(
        GoogleCalendarClient::new(&config),
        EventSynthesizer::from_config(&config),
    )
    .with_create_delay(config.create_delay);
    let fetcher = ScheduleFetcher::new();

    commands::run(&cli, &config, &processor, &fetcher).await?;

    info!("Done");
    Ok(())
}
