use blsz_sync::commands::Cli;
use blsz_sync::startup;
use clap::Parser;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();
    info!("Starting blsz-sync");

    // Load configuration
    let config = startup::load_config(&cli.config)?;

    startup::run(cli, config).await
}
