//! gofile - command-line client for the Gofile file-hosting service

use clap::Parser;
use gofile_cli::{run, Cli};
use gofile_client::GofileClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let log_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("gofile_cli={0},gofile_client={0}", log_level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.client_config();
    tracing::debug!("API: {}", config.api_url);
    if config.token.is_none() {
        tracing::info!("No token configured, running as guest");
    }

    let client = GofileClient::new(config).await?;
    tracing::info!("Using storage server {}", client.server());

    run(&client, cli.command).await
}
