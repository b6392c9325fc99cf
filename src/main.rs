use std::time::Duration;

use anirewind::application::{ServerConfig, serve};
use anirewind::infrastructure::client::RewindClient;
use anirewind::presentation::cli::{Cli, Commands, ServeCommand, run_rewind, run_share};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        Commands::Rewind(cmd) => {
            let client = RewindClient::from_base_url(&cli.api_url)?;
            run_rewind(&client, cmd).await
        }
        Commands::Share(cmd) => {
            let client = RewindClient::from_base_url(&cli.api_url)?;
            run_share(&client, cmd).await
        }
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    let config = ServerConfig {
        bind_address: command.bind_address,
        anilist_url: command.anilist_url,
        cache_ttl: Duration::from_secs(command.cache_ttl_secs),
    };

    serve(config).await
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
