use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};

/// How often expired report-cache entries are swept out.
const CACHE_PRUNE_INTERVAL: Duration = Duration::from_secs(3600);

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub anilist_url: String,
    pub cache_ttl: Duration,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(AppStateConfig {
        anilist_url: config.anilist_url.clone(),
        cache_ttl: config.cache_ttl,
    });

    // Spawn background report-cache prune task (hourly, removes expired)
    let report_cache = Arc::clone(&state.report_cache);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CACHE_PRUNE_INTERVAL);
        interval.tick().await; // first tick fires immediately; skip it
        loop {
            interval.tick().await;
            let count = report_cache.prune_expired();
            if count > 0 {
                info!(count, "pruned expired rewind reports");
            }
        }
    });

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        anilist = %config.anilist_url,
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
