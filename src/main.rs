//! Countdown Clock - HTTP demo consumer
//!
//! Counts down toward the configured target and exposes the snapshot plus
//! start/pause controls over HTTP.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_clock::{
    api::create_router,
    config::Config,
    countdown::TokioScheduler,
    delta::{Clock, SystemClock},
    state::AppState,
    tasks::progress_reporter_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-clock v{}", env!("CARGO_PKG_VERSION"));

    let clock = Arc::new(SystemClock);
    let target = config.resolve_target(clock.now());
    let scheduler = Arc::new(TokioScheduler::current()?);

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        target,
        config.auto_start(),
        clock,
        scheduler,
    )?);

    if let Some(target) = state.target_time() {
        info!("Counting down to {} (auto start: {})", target.to_rfc3339(), config.auto_start());
    }

    tokio::spawn(progress_reporter_task(state.subscribe()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /countdown - Current snapshot");
    info!("  POST /start     - Start or resume the countdown");
    info!("  POST /pause     - Pause the countdown");
    info!("  GET  /status    - Countdown and server status");
    info!("  GET  /health    - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
