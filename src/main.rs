//! Epoch Desk - clocks and offset epoch calculators
//!
//! This is the main entry point for the epoch-desk application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use epoch_desk::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{SystemClock, Ticker},
    tasks::tick_driver_task,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("epoch_desk={},tower_http=info", config.log_level()))
        .init();

    info!("Starting epoch-desk v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let clipboard = config.clipboard().map_err(|e| anyhow!(e))?;
    let ticker = Arc::new(Ticker::new());

    let state = Arc::new(
        AppState::new(
            config.port,
            config.host.clone(),
            Arc::new(SystemClock),
            clipboard,
            Arc::clone(&ticker),
        )
        .map_err(|e| anyhow!(e))?,
    );

    // Start the once-per-second tick
    tokio::spawn(tick_driver_task(ticker));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /panel                  - Clocks and all calculators");
    info!("  GET  /calculators/:id        - One calculator");
    info!("  POST /calculators/:id/set    - Start countdown or snapshot");
    info!("  POST /calculators/:id/clear  - Reset calculator");
    info!("  POST /calculators/:id/tap    - Copy shown value on hit");
    info!("  POST /calculators/:id/layout - Place calculator cell");
    info!("  POST /displays/:kind/layout  - Place clock or epoch cell");
    info!("  GET  /health                 - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
