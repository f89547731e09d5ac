//! Hatchery binary.
//!
//! Wires the local store, the generation client, the controller, and the
//! HTTP API together, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Open (and migrate) the `SQLite` store
//! 4. Build the generation client
//! 5. Load the persisted collection into the controller
//! 6. Serve the API

mod config;
mod error;

use std::sync::Arc;

use hatchery_core::Controller;
use hatchery_genai::HttpGenerator;
use hatchery_server::start_server;
use hatchery_store::SqliteStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step fails or the server stops with an
/// error.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("hatchery starting");

    // 2. Load configuration.
    let config = AppConfig::from_env()?;
    info!(
        database_url = config.store.url,
        starting_balance = config.store.starting_balance,
        host = config.server.host,
        port = config.server.port,
        text_model = config.generator.text.model,
        image_model = config.generator.image.model,
        "configuration loaded"
    );

    // 3. Open the store.
    let store = SqliteStore::open(&config.store)
        .await
        .map_err(error::LaunchError::from)?;
    info!("store opened");

    // 4. Build the generation client.
    let generator = HttpGenerator::from_config(&config.generator).map_err(error::LaunchError::from)?;
    info!(backend = generator.text_backend_name(), "generation client ready");

    // 5. Load persisted state. A failed load leaves an empty, usable
    //    collection and an error notice.
    let controller = Arc::new(Controller::new(store, generator));
    if let Err(e) = controller.load().await {
        warn!(error = %e, "starting with an empty collection");
    }

    // 6. Serve.
    let served = start_server(&config.server, Arc::clone(&controller)).await;

    controller.store().close().await;
    info!("store closed");

    served.map_err(error::LaunchError::from)?;
    Ok(())
}
