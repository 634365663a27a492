//! tellerkit — widget runtime entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at the configured level
//!   4. Build the HTTP client and locale store, run the initial load
//!   5. Wire the event bus, host channel and relay
//!   6. Run until Ctrl-C or until all components exit

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use tellerkit::bus::EventBus;
use tellerkit::config;
use tellerkit::error::AppError;
use tellerkit::host::{self, StdinChannel};
use tellerkit::locale::LocaleStore;
use tellerkit::logger;
use tellerkit::relay::RelayComponent;
use tellerkit::runtime::{Component, spawn_components};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level)?;

    info!(
        widget = %config.widget_name,
        locale_endpoint = %config.locale.endpoint,
        log_level = %config.log_level,
        "config loaded"
    );

    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| AppError::Config(format!("failed building HTTP client: {e}")))?;

    let store = Arc::new(LocaleStore::new(
        client,
        config.locale.endpoint.clone(),
        Duration::from_millis(config.locale.timeout_ms),
    ));

    // Initial locale load. A failure is logged inside `load`; the store
    // serves its fallbacks until a later load succeeds.
    store.load().await;
    info!(currency = %store.get("currency"), "locale store ready");

    let bus = Arc::new(EventBus::default());
    let (host_tx, host_rx) = host::host_pair(config.host.buffer);

    let mut components: Vec<Box<dyn Component>> = Vec::new();
    components.push(Box::new(RelayComponent::new(host_rx, bus.clone())));
    if config.host.stdin {
        info!("loading stdin host channel");
        components.push(Box::new(StdinChannel::new("stdin0", host_tx.clone())));
    }
    // The relay exits once the last host sender is gone.
    drop(host_tx);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, shutting down");
                shutdown.cancel();
            }
        });
    }

    spawn_components(components, shutdown).join().await
}
