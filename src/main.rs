mod config;
mod error;
mod feed;
mod notify;
mod state;
mod trend;
mod types;
mod watcher;
mod api;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::health::HealthState;
use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::feed::{MarketDataSource, MockFeed};
use crate::notify::{AlertDispatcher, TwilioSender};
use crate::state::SettingsStore;
use crate::types::UserSettings;
use crate::watcher::TrendWatcher;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Credential notice ---
    if cfg.twilio_account_sid.is_empty() || cfg.twilio_auth_token.is_empty() {
        warn!(
            "TWILIO_ACCOUNT_SID / TWILIO_AUTH_TOKEN not set — alert sends will be refused by the provider"
        );
    }

    // --- Shared state ---
    let settings = SettingsStore::new(UserSettings {
        whatsapp_notifications: true,
        whatsapp_number: cfg.default_whatsapp_number.clone(),
    });
    let health = Arc::new(HealthState::new());
    let feed: Arc<dyn MarketDataSource> = Arc::new(MockFeed);

    // --- Alert pipeline ---
    let sender = Arc::new(TwilioSender::new(
        cfg.twilio_api_url.clone(),
        cfg.twilio_account_sid.clone(),
        cfg.twilio_auth_token.clone(),
    )?);
    let dispatcher = AlertDispatcher::new(
        sender,
        cfg.twilio_from_number.clone(),
        Arc::clone(&settings),
        Arc::clone(&health),
    );

    // --- Background trend watcher ---
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let trend_watcher = TrendWatcher::new(
        cfg.alert_interval_secs,
        Arc::clone(&feed),
        Arc::clone(&settings),
        Arc::clone(&health),
        dispatcher,
    );
    tokio::spawn(async move { trend_watcher.run(shutdown_rx).await });

    // --- HTTP API server ---
    let api_state = ApiState { cfg: cfg.clone(), feed, settings, health };
    let app = router(api_state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Dashboard listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C, flipping the watch channel so the trend watcher
/// winds down alongside the HTTP server.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
}
