use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, info};

use crate::api::health::HealthState;
use crate::config::ALERT_TOUCH_THRESHOLD;
use crate::feed::MarketDataSource;
use crate::notify::AlertDispatcher;
use crate::state::SettingsStore;
use crate::trend::classifier;
use crate::types::MarketSymbol;

/// Background loop that re-scans every market on a fixed interval and
/// dispatches alerts for trends whose touch count clears the threshold.
pub struct TrendWatcher {
    interval_secs: u64,
    feed: Arc<dyn MarketDataSource>,
    settings: Arc<SettingsStore>,
    health: Arc<HealthState>,
    dispatcher: AlertDispatcher,
}

impl TrendWatcher {
    pub fn new(
        interval_secs: u64,
        feed: Arc<dyn MarketDataSource>,
        settings: Arc<SettingsStore>,
        health: Arc<HealthState>,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self { interval_secs, feed, settings, health, dispatcher }
    }

    /// Scan until `shutdown` flips (or its sender is dropped). The first
    /// scan runs immediately, then one per interval.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(Duration::from_secs(self.interval_secs));

        info!("Trend watcher started, scanning every {}s", self.interval_secs);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.scan().await,
                _ = shutdown.changed() => {
                    info!("Trend watcher stopping");
                    break;
                }
            }
        }
    }

    /// One pass over all markets: classify, record, and alert when the
    /// trendline was touched enough times and notifications are enabled.
    pub async fn scan(&self) {
        for symbol in MarketSymbol::ALL {
            let series = self.feed.fetch(symbol);
            let analysis = classifier::classify(&series.prices);

            debug!("Scanned {symbol}: {} ({} touches)", analysis.trend, analysis.touch_count);

            self.health.record_market(symbol, analysis.trend, analysis.touch_count);

            let notifications_on = self.settings.snapshot().await.whatsapp_notifications;
            if analysis.touch_count >= ALERT_TOUCH_THRESHOLD && notifications_on {
                self.dispatcher.dispatch(symbol, &analysis).await;
            }
        }

        self.health.record_cycle();
    }
}
