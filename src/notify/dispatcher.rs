use std::sync::Arc;

use tracing::{info, warn};

use crate::api::health::HealthState;
use crate::state::SettingsStore;
use crate::types::{AlertMessage, MarketSymbol, TrendAnalysis};

use super::MessageSender;

/// Renders alerts and pushes them through the configured sender.
///
/// Send failures are logged and counted, never propagated: one refused
/// message must not take the scan loop down.
pub struct AlertDispatcher {
    sender: Arc<dyn MessageSender>,
    from_number: String,
    settings: Arc<SettingsStore>,
    health: Arc<HealthState>,
}

impl AlertDispatcher {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        from_number: String,
        settings: Arc<SettingsStore>,
        health: Arc<HealthState>,
    ) -> Self {
        Self { sender, from_number, settings, health }
    }

    /// Render and send one alert to the currently configured number.
    pub async fn dispatch(&self, symbol: MarketSymbol, analysis: &TrendAnalysis) {
        let body = AlertMessage::new(symbol, analysis).body();
        let number = self.settings.snapshot().await.whatsapp_number;

        let from = format!("whatsapp:{}", self.from_number);
        let to = format!("whatsapp:{number}");

        match self.sender.send_message(&from, &to, &body).await {
            Ok(()) => {
                self.health.inc_alerts_sent();
                info!("Alert sent for {symbol}: {} trend", analysis.trend);
            }
            Err(e) => {
                self.health.inc_alerts_failed();
                warn!("Failed to send alert for {symbol}: {e}");
            }
        }
    }
}
