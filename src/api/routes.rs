use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::api::health::HealthState;
use crate::config::Config;
use crate::feed::MarketDataSource;
use crate::state::SettingsStore;
use crate::trend::{classifier, history};
use crate::types::{HistoricalTrend, MarketSymbol, TrendAnalysis};

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Config,
    pub feed: Arc<dyn MarketDataSource>,
    pub settings: Arc<SettingsStore>,
    pub health: Arc<HealthState>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_market_data", get(get_market_data))
        .route("/update_settings", post(update_settings))
        .route("/health", get(health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query and request structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct MarketDataQuery {
    pub market: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub whatsapp_notifications: Option<bool>,
    pub whatsapp_number: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct MarketDataResponse {
    pub prices: Vec<f64>,
    pub timestamps: Vec<String>,
    pub trend_analysis: TrendAnalysis,
    pub historical_trends: Vec<HistoricalTrend>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn get_market_data(
    State(state): State<ApiState>,
    Query(params): Query<MarketDataQuery>,
) -> Json<MarketDataResponse> {
    let symbol = MarketSymbol::from_key(params.market.as_deref().unwrap_or("gold"));

    let series = state.feed.fetch(symbol);
    let trend_analysis = classifier::classify(&series.prices);

    Json(MarketDataResponse {
        prices: series.prices,
        timestamps: series.timestamps,
        trend_analysis,
        historical_trends: history::recent_trends(Local::now()),
    })
}

/// Missing fields reset to their defaults rather than keeping the previous
/// value, so posting `{}` restores the out-of-the-box settings.
async fn update_settings(
    State(state): State<ApiState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Json<serde_json::Value> {
    let enabled = req.whatsapp_notifications.unwrap_or(true);
    let number = req
        .whatsapp_number
        .unwrap_or_else(|| state.cfg.default_whatsapp_number.clone());

    state.settings.update(enabled, number).await;

    Json(serde_json::json!({ "status": "success" }))
}

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let mut markets = serde_json::Map::new();
    for symbol in MarketSymbol::ALL {
        if let Some(snap) = state.health.latest_snapshot(symbol) {
            markets.insert(
                symbol.to_string(),
                serde_json::json!({
                    "trend": snap.trend,
                    "touch_count": snap.touch_count,
                    "scanned_at": snap.scanned_at,
                }),
            );
        }
    }

    Json(serde_json::json!({
        "status": "ok",
        "cycles_completed": state.health.cycles_completed(),
        "alerts_sent": state.health.alerts_sent(),
        "alerts_failed": state.health.alerts_failed(),
        "last_cycle_at": state.health.last_cycle_at(),
        "markets": markets,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SERIES_LEN;
    use crate::feed::MockFeed;
    use crate::types::{Trend, UserSettings};

    fn test_config() -> Config {
        Config {
            log_level: "info".to_string(),
            api_port: 3000,
            alert_interval_secs: 900,
            twilio_api_url: "https://api.twilio.com".to_string(),
            twilio_account_sid: String::new(),
            twilio_auth_token: String::new(),
            twilio_from_number: "+14155238886".to_string(),
            default_whatsapp_number: "+15551234567".to_string(),
        }
    }

    fn test_state() -> ApiState {
        ApiState {
            cfg: test_config(),
            feed: Arc::new(MockFeed),
            settings: SettingsStore::new(UserSettings {
                whatsapp_notifications: true,
                whatsapp_number: "+15551234567".to_string(),
            }),
            health: Arc::new(HealthState::new()),
        }
    }

    #[tokio::test]
    async fn market_data_defaults_to_gold() {
        let resp =
            get_market_data(State(test_state()), Query(MarketDataQuery { market: None })).await;

        assert_eq!(resp.0.prices.len(), SERIES_LEN);
        assert_eq!(resp.0.timestamps.len(), SERIES_LEN);
        assert!((resp.0.prices[0] - 1807.5).abs() < 1e-9);
        assert_eq!(resp.0.trend_analysis.trend, Trend::Neutral);
        assert_eq!(resp.0.historical_trends.len(), 5);
        assert_eq!(resp.0.historical_trends[0].trend, Trend::Bullish);
        assert_eq!(resp.0.historical_trends[1].trend, Trend::Bearish);
    }

    #[tokio::test]
    async fn unknown_market_keys_price_as_usdjpy() {
        let resp = get_market_data(
            State(test_state()),
            Query(MarketDataQuery { market: Some("btcusd".to_string()) }),
        )
        .await;

        assert!((resp.0.prices[0] - 110.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn update_settings_applies_both_fields() {
        let state = test_state();

        let resp = update_settings(
            State(state.clone()),
            Json(UpdateSettingsRequest {
                whatsapp_notifications: Some(false),
                whatsapp_number: Some("+16667778888".to_string()),
            }),
        )
        .await;
        assert_eq!(resp.0["status"], "success");

        let settings = state.settings.snapshot().await;
        assert!(!settings.whatsapp_notifications);
        assert_eq!(settings.whatsapp_number, "+16667778888");
    }

    #[tokio::test]
    async fn disabling_notifications_leaves_the_default_number() {
        let state = test_state();

        update_settings(
            State(state.clone()),
            Json(UpdateSettingsRequest {
                whatsapp_notifications: Some(false),
                whatsapp_number: None,
            }),
        )
        .await;

        let settings = state.settings.snapshot().await;
        assert!(!settings.whatsapp_notifications);
        assert_eq!(settings.whatsapp_number, "+15551234567");
    }

    #[tokio::test]
    async fn omitted_settings_fields_reset_to_defaults() {
        let state = test_state();
        state.settings.update(false, "+19990001111".to_string()).await;

        update_settings(
            State(state.clone()),
            Json(UpdateSettingsRequest { whatsapp_notifications: None, whatsapp_number: None }),
        )
        .await;

        let settings = state.settings.snapshot().await;
        assert!(settings.whatsapp_notifications);
        assert_eq!(settings.whatsapp_number, "+15551234567");
    }

    #[test]
    fn settings_request_tolerates_missing_fields() {
        let req: UpdateSettingsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.whatsapp_notifications.is_none());
        assert!(req.whatsapp_number.is_none());
    }

    #[tokio::test]
    async fn health_reports_ok_with_counters() {
        let state = test_state();
        state.health.record_market(MarketSymbol::Gold, Trend::Bullish, 3);
        state.health.record_cycle();

        let resp = health(State(state)).await;
        assert_eq!(resp.0["status"], "ok");
        assert_eq!(resp.0["cycles_completed"], 1);
        assert_eq!(resp.0["markets"]["gold"]["trend"], "bullish");
        assert_eq!(resp.0["markets"]["gold"]["touch_count"], 3);
    }
}
