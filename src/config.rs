use crate::error::{AppError, Result};

pub const TWILIO_API_URL: &str = "https://api.twilio.com";

/// Number of points in a generated price series. Timestamps are spaced one
/// minute apart, ending one minute before the generation instant.
pub const SERIES_LEN: usize = 100;

/// Series shorter than this are classified neutral without inspecting the tail.
pub const MIN_TREND_POINTS: usize = 10;

/// Touch counts are nominal per-branch constants, not derived from counting
/// actual trendline touches. The dashboard and alert text report them as-is.
pub const BULLISH_TOUCH_COUNT: u32 = 3;
pub const BEARISH_TOUCH_COUNT: u32 = 2;

/// Minimum touch count that qualifies a classification for a WhatsApp alert.
/// Bullish (3) and bearish (2) both qualify; neutral (0) never does.
pub const ALERT_TOUCH_THRESHOLD: u32 = 2;

/// How often the trend watcher rescans all markets (seconds).
pub const DEFAULT_ALERT_INTERVAL_SECS: u64 = 900;

/// Upper bound on a single outbound messaging call (seconds).
pub const SEND_TIMEOUT_SECS: u64 = 10;

/// Entries in the synthesized historical-trend panel, one per day offset.
pub const HISTORY_LEN: usize = 5;

/// Per-market synthetic price parameters: `price = base + volatility * (0.5 - (i % 20)/20)`.
pub mod market_params {
    pub const GOLD_BASE_PRICE: f64 = 1800.0;
    pub const GOLD_VOLATILITY: f64 = 15.0;
    pub const USDJPY_BASE_PRICE: f64 = 110.0;
    pub const USDJPY_VOLATILITY: f64 = 1.5;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub api_port: u16,
    /// Watcher scan interval in seconds (ALERT_INTERVAL_SECS)
    pub alert_interval_secs: u64,
    /// Messaging provider base URL (TWILIO_API_URL) — overridable for staging
    pub twilio_api_url: String,
    /// Account SID (TWILIO_ACCOUNT_SID) — no baked-in default
    pub twilio_account_sid: String,
    /// Auth token (TWILIO_AUTH_TOKEN) — no baked-in default
    pub twilio_auth_token: String,
    /// Sender number for the WhatsApp channel (TWILIO_FROM_NUMBER)
    pub twilio_from_number: String,
    /// Initial and fallback recipient number (DEFAULT_WHATSAPP_NUMBER)
    pub default_whatsapp_number: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            alert_interval_secs: std::env::var("ALERT_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_ALERT_INTERVAL_SECS.to_string())
                .parse::<u64>()
                .unwrap_or(DEFAULT_ALERT_INTERVAL_SECS),
            twilio_api_url: std::env::var("TWILIO_API_URL")
                .unwrap_or_else(|_| TWILIO_API_URL.to_string()),
            twilio_account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            twilio_auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            twilio_from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
            default_whatsapp_number: std::env::var("DEFAULT_WHATSAPP_NUMBER").unwrap_or_default(),
        })
    }
}
