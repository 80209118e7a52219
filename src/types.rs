use serde::Serialize;

use crate::config::market_params;

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

/// The two markets the dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketSymbol {
    Gold,
    UsdJpy,
}

impl MarketSymbol {
    pub const ALL: [MarketSymbol; 2] = [MarketSymbol::Gold, MarketSymbol::UsdJpy];

    /// Resolve a query-string key. Unrecognized keys price as USD/JPY
    /// rather than erroring.
    pub fn from_key(key: &str) -> Self {
        match key {
            "gold" => MarketSymbol::Gold,
            _ => MarketSymbol::UsdJpy,
        }
    }

    /// Human-readable name used in alert messages and chart labels.
    pub fn label(self) -> &'static str {
        match self {
            MarketSymbol::Gold => "Gold (XAU/USD)",
            MarketSymbol::UsdJpy => "USD/JPY",
        }
    }

    /// `(base_price, volatility)` driving the synthetic price formula.
    pub fn price_params(self) -> (f64, f64) {
        match self {
            MarketSymbol::Gold => (market_params::GOLD_BASE_PRICE, market_params::GOLD_VOLATILITY),
            MarketSymbol::UsdJpy => {
                (market_params::USDJPY_BASE_PRICE, market_params::USDJPY_VOLATILITY)
            }
        }
    }
}

impl std::fmt::Display for MarketSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketSymbol::Gold => write!(f, "gold"),
            MarketSymbol::UsdJpy => write!(f, "usdjpy"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// Output of the trendline classifier for one market scan.
#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub trend: Trend,
    pub description: String,
    pub touch_count: u32,
}

/// One entry in the sample history shown under the chart.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalTrend {
    pub date: String,
    pub trend: Trend,
    pub touch_count: u32,
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Price series
// ---------------------------------------------------------------------------

/// A window of synthetic prices with matching "%H:%M" labels.
///
/// `prices` and `timestamps` always have the same length.
#[derive(Debug, Clone)]
pub struct MarketSeries {
    pub symbol: MarketSymbol,
    pub prices: Vec<f64>,
    pub timestamps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Settings and alerts
// ---------------------------------------------------------------------------

/// Per-user notification settings, mutated over the API.
#[derive(Debug, Clone)]
pub struct UserSettings {
    pub whatsapp_notifications: bool,
    pub whatsapp_number: String,
}

/// A fully rendered alert, ready to hand to a message sender.
#[derive(Debug, Clone)]
pub struct AlertMessage {
    pub market_label: &'static str,
    pub trend: Trend,
    pub touch_count: u32,
    pub description: String,
}

impl AlertMessage {
    pub fn new(symbol: MarketSymbol, analysis: &TrendAnalysis) -> Self {
        Self {
            market_label: symbol.label(),
            trend: analysis.trend,
            touch_count: analysis.touch_count,
            description: analysis.description.clone(),
        }
    }

    /// Message body in the fixed four-line alert format.
    pub fn body(&self) -> String {
        format!(
            "ALERT: {}\nTrend: {}\nTrendline touched {} times\nAnalysis: {}",
            self.market_label,
            self.trend.to_string().to_uppercase(),
            self.touch_count,
            self.description
        )
    }
}
