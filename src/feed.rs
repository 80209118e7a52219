use chrono::{DateTime, Duration, Local};

use crate::config::SERIES_LEN;
use crate::types::{MarketSeries, MarketSymbol};

/// Source of price series for the API and the trend watcher.
///
/// The dashboard ships with [`MockFeed`]; tests substitute deterministic
/// sources to exercise the classifier and alert paths.
pub trait MarketDataSource: Send + Sync {
    fn fetch(&self, symbol: MarketSymbol) -> MarketSeries;
}

/// The stock data source: a deterministic sawtooth around each market's
/// base price, one point per minute, newest point one minute in the past.
pub struct MockFeed;

impl MarketDataSource for MockFeed {
    fn fetch(&self, symbol: MarketSymbol) -> MarketSeries {
        generate_series(symbol, Local::now())
    }
}

/// Build the synthetic series for `symbol` as of `now`.
///
/// Point `i` (oldest first) is priced `base + volatility * (0.5 - (i % 20) / 20)`
/// and labeled with the "%H:%M" wall-clock time `SERIES_LEN - i` minutes
/// before `now`. The wave repeats every 20 points, so refreshing the chart
/// shifts the labels but never the shape.
pub fn generate_series(symbol: MarketSymbol, now: DateTime<Local>) -> MarketSeries {
    let (base, volatility) = symbol.price_params();

    let mut prices = Vec::with_capacity(SERIES_LEN);
    let mut timestamps = Vec::with_capacity(SERIES_LEN);

    for i in 0..SERIES_LEN {
        let wobble = 0.5 - (i % 20) as f64 / 20.0;
        prices.push(base + volatility * wobble);

        let at = now - Duration::minutes((SERIES_LEN - i) as i64);
        timestamps.push(at.format("%H:%M").to_string());
    }

    MarketSeries { symbol, prices, timestamps }
}
