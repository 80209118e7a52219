use crate::config::{BEARISH_TOUCH_COUNT, BULLISH_TOUCH_COUNT, MIN_TREND_POINTS};
use crate::types::{Trend, TrendAnalysis};

/// Classify a price series by the monotonicity of its most recent quarter.
///
/// Only the last `ceil(len / 4)` points are inspected: strictly rising ones
/// read as bullish, strictly falling as bearish, anything mixed (or a series
/// shorter than `MIN_TREND_POINTS`) as neutral. Touch counts are fixed per
/// trend; the alert threshold in the watcher keys off them.
pub fn classify(prices: &[f64]) -> TrendAnalysis {
    if prices.len() < MIN_TREND_POINTS {
        return neutral();
    }

    let tail = &prices[prices.len() - prices.len().div_ceil(4)..];

    if tail.windows(2).all(|w| w[1] > w[0]) {
        return TrendAnalysis {
            trend: Trend::Bullish,
            description: "Higher lows detected - Bullish trend".to_string(),
            touch_count: BULLISH_TOUCH_COUNT,
        };
    }

    if tail.windows(2).all(|w| w[1] < w[0]) {
        return TrendAnalysis {
            trend: Trend::Bearish,
            description: "Lower highs detected - Bearish trend".to_string(),
            touch_count: BEARISH_TOUCH_COUNT,
        };
    }

    neutral()
}

fn neutral() -> TrendAnalysis {
    TrendAnalysis {
        trend: Trend::Neutral,
        description: "No strong trend detected".to_string(),
        touch_count: 0,
    }
}
