//! Shared health state for the /health endpoint.
//! Updated by the trend watcher and alert dispatcher, read by the API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

use crate::types::{MarketSymbol, Trend};

/// Most recent classifier result for one market.
#[derive(Debug, Clone)]
pub struct TrendSnapshot {
    pub trend: Trend,
    pub touch_count: u32,
    /// Unix seconds of the scan that produced this.
    pub scanned_at: u64,
}

/// Shared scan metrics. Updated by watcher components, read by API.
#[derive(Default)]
pub struct HealthState {
    /// Completed scan cycles since startup.
    pub cycles_completed: AtomicU64,
    /// Alerts accepted by the messaging provider.
    pub alerts_sent: AtomicU64,
    /// Alerts the provider refused or that failed in transit.
    pub alerts_failed: AtomicU64,
    /// Unix seconds of the last completed cycle (0 = none yet).
    pub last_cycle_at: AtomicU64,
    latest: DashMap<MarketSymbol, TrendSnapshot>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_market(&self, symbol: MarketSymbol, trend: Trend, touch_count: u32) {
        self.latest.insert(symbol, TrendSnapshot { trend, touch_count, scanned_at: now_secs() });
    }

    pub fn record_cycle(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
        self.last_cycle_at.store(now_secs(), Ordering::Relaxed);
    }

    pub fn inc_alerts_sent(&self) {
        self.alerts_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_alerts_failed(&self) {
        self.alerts_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed.load(Ordering::Relaxed)
    }

    pub fn alerts_sent(&self) -> u64 {
        self.alerts_sent.load(Ordering::Relaxed)
    }

    pub fn alerts_failed(&self) -> u64 {
        self.alerts_failed.load(Ordering::Relaxed)
    }

    pub fn last_cycle_at(&self) -> u64 {
        self.last_cycle_at.load(Ordering::Relaxed)
    }

    pub fn latest_snapshot(&self, symbol: MarketSymbol) -> Option<TrendSnapshot> {
        self.latest.get(&symbol).map(|s| s.clone())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let health = HealthState::new();
        assert_eq!(health.cycles_completed(), 0);
        assert_eq!(health.alerts_sent(), 0);
        assert_eq!(health.alerts_failed(), 0);
        assert_eq!(health.last_cycle_at(), 0);
        assert!(health.latest_snapshot(MarketSymbol::Gold).is_none());
    }

    #[test]
    fn record_market_keeps_only_the_latest() {
        let health = HealthState::new();
        health.record_market(MarketSymbol::Gold, Trend::Bullish, 3);
        health.record_market(MarketSymbol::Gold, Trend::Neutral, 0);

        let snap = health.latest_snapshot(MarketSymbol::Gold).unwrap();
        assert_eq!(snap.trend, Trend::Neutral);
        assert_eq!(snap.touch_count, 0);
    }

    #[test]
    fn record_cycle_bumps_counter_and_timestamp() {
        let health = HealthState::new();
        health.record_cycle();
        health.record_cycle();
        assert_eq!(health.cycles_completed(), 2);
        assert!(health.last_cycle_at() > 0);
    }
}
