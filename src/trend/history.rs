use chrono::{DateTime, Duration, Local};

use crate::config::HISTORY_LEN;
use crate::types::{HistoricalTrend, Trend};

/// Canned history shown under the chart: one entry per day going back
/// `HISTORY_LEN` days, alternating bullish and bearish starting from today.
///
/// Touch counts here deliberately differ from the live classifier's (bullish
/// entries carry 2, bearish 3) so the panel shows some variety.
pub fn recent_trends(now: DateTime<Local>) -> Vec<HistoricalTrend> {
    (0..HISTORY_LEN)
        .map(|i| {
            let (trend, touch_count) = if i % 2 == 0 {
                (Trend::Bullish, 2)
            } else {
                (Trend::Bearish, 3)
            };

            HistoricalTrend {
                date: (now - Duration::days(i as i64)).to_rfc3339(),
                trend,
                touch_count,
                notes: format!("Sample trend pattern from {} day(s) ago", i + 1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn five_entries_alternating_from_bullish() {
        let now = Local.with_ymd_and_hms(2024, 5, 14, 10, 30, 0).unwrap();
        let trends = recent_trends(now);

        assert_eq!(trends.len(), HISTORY_LEN);
        for (i, entry) in trends.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(entry.trend, Trend::Bullish);
                assert_eq!(entry.touch_count, 2);
            } else {
                assert_eq!(entry.trend, Trend::Bearish);
                assert_eq!(entry.touch_count, 3);
            }
            assert_eq!(entry.notes, format!("Sample trend pattern from {} day(s) ago", i + 1));
        }
    }

    #[test]
    fn dates_step_back_one_day_at_a_time() {
        let now = Local.with_ymd_and_hms(2024, 5, 14, 10, 30, 0).unwrap();
        let trends = recent_trends(now);

        assert!(trends[0].date.starts_with("2024-05-14"));
        assert!(trends[1].date.starts_with("2024-05-13"));
        assert!(trends[4].date.starts_with("2024-05-10"));
    }
}
