//! Read-side rollups over daily records.
//!
//! Chart series, period summary statistics, and period-over-period
//! comparison. Everything here is pure: the caller fetches the rows, these
//! functions only aggregate them.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::Serialize;

use crate::timezone::{days_between, local_day_string};
use crate::types::Timestamp;

/// One daily record as the rollup sees it: a (day, type, count) triple.
#[derive(Debug, Clone)]
pub struct DailyEntry {
    pub local_day: Timestamp,
    pub zikr_type: String,
    pub count: i64,
}

/// One point on the chart: a calendar day with its total and per-type
/// breakdown. Days without records carry `total: 0` and an empty breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPoint {
    pub date: String,
    pub total: i64,
    pub breakdown: BTreeMap<String, i64>,
}

/// Summary statistics over a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesStats {
    pub average: i64,
    pub max_day: Option<String>,
    pub max_count: i64,
    pub total: i64,
}

/// Direction of a period-over-period difference.
pub fn trend(difference: i64) -> &'static str {
    match difference {
        d if d > 0 => "up",
        d if d < 0 => "down",
        _ => "stable",
    }
}

/// Period-over-period change in percent, rounded to one decimal.
///
/// Reported as `0` when the prior period is empty -- a flat zero is more
/// useful on a dashboard than a division error or infinity.
pub fn percent_change(current: i64, prior: i64) -> f64 {
    if prior == 0 {
        return 0.0;
    }
    let raw = (current - prior) as f64 / prior as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Build a gap-free chart series of `days` points starting at
/// `start_midnight` (a local-midnight instant).
///
/// Records are assigned to buckets by whole-day distance from the start;
/// anything outside the window is dropped. The result always has exactly
/// `days` entries.
pub fn build_series(
    records: &[DailyEntry],
    start_midnight: Timestamp,
    days: i64,
    offset_minutes: i32,
) -> Vec<DayPoint> {
    let days = days.max(0);
    let mut series: Vec<DayPoint> = (0..days)
        .map(|i| DayPoint {
            date: local_day_string(start_midnight + Duration::days(i), offset_minutes),
            total: 0,
            breakdown: BTreeMap::new(),
        })
        .collect();

    for record in records {
        let idx = days_between(start_midnight, record.local_day);
        if (0..days).contains(&idx) {
            let point = &mut series[idx as usize];
            point.total += record.count;
            *point.breakdown.entry(record.zikr_type.clone()).or_insert(0) += record.count;
        }
    }

    series
}

/// Compute average / max / total over a series.
///
/// The average is rounded to the nearest whole count. On ties the earliest
/// maximum day wins.
pub fn series_stats(series: &[DayPoint]) -> SeriesStats {
    let total: i64 = series.iter().map(|p| p.total).sum();
    let average = if series.is_empty() {
        0
    } else {
        (total as f64 / series.len() as f64).round() as i64
    };

    let max = series
        .iter()
        .fold(None::<&DayPoint>, |best, p| match best {
            Some(b) if p.total > b.total => Some(p),
            Some(b) => Some(b),
            None => Some(p),
        });

    SeriesStats {
        average,
        max_day: max.map(|p| p.date.clone()),
        max_count: max.map(|p| p.total).unwrap_or(0),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const OFFSET: i32 = 360;

    fn midnight(n: i64) -> Timestamp {
        // Dhaka local midnights: 18:00 UTC.
        Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap() + Duration::days(n)
    }

    fn entry(day: i64, zikr_type: &str, count: i64) -> DailyEntry {
        DailyEntry {
            local_day: midnight(day),
            zikr_type: zikr_type.to_string(),
            count,
        }
    }

    // -- build_series --

    #[test]
    fn empty_range_yields_full_zero_series() {
        let series = build_series(&[], midnight(0), 7, OFFSET);
        assert_eq!(series.len(), 7);
        for point in &series {
            assert_eq!(point.total, 0);
            assert!(point.breakdown.is_empty());
        }
        assert_eq!(series[0].date, "2025-03-02");
        assert_eq!(series[6].date, "2025-03-08");
    }

    #[test]
    fn records_grouped_into_day_buckets() {
        let records = vec![
            entry(0, "SubhanAllah", 30),
            entry(0, "Alhamdulillah", 20),
            entry(2, "SubhanAllah", 7),
        ];
        let series = build_series(&records, midnight(0), 3, OFFSET);
        assert_eq!(series[0].total, 50);
        assert_eq!(series[0].breakdown["SubhanAllah"], 30);
        assert_eq!(series[0].breakdown["Alhamdulillah"], 20);
        assert_eq!(series[1].total, 0);
        assert_eq!(series[2].total, 7);
    }

    #[test]
    fn records_outside_window_dropped() {
        let records = vec![entry(-1, "SubhanAllah", 5), entry(3, "SubhanAllah", 5)];
        let series = build_series(&records, midnight(0), 3, OFFSET);
        assert!(series.iter().all(|p| p.total == 0));
    }

    // -- series_stats --

    #[test]
    fn stats_over_series() {
        let records = vec![
            entry(0, "SubhanAllah", 10),
            entry(1, "SubhanAllah", 40),
            entry(2, "SubhanAllah", 25),
        ];
        let series = build_series(&records, midnight(0), 3, OFFSET);
        let stats = series_stats(&series);
        assert_eq!(stats.total, 75);
        assert_eq!(stats.average, 25);
        assert_eq!(stats.max_day.as_deref(), Some("2025-03-03"));
        assert_eq!(stats.max_count, 40);
    }

    #[test]
    fn stats_tie_keeps_earliest_day() {
        let records = vec![entry(0, "a", 40), entry(2, "a", 40)];
        let series = build_series(&records, midnight(0), 3, OFFSET);
        let stats = series_stats(&series);
        assert_eq!(stats.max_day.as_deref(), Some("2025-03-02"));
    }

    #[test]
    fn stats_on_empty_series() {
        let stats = series_stats(&[]);
        assert_eq!(stats.average, 0);
        assert_eq!(stats.max_day, None);
        assert_eq!(stats.max_count, 0);
        assert_eq!(stats.total, 0);
    }

    // -- percent_change / trend --

    #[test]
    fn percent_change_rounds_to_one_decimal() {
        assert_eq!(percent_change(110, 100), 10.0);
        assert_eq!(percent_change(100, 3), 3233.3);
        assert_eq!(percent_change(90, 100), -10.0);
    }

    #[test]
    fn percent_change_zero_prior_is_zero() {
        assert_eq!(percent_change(5, 0), 0.0);
        assert_eq!(percent_change(0, 0), 0.0);
    }

    #[test]
    fn trend_direction() {
        assert_eq!(trend(3), "up");
        assert_eq!(trend(-1), "down");
        assert_eq!(trend(0), "stable");
    }
}
