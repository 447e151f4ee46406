//! Rolling performance aggregates per offer, language and country.
//!
//! Raw rows are resolved through the reference lookups, summed per key and
//! date, then turned into trailing 7- and 30-day window sums. Windows are
//! calendar ranges `[date - N, date]`; dates without rows are not emitted and
//! are not zero-filled.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use super::reference::{GeoTargetLookup, LanguageLookup};
use super::types::{MetricTotals, PerformanceAggregate, PerformanceKey, RawPerformanceRecord};

/// Days preceding the current date covered by the short window.
pub const SHORT_WINDOW_PRECEDING_DAYS: i64 = 7;

/// Days preceding the current date covered by the long window.
pub const LONG_WINDOW_PRECEDING_DAYS: i64 = 30;

/// Counters describing one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub records_in: usize,
    pub unresolved_country: usize,
    pub unresolved_language: usize,
    pub daily_rows: usize,
}

impl AggregationStats {
    pub fn unresolved(&self) -> usize {
        self.unresolved_country + self.unresolved_language
    }
}

/// Resolves and sums raw records per key and date.
///
/// Records whose country or language cannot be resolved are dropped.
pub fn daily_totals(
    records: &[RawPerformanceRecord],
    geo: &GeoTargetLookup,
    languages: &LanguageLookup,
    stats: &mut AggregationStats,
) -> BTreeMap<PerformanceKey, BTreeMap<NaiveDate, MetricTotals>> {
    let mut series: BTreeMap<PerformanceKey, BTreeMap<NaiveDate, MetricTotals>> = BTreeMap::new();
    stats.records_in += records.len();

    for record in records {
        let Some(country_code) = geo.resolve(&record.country_criterion) else {
            stats.unresolved_country += 1;
            continue;
        };
        let Some(language_code) = languages.resolve(&record.language_criterion) else {
            stats.unresolved_language += 1;
            continue;
        };

        let key = PerformanceKey {
            merchant_id: record.merchant_id,
            channel: record.channel.to_lowercase(),
            offer_id: record.offer_id.to_lowercase(),
            language_code: language_code.to_string(),
            country_code: country_code.to_string(),
        };

        series
            .entry(key)
            .or_default()
            .entry(record.segment_date)
            .or_default()
            .add(&record.metrics);
    }

    stats.daily_rows = series.values().map(BTreeMap::len).sum();
    series
}

/// Computes both trailing windows for every key and date present in `series`.
pub fn rolling_windows(
    series: &BTreeMap<PerformanceKey, BTreeMap<NaiveDate, MetricTotals>>,
) -> Vec<PerformanceAggregate> {
    let mut aggregates = Vec::with_capacity(series.values().map(BTreeMap::len).sum());

    for (key, days) in series {
        let days: Vec<(NaiveDate, MetricTotals)> =
            days.iter().map(|(date, totals)| (*date, *totals)).collect();

        for (index, (date, _)) in days.iter().enumerate() {
            aggregates.push(PerformanceAggregate {
                key: key.clone(),
                date: *date,
                last_7_days: trailing_sum(&days[..=index], *date, SHORT_WINDOW_PRECEDING_DAYS),
                last_30_days: trailing_sum(&days[..=index], *date, LONG_WINDOW_PRECEDING_DAYS),
            });
        }
    }

    aggregates
}

/// Resolves, sums and windows in one pass.
pub fn aggregate(
    records: &[RawPerformanceRecord],
    geo: &GeoTargetLookup,
    languages: &LanguageLookup,
) -> (Vec<PerformanceAggregate>, AggregationStats) {
    let mut stats = AggregationStats::default();
    let series = daily_totals(records, geo, languages, &mut stats);
    (rolling_windows(&series), stats)
}

/// Sums the trailing rows of `days` (sorted ascending, ending at `date`) that
/// fall within `preceding` days of `date`.
fn trailing_sum(days: &[(NaiveDate, MetricTotals)], date: NaiveDate, preceding: i64) -> MetricTotals {
    let window_start = date - Duration::days(preceding);
    let mut totals = MetricTotals::default();
    for (day, metrics) in days.iter().rev() {
        if *day < window_start {
            break;
        }
        totals.add(metrics);
    }
    totals
}
